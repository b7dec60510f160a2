//! Criterion benchmarks for the bytestream codecs.
//!
//! Run with: cargo bench -p eoproto-bytestream

use bytestream::{decode_number, encode_number, encode_string, EoReader, EoWriter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_numbers(c: &mut Criterion) {
    c.bench_function("encode_number", |b| {
        b.iter(|| black_box(encode_number(black_box(2_048_576_040))));
    });

    let encoded = encode_number(2_048_576_040);
    c.bench_function("decode_number", |b| {
        b.iter(|| black_box(decode_number(black_box(&encoded))));
    });
}

fn bench_strings(c: &mut Criterion) {
    let text = b"The quick brown fox jumps over the lazy dog".to_vec();
    c.bench_function("encode_string", |b| {
        b.iter(|| {
            let mut bytes = text.clone();
            encode_string(black_box(&mut bytes));
            black_box(bytes);
        });
    });
}

fn bench_chunked_payload(c: &mut Criterion) {
    let mut writer = EoWriter::new();
    for i in 0..64u32 {
        writer.add_short(i * 1_000).unwrap();
        writer.add_string("player");
        writer.add_break();
    }
    let payload = writer.finish();

    c.bench_function("write_chunked_payload", |b| {
        b.iter(|| {
            let mut writer = EoWriter::with_capacity(payload.len());
            for i in 0..64u32 {
                writer.add_short(black_box(i * 1_000)).unwrap();
                writer.add_string(black_box("player"));
                writer.add_break();
            }
            black_box(writer.finish());
        });
    });

    c.bench_function("read_chunked_payload", |b| {
        b.iter(|| {
            let mut reader = EoReader::new(black_box(&payload));
            reader.set_chunked_reading_mode(true);
            while reader.remaining() > 0 {
                black_box(reader.get_short());
                black_box(reader.get_string());
                if reader.next_chunk().is_err() {
                    break;
                }
            }
        });
    });
}

criterion_group!(benches, bench_numbers, bench_strings, bench_chunked_payload);
criterion_main!(benches);
