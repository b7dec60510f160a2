#![no_main]

use bytestream::EoSerialize;
use demo_protocol::server::{InitInitServerPacket, PlayersListServerPacket};
use libfuzzer_sys::fuzz_target;
use wire::{decode_frame, decrypt_packet, PacketId};

fuzz_target!(|data: &[u8]| {
    let mut rest = data;
    let mut frames = 0usize;
    while frames < 64 {
        let Ok(Some((frame, consumed))) = decode_frame(rest) else {
            break;
        };
        rest = &rest[consumed..];
        frames += 1;

        let mut payload = frame.payload.to_vec();
        if frame.id == PacketId::INIT {
            let _ = InitInitServerPacket::from_bytes(&payload);
        } else {
            decrypt_packet(&mut payload, frame.id.family % 10);
            if let Ok(packet) = PlayersListServerPacket::from_bytes(&payload) {
                let _ = packet.to_bytes();
            }
        }
    }
});
