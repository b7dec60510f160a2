//! A sample EO protocol generated at build time.
//!
//! The descriptions under `protocol/` are validated and compiled to Rust by
//! the build script. Each package becomes a module of this crate, so the
//! default `crate::{package}` module paths resolve cross-package types:
//!
//! - [`common`] - packet ids, shared enums and structs
//! - [`client`] - packets sent by the client
//! - [`server`] - packets sent by the server
//!
//! # Example
//!
//! ```
//! use bytestream::EoSerialize;
//! use demo_protocol::client::WalkPlayerClientPacket;
//! use demo_protocol::common::{Coords, Direction};
//!
//! let packet = WalkPlayerClientPacket {
//!     direction: Direction::Right,
//!     timestamp: 0,
//!     coords: Coords { x: 10, y: 20 },
//! };
//! let bytes = packet.to_bytes().unwrap();
//! assert_eq!(WalkPlayerClientPacket::from_bytes(&bytes).unwrap(), packet);
//! ```

#[allow(clippy::all, clippy::pedantic, clippy::nursery, unused_qualifications)]
pub mod common {
    include!(concat!(env!("OUT_DIR"), "/common.rs"));
}

#[allow(clippy::all, clippy::pedantic, clippy::nursery, unused_qualifications)]
pub mod client {
    include!(concat!(env!("OUT_DIR"), "/client.rs"));
}

#[allow(clippy::all, clippy::pedantic, clippy::nursery, unused_qualifications)]
pub mod server {
    include!(concat!(env!("OUT_DIR"), "/server.rs"));
}

#[cfg(test)]
mod tests {
    use super::common::{PacketAction, PacketFamily};
    use super::server::{InitInitServerPacket, PlayersListServerPacket};

    #[test]
    fn packet_ids() {
        assert_eq!(InitInitServerPacket::FAMILY, PacketFamily::Init);
        assert_eq!(InitInitServerPacket::ACTION, PacketAction::Init);
        assert_eq!(u32::from(PlayersListServerPacket::FAMILY), 22);
        assert_eq!(u32::from(PlayersListServerPacket::ACTION), 18);
    }
}
