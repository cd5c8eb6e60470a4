//! NMEA2000 Protocol Library
//!
//! This library provides the protocol layer of an NMEA2000 node:
//! - CAN identifier and frame types for 29-bit J1939 identifiers
//! - A table-driven PGN codec producing typed field maps
//! - Fast packet framing and out-of-order reassembly
//! - ISO address claiming and ISO request handling
//! - SocketCAN interface utilities
//!
//! # Features
//!
//! - **CAN Bus Support**: Open, configure, read from and write to SocketCAN interfaces
//! - **Fast Packet Transport**: Bounded reassembly sessions with timeout and eviction
//! - **PGN Codec**: Decode and encode the PGNs of the definition table, with lookups,
//!   strings, dates, times and repeating groups
//! - **Address Claiming**: Sans-IO state machine that claims, defends and yields addresses
//!
//! # Example
//!
//! ```no_run
//! use std::time::Instant;
//! use nmea2k::{CanBus, N2kStreamReader};
//!
//! let socket = CanBus::open_can_socket("can0").unwrap();
//! CanBus::configure_nmea2k_socket(&socket).unwrap();
//!
//! let mut reader = N2kStreamReader::default();
//!
//! loop {
//!     match CanBus::read_nmea2k_frame(&socket) {
//!         Ok(Some(frame)) => {
//!             if let Some(message) = reader.process_frame(&frame, Instant::now()) {
//!                 println!("PGN: {}", message.identifier.pgn());
//!             }
//!         }
//!         Ok(None) => {}
//!         Err(e) if CanBus::is_timeout(&e) => {}
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod address_claim;
pub mod bits;
pub mod can_id;
pub mod canbus;
pub mod codec;
pub mod error;
pub mod fast_packet;
pub mod frame;
pub mod iso_name;
pub mod pgns;
pub mod record;
pub mod stream_reader;

// Re-export commonly used types
pub use address_claim::{
    AddressClaimManager, ClaimOutput, ClaimState, DeviceDescriptor, ProductInfo, Transition,
};
pub use can_id::{BROADCAST_ADDRESS, CanId, NULL_ADDRESS};
pub use canbus as CanBus;
pub use error::{DecodeError, EncodeError, ReassemblyError};
pub use fast_packet::SequenceCounter;
pub use frame::CanFrame;
pub use iso_name::IsoName;
pub use record::{FieldValue, Fields, OutgoingMessage, PgnRecord};
pub use stream_reader::{N2kFrame, N2kStreamReader};
