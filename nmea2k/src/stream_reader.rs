use std::time::{Duration, Instant};

use tracing::trace;

use crate::can_id::CanId;
use crate::codec;
use crate::error::{DecodeError, ReassemblyError};
use crate::fast_packet::{FastPacketAssembler, ProcessResult};
use crate::frame::CanFrame;
use crate::pgns;
use crate::record::PgnRecord;

/// NMEA2000 Stream Reader
///
/// Stateful reader turning received CAN frames into complete messages.
/// It handles:
/// - Single-frame messages (decoded immediately)
/// - Fast packet messages (assembled from multiple frames, possibly out of order)
///
/// # Usage
///
/// ```no_run
/// use std::time::{Duration, Instant};
/// use nmea2k::stream_reader::N2kStreamReader;
/// # let frame: nmea2k::CanFrame = todo!();
///
/// let mut reader = N2kStreamReader::new(Duration::from_millis(750), 64);
///
/// if let Some(complete) = reader.process_frame(&frame, Instant::now()) {
///     println!("PGN: {}", complete.identifier.pgn());
/// }
/// ```
pub struct N2kStreamReader {
    assembler: FastPacketAssembler,
}

/// A complete NMEA2000 message with metadata
#[derive(Debug)]
pub struct N2kFrame {
    pub identifier: CanId,
    /// Decoded record, or why decoding failed. The raw payload is always in `data`.
    pub message: Result<PgnRecord, DecodeError>,
    pub is_fast_packet: bool,
    /// Complete assembled payload
    pub data: Vec<u8>,
}

impl N2kStreamReader {
    /// Create a new NMEA2000 stream reader
    ///
    /// # Arguments
    /// * `timeout` - How long a fast-packet session may stay incomplete
    /// * `max_sessions` - Cap on concurrent fast-packet sessions
    pub fn new(timeout: Duration, max_sessions: usize) -> Self {
        Self {
            assembler: FastPacketAssembler::new(timeout, max_sessions),
        }
    }

    /// Process a CAN frame and return a complete message if available
    ///
    /// # Returns
    /// `Some(N2kFrame)` if a complete message is ready, `None` otherwise
    pub fn process_frame(&mut self, frame: &CanFrame, now: Instant) -> Option<N2kFrame> {
        let identifier = frame.id;
        let pgn = identifier.pgn();

        if !pgns::is_fast_packet(pgn) {
            return Some(N2kFrame {
                identifier,
                message: codec::decode(frame),
                is_fast_packet: false,
                data: frame.data().to_vec(),
            });
        }

        match self
            .assembler
            .process_frame(identifier.source_address(), pgn, frame.data(), now)
        {
            ProcessResult::MessageComplete(data) => Some(N2kFrame {
                identifier,
                message: codec::decode_payload(identifier, &data),
                is_fast_packet: true,
                data,
            }),
            ProcessResult::FragmentConsumed => None,
            ProcessResult::Ignored => {
                trace!(
                    "Ignored fast packet frame for PGN {} from {}",
                    pgn,
                    identifier.source_address()
                );
                None
            }
        }
    }

    /// Drop fast-packet sessions that have been waiting too long.
    pub fn expire(&mut self, now: Instant) {
        self.assembler.expire(now);
    }

    /// Sessions abandoned since the last call.
    pub fn drain_failures(&mut self) -> Vec<ReassemblyError> {
        self.assembler.take_failures()
    }
}

impl Default for N2kStreamReader {
    fn default() -> Self {
        Self::new(Duration::from_millis(750), 64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::can_id::BROADCAST_ADDRESS;
    use crate::fast_packet::FastPacketBuilder;
    use crate::record::FieldValue;

    #[test]
    fn test_single_frame_decoded_immediately() {
        let mut reader = N2kStreamReader::default();
        let id = CanId::new(2, 129026, 3, BROADCAST_ADDRESS).unwrap();
        let frame = CanFrame::new(id, &[0xD0, 0xFC, 0x4F, 0x7E, 0x07, 0x00, 0xFF, 0xFF]).unwrap();
        let message = reader.process_frame(&frame, Instant::now()).unwrap();
        assert!(!message.is_fast_packet);
        assert_eq!(message.data.len(), 8);
        let record = message.message.unwrap();
        assert_eq!(record.field("SID"), Some(&FieldValue::Unsigned(208)));
    }

    #[test]
    fn test_unknown_single_frame_passes_through() {
        let mut reader = N2kStreamReader::default();
        let id = CanId::new(6, 65284, 9, BROADCAST_ADDRESS).unwrap();
        let frame = CanFrame::new(id, &[1, 2, 3]).unwrap();
        let message = reader.process_frame(&frame, Instant::now()).unwrap();
        assert_eq!(message.data, vec![1, 2, 3]);
        assert!(matches!(message.message, Err(DecodeError::UnknownPgn { pgn: 65284, .. })));
    }

    #[test]
    fn test_fast_packet_assembled() {
        let mut reader = N2kStreamReader::default();
        let id = CanId::new(7, 126996, 12, BROADCAST_ADDRESS).unwrap();
        let payload = [0xFF; 134];
        let frames: Vec<CanFrame> = FastPacketBuilder::new(id, &payload, 3)
            .unwrap()
            .build()
            .collect();
        let now = Instant::now();
        let (last, rest) = frames.split_last().unwrap();
        for frame in rest {
            assert!(reader.process_frame(frame, now).is_none());
        }
        let message = reader.process_frame(last, now).unwrap();
        assert!(message.is_fast_packet);
        assert_eq!(message.data.len(), 134);
        assert_eq!(message.identifier.source_address(), 12);
        assert!(message.message.unwrap().fields.is_empty());
    }

    #[test]
    fn test_dropped_frame_reported_after_timeout() {
        let mut reader = N2kStreamReader::new(Duration::from_millis(100), 8);
        let id = CanId::new(7, 126996, 12, BROADCAST_ADDRESS).unwrap();
        let frames: Vec<CanFrame> = FastPacketBuilder::new(id, &[0x20; 134], 0)
            .unwrap()
            .build()
            .collect();
        let start = Instant::now();
        for frame in frames.iter().skip(1) {
            assert!(reader.process_frame(frame, start).is_none());
        }
        reader.expire(start + Duration::from_millis(200));
        let failures = reader.drain_failures();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures[0],
            ReassemblyError::Timeout {
                pgn: 126996,
                source_address: 12,
                ..
            }
        ));
        assert!(reader.drain_failures().is_empty());
    }
}
