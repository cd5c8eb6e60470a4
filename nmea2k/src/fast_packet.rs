//! NMEA 2000 fast-packet transport.
//!
//! A fast-packet message carries up to 223 bytes across up to 32 frames.
//! Every frame starts with a header byte (3-bit sequence id, 5-bit frame
//! index); frame 0 also carries the total payload length and six data
//! bytes, the following frames seven data bytes each.
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

use crate::can_id::CanId;
use crate::error::{EncodeError, ReassemblyError};
use crate::frame::CanFrame;

pub const MAX_FAST_PACKET_PAYLOAD: usize = 223;

const FIRST_FRAME_DATA: usize = 6;
const NEXT_FRAME_DATA: usize = 7;

/// Number of frames needed to carry `total_len` bytes.
pub fn expected_frames(total_len: usize) -> usize {
    if total_len <= FIRST_FRAME_DATA {
        1
    } else {
        1 + (total_len - FIRST_FRAME_DATA).div_ceil(NEXT_FRAME_DATA)
    }
}

/// Rolling 3-bit sequence identifier, one per transmitting node.
#[derive(Debug, Default)]
pub struct SequenceCounter(u8);

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u8 {
        let current = self.0;
        self.0 = (self.0 + 1) & 0x07;
        current
    }
}

/// Splits one payload into the frames of a fast-packet message.
#[derive(Debug)]
pub struct FastPacketBuilder<'a> {
    id: CanId,
    payload: &'a [u8],
    sequence_id: u8,
}

impl<'a> FastPacketBuilder<'a> {
    pub fn new(id: CanId, payload: &'a [u8], sequence_id: u8) -> Result<Self, EncodeError> {
        if payload.len() > MAX_FAST_PACKET_PAYLOAD {
            return Err(EncodeError::PayloadTooLong {
                pgn: id.pgn(),
                len: payload.len(),
                max: MAX_FAST_PACKET_PAYLOAD,
            });
        }
        Ok(Self {
            id,
            payload,
            sequence_id: sequence_id & 0x07,
        })
    }

    pub fn build(self) -> FrameIterator<'a> {
        FrameIterator {
            builder: self,
            frame_index: 0,
            bytes_sent: 0,
        }
    }
}

/// Yields the frames lazily; every frame is padded to 8 bytes with 0xFF.
pub struct FrameIterator<'a> {
    builder: FastPacketBuilder<'a>,
    frame_index: u8,
    bytes_sent: usize,
}

impl Iterator for FrameIterator<'_> {
    type Item = CanFrame;

    fn next(&mut self) -> Option<Self::Item> {
        let payload = self.builder.payload;
        if self.frame_index > 0 && self.bytes_sent >= payload.len() {
            return None;
        }

        let mut data = [0xFF; 8];
        data[0] = (self.builder.sequence_id << 5) | (self.frame_index & 0x1F);
        if self.frame_index == 0 {
            data[1] = payload.len() as u8;
            let count = FIRST_FRAME_DATA.min(payload.len());
            data[2..2 + count].copy_from_slice(&payload[..count]);
            self.bytes_sent = count;
        } else {
            let count = NEXT_FRAME_DATA.min(payload.len() - self.bytes_sent);
            data[1..1 + count].copy_from_slice(&payload[self.bytes_sent..self.bytes_sent + count]);
            self.bytes_sent += count;
        }
        self.frame_index += 1;

        CanFrame::new(self.builder.id, &data)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// The frame was not usable and was dropped.
    Ignored,
    /// The frame was buffered; more are needed.
    FragmentConsumed,
    /// The last missing frame arrived; holds the reassembled payload.
    MessageComplete(Vec<u8>),
}

type SessionKey = (u8, u32);

#[derive(Debug)]
struct Session {
    sequence_id: u8,
    /// Known once frame 0 has arrived.
    total_len: Option<usize>,
    chunks: BTreeMap<u8, Vec<u8>>,
    started: Instant,
}

impl Session {
    fn new(sequence_id: u8, now: Instant) -> Self {
        Self {
            sequence_id,
            total_len: None,
            chunks: BTreeMap::new(),
            started: now,
        }
    }

    fn expected(&self) -> usize {
        self.total_len.map_or(0, expected_frames)
    }

    fn complete_payload(&self) -> Option<Vec<u8>> {
        let total_len = self.total_len?;
        let expected = expected_frames(total_len);
        if (0..expected).any(|index| !self.chunks.contains_key(&(index as u8))) {
            return None;
        }
        let mut payload: Vec<u8> = self.chunks.values().flatten().copied().collect();
        payload.truncate(total_len);
        Some(payload)
    }
}

/// Rebuilds fast-packet payloads per (source, PGN).
///
/// Frames may arrive in any order. Sessions are dropped when they time out,
/// when a new sequence id replaces them, or when the session cap forces the
/// oldest one out. Every dropped session is recorded as a
/// [`ReassemblyError`] and can be collected with [`Self::take_failures`].
#[derive(Debug)]
pub struct FastPacketAssembler {
    sessions: HashMap<SessionKey, Session>,
    timeout: Duration,
    max_sessions: usize,
    failures: Vec<ReassemblyError>,
}

impl FastPacketAssembler {
    pub fn new(timeout: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: HashMap::new(),
            timeout,
            max_sessions: max_sessions.max(1),
            failures: Vec::new(),
        }
    }

    /// Feed one frame of a fast-packet PGN.
    pub fn process_frame(
        &mut self,
        source_address: u8,
        pgn: u32,
        data: &[u8],
        now: Instant,
    ) -> ProcessResult {
        let Some(&header) = data.first() else {
            return ProcessResult::Ignored;
        };
        let sequence_id = header >> 5;
        let frame_index = header & 0x1F;
        let key = (source_address, pgn);

        if let Some(session) = self.sessions.get(&key) {
            if now.duration_since(session.started) > self.timeout {
                self.drop_session(key, |session| ReassemblyError::Timeout {
                    pgn,
                    source_address,
                    received: session.chunks.len(),
                    expected: session.expected(),
                });
            } else if session.sequence_id != sequence_id {
                self.drop_session(key, |_| ReassemblyError::Superseded {
                    pgn,
                    source_address,
                });
            }
        }

        if !self.sessions.contains_key(&key) {
            self.make_room(now);
            self.sessions.insert(key, Session::new(sequence_id, now));
        }
        let Some(session) = self.sessions.get_mut(&key) else {
            return ProcessResult::Ignored;
        };

        if frame_index == 0 {
            let Some(&total_len) = data.get(1) else {
                self.sessions.remove(&key);
                return ProcessResult::Ignored;
            };
            let total_len = total_len as usize;
            if total_len > MAX_FAST_PACKET_PAYLOAD {
                self.sessions.remove(&key);
                return ProcessResult::Ignored;
            }
            session.total_len = Some(total_len);
            session.chunks.insert(0, data[2..].to_vec());
        } else {
            session.chunks.insert(frame_index, data[1..].to_vec());
        }

        let expected = session.expected();
        if session.total_len.is_some() {
            if let Some(&index) = session.chunks.keys().find(|&&i| i as usize >= expected) {
                self.drop_session(key, |_| ReassemblyError::InvalidIndex {
                    pgn,
                    source_address,
                    index,
                });
                return ProcessResult::Ignored;
            }
        }

        match session.complete_payload() {
            Some(payload) => {
                self.sessions.remove(&key);
                ProcessResult::MessageComplete(payload)
            }
            None => ProcessResult::FragmentConsumed,
        }
    }

    /// Drop every session older than the timeout.
    pub fn expire(&mut self, now: Instant) {
        let stale: Vec<SessionKey> = self
            .sessions
            .iter()
            .filter(|(_, session)| now.duration_since(session.started) > self.timeout)
            .map(|(key, _)| *key)
            .collect();
        for (source_address, pgn) in stale {
            self.drop_session((source_address, pgn), |session| ReassemblyError::Timeout {
                pgn,
                source_address,
                received: session.chunks.len(),
                expected: session.expected(),
            });
        }
    }

    pub fn take_failures(&mut self) -> Vec<ReassemblyError> {
        std::mem::take(&mut self.failures)
    }

    /// Number of sessions still waiting for frames.
    pub fn in_flight(&self) -> usize {
        self.sessions.len()
    }

    fn make_room(&mut self, now: Instant) {
        self.expire(now);
        while self.sessions.len() >= self.max_sessions {
            let Some(oldest) = self
                .sessions
                .iter()
                .min_by_key(|(_, session)| session.started)
                .map(|(key, _)| *key)
            else {
                break;
            };
            self.drop_session(oldest, |_| ReassemblyError::Evicted {
                pgn: oldest.1,
                source_address: oldest.0,
            });
        }
    }

    fn drop_session(&mut self, key: SessionKey, reason: impl FnOnce(&Session) -> ReassemblyError) {
        if let Some(session) = self.sessions.remove(&key) {
            self.failures.push(reason(&session));
        }
    }
}
