use crate::can_id::CanId;

/// A classic CAN frame as seen on an NMEA 2000 bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanFrame {
    pub id: CanId,
    data: [u8; 8],
    len: usize,
}

impl CanFrame {
    /// Build a frame from at most eight payload bytes.
    pub fn new(id: CanId, payload: &[u8]) -> Option<Self> {
        if payload.len() > 8 {
            return None;
        }
        let mut data = [0xFF; 8];
        data[..payload.len()].copy_from_slice(payload);
        Some(Self {
            id,
            data,
            len: payload.len(),
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
