//! 29-bit NMEA 2000 identifiers (SAE J1939 layout).
//!
//! ```text
//! bits 26-28  priority
//! bit  25     reserved
//! bit  24     data page
//! bits 16-23  PDU format (PF)
//! bits  8-15  PDU specific (PS): destination when PF < 240, group extension otherwise
//! bits  0-7   source address
//! ```
use crate::error::CanIdBuildError;

/// Broadcast / global destination address.
pub const BROADCAST_ADDRESS: u8 = 255;
/// Source address used by a node that could not claim an address.
pub const NULL_ADDRESS: u8 = 254;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanId(pub u32);

impl CanId {
    /// Compose an identifier. For PDU1 PGNs the destination is stored in the
    /// PS byte; for PDU2 PGNs it is implicit and ignored.
    pub fn new(
        priority: u8,
        pgn: u32,
        source_address: u8,
        destination: u8,
    ) -> Result<Self, CanIdBuildError> {
        if pgn > 0x3_FFFF {
            return Err(CanIdBuildError::PgnTooLarge(pgn));
        }
        let pf = (pgn >> 8) & 0xFF;
        let ps = if is_pdu1(pgn) {
            if pgn & 0xFF != 0 {
                return Err(CanIdBuildError::PsFocusMessageMustBeNull(pgn));
            }
            destination as u32
        } else {
            pgn & 0xFF
        };
        let dp_r = (pgn >> 16) & 0x03;

        Ok(CanId(
            (((priority & 0x07) as u32) << 26)
                | (dp_r << 24)
                | (pf << 16)
                | (ps << 8)
                | source_address as u32,
        ))
    }

    /// Wrap a raw identifier read from the bus.
    pub fn from_raw(raw: u32) -> Result<Self, CanIdBuildError> {
        if raw > 0x1FFF_FFFF {
            return Err(CanIdBuildError::NotExtended(raw));
        }
        Ok(CanId(raw))
    }

    pub fn as_raw(&self) -> u32 {
        self.0
    }

    pub fn priority(&self) -> u8 {
        ((self.0 >> 26) & 0x07) as u8
    }

    /// PGN with the destination stripped for PDU1 messages.
    pub fn pgn(&self) -> u32 {
        let dp_r = (self.0 >> 24) & 0x03;
        let pf = (self.0 >> 16) & 0xFF;
        let ps = (self.0 >> 8) & 0xFF;
        if pf < 240 {
            (dp_r << 16) | (pf << 8)
        } else {
            (dp_r << 16) | (pf << 8) | ps
        }
    }

    /// Destination address, [`BROADCAST_ADDRESS`] for PDU2 messages.
    pub fn destination(&self) -> u8 {
        let pf = (self.0 >> 16) & 0xFF;
        if pf < 240 {
            ((self.0 >> 8) & 0xFF) as u8
        } else {
            BROADCAST_ADDRESS
        }
    }

    pub fn source_address(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// PDU1 PGNs are addressable: their PF byte is below 240.
pub fn is_pdu1(pgn: u32) -> bool {
    ((pgn >> 8) & 0xFF) < 240
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdu2_roundtrip() {
        let id = CanId::new(2, 129026, 3, BROADCAST_ADDRESS).unwrap();
        assert_eq!(id.as_raw(), 0x09F8_0203);
        assert_eq!(id.priority(), 2);
        assert_eq!(id.pgn(), 129026);
        assert_eq!(id.source_address(), 3);
        assert_eq!(id.destination(), BROADCAST_ADDRESS);
    }

    #[test]
    fn test_pdu2_ignores_destination() {
        let id = CanId::new(3, 129029, 43, 12).unwrap();
        assert_eq!(id.destination(), BROADCAST_ADDRESS);
        assert_eq!(id.pgn(), 129029);
    }

    #[test]
    fn test_pdu1_carries_destination() {
        let id = CanId::new(6, 59904, 66, 35).unwrap();
        assert_eq!(id.pgn(), 59904);
        assert_eq!(id.destination(), 35);
        assert_eq!(id.source_address(), 66);
        assert_eq!(id.priority(), 6);
    }

    #[test]
    fn test_address_claim_identifier() {
        // 60928 is PDU1 with the global destination.
        let id = CanId::new(6, 60928, 66, BROADCAST_ADDRESS).unwrap();
        assert_eq!(id.as_raw(), 0x18EE_FF42);
    }

    #[test]
    fn test_data_page_pdu1() {
        // 126208 lives on data page 1 and is addressable.
        let id = CanId::new(3, 126208, 10, 67).unwrap();
        assert_eq!(id.pgn(), 126208);
        assert_eq!(id.destination(), 67);
    }

    #[test]
    fn test_known_raw_identifiers() {
        // Identifiers captured from a real bus.
        let gnss = CanId::from_raw(234358019).unwrap();
        assert_eq!(gnss.pgn(), 129029);
        assert_eq!(gnss.source_address(), 3);
        assert_eq!(gnss.priority(), 3);

        let engine = CanId::from_raw(166854714).unwrap();
        assert_eq!(engine.pgn(), 127488);
        assert_eq!(engine.source_address(), 58);
        assert_eq!(engine.priority(), 2);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            CanId::new(6, 59905, 1, 2),
            Err(CanIdBuildError::PsFocusMessageMustBeNull(59905))
        );
        assert_eq!(
            CanId::new(6, 0x4_0000, 1, 2),
            Err(CanIdBuildError::PgnTooLarge(0x4_0000))
        );
        assert_eq!(
            CanId::from_raw(0x2000_0000),
            Err(CanIdBuildError::NotExtended(0x2000_0000))
        );
    }
}
