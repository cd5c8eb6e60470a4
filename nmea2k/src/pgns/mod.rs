//! Static PGN definition table used by the codec.
pub mod field;
pub mod lookups;

pub mod pgn59392;
pub mod pgn59904;
pub mod pgn60928;
pub mod pgn126464;
pub mod pgn126983;
pub mod pgn126984;
pub mod pgn126985;
pub mod pgn126993;
pub mod pgn126996;
pub mod pgn126998;
pub mod pgn127250;
pub mod pgn127488;
pub mod pgn127501;
pub mod pgn127502;
pub mod pgn128267;
pub mod pgn129025;
pub mod pgn129026;
pub mod pgn129029;
pub mod pgn130306;

pub use field::{FieldDefinition, FieldKind, PgnDefinition};

pub const ISO_ACKNOWLEDGEMENT: u32 = pgn59392::PGN;
pub const ISO_REQUEST: u32 = pgn59904::PGN;
pub const ISO_ADDRESS_CLAIM: u32 = pgn60928::PGN;
pub const PGN_LIST: u32 = pgn126464::PGN;
pub const HEARTBEAT: u32 = pgn126993::PGN;
pub const PRODUCT_INFORMATION: u32 = pgn126996::PGN;

/// Every PGN the codec knows.
pub static DEFINITIONS: &[&PgnDefinition] = &[
    &pgn59392::DEFINITION,
    &pgn59904::DEFINITION,
    &pgn60928::DEFINITION,
    &pgn126464::DEFINITION,
    &pgn126983::DEFINITION,
    &pgn126984::DEFINITION,
    &pgn126985::DEFINITION,
    &pgn126993::DEFINITION,
    &pgn126996::DEFINITION,
    &pgn126998::DEFINITION,
    &pgn127250::DEFINITION,
    &pgn127488::DEFINITION,
    &pgn127501::DEFINITION,
    &pgn127502::DEFINITION,
    &pgn128267::DEFINITION,
    &pgn129025::DEFINITION,
    &pgn129026::DEFINITION,
    &pgn129029::DEFINITION,
    &pgn130306::DEFINITION,
];

/// Look up the layout of a PGN.
pub fn definition(pgn: u32) -> Option<&'static PgnDefinition> {
    DEFINITIONS.iter().copied().find(|definition| definition.pgn == pgn)
}

/// Whether frames of this PGN use the fast-packet transport.
///
/// PGNs without a definition fall back to the ranges reserved for
/// fast-packet messages (126720 and 130816-131071, both proprietary).
pub fn is_fast_packet(pgn: u32) -> bool {
    match definition(pgn) {
        Some(definition) => definition.fast_packet,
        None => pgn == 126720 || (130816..=131071).contains(&pgn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_bits(fields: &[FieldDefinition]) -> Option<usize> {
        fields.iter().try_fold(0usize, |total, field| match field.kind {
            FieldKind::StringLau | FieldKind::Repeat(_) => None,
            _ => Some(total + field.bits as usize),
        })
    }

    #[test]
    fn test_single_frame_definitions_fill_their_length() {
        for definition in DEFINITIONS.iter().filter(|d| !d.fast_packet) {
            let bits = fixed_bits(definition.fields).expect("single frame PGNs are fixed size");
            assert_eq!(
                bits,
                definition.length * 8,
                "PGN {} layout does not match its length",
                definition.pgn
            );
            assert!(definition.length <= 8);
        }
    }

    #[test]
    fn test_fixed_fast_packet_lengths() {
        for pgn in [126983, 126984, 126996, 129029] {
            let definition = definition(pgn).unwrap();
            let fields = match definition.fields.last().map(|f| &f.kind) {
                Some(FieldKind::Repeat(_)) => &definition.fields[..definition.fields.len() - 1],
                _ => definition.fields,
            };
            assert_eq!(fixed_bits(fields), Some(definition.length * 8), "PGN {pgn}");
        }
    }

    #[test]
    fn test_definitions_are_unique() {
        for (index, definition) in DEFINITIONS.iter().enumerate() {
            assert!(
                DEFINITIONS[index + 1..].iter().all(|other| other.pgn != definition.pgn),
                "PGN {} defined twice",
                definition.pgn
            );
        }
    }

    #[test]
    fn test_fast_packet_fallback_ranges() {
        assert!(is_fast_packet(129029));
        assert!(!is_fast_packet(129025));
        assert!(is_fast_packet(130820));
        assert!(!is_fast_packet(65284));
        assert!(is_fast_packet(126720));
    }
}
