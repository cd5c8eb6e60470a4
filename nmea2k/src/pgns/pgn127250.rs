use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::DIRECTION_REFERENCE;

pub const PGN: u32 = 127250;

// Angles in radians.
pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Vessel Heading",
    priority: 2,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::unsigned("SID", 8),
        FieldDefinition::scaled("Heading", 16, 0.0001),
        FieldDefinition::signed("Deviation", 16, 0.0001),
        FieldDefinition::signed("Variation", 16, 0.0001),
        FieldDefinition::lookup("Reference", 2, DIRECTION_REFERENCE),
        FieldDefinition::reserved(6),
    ],
};
