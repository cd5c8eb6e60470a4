use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::DIRECTION_REFERENCE;

pub const PGN: u32 = 129026;

// COG in radians, SOG in m/s.
pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "COG & SOG, Rapid Update",
    priority: 2,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::unsigned("SID", 8),
        FieldDefinition::lookup("COG Reference", 2, DIRECTION_REFERENCE),
        FieldDefinition::reserved(6),
        FieldDefinition::scaled("COG", 16, 0.0001),
        FieldDefinition::scaled("SOG", 16, 0.01),
        FieldDefinition::reserved(16),
    ],
};
