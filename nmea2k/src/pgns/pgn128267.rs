use super::field::{FieldDefinition, PgnDefinition};

pub const PGN: u32 = 128267;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Water Depth",
    priority: 3,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::unsigned("SID", 8),
        FieldDefinition::scaled("Depth", 32, 0.01),
        FieldDefinition::signed("Offset", 16, 0.001),
        FieldDefinition::scaled("Range", 8, 10.0),
    ],
};
