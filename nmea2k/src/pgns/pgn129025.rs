use super::field::{FieldDefinition, PgnDefinition};

pub const PGN: u32 = 129025;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Position, Rapid Update",
    priority: 2,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::signed("Latitude", 32, 1e-7),
        FieldDefinition::signed("Longitude", 32, 1e-7),
    ],
};
