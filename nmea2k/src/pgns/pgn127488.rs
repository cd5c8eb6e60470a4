use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::ENGINE_INSTANCE;

pub const PGN: u32 = 127488;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Engine Parameters, Rapid Update",
    priority: 2,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::lookup("Instance", 8, ENGINE_INSTANCE),
        FieldDefinition::scaled("Speed", 16, 0.25),
        FieldDefinition::scaled("Boost Pressure", 16, 100.0),
        FieldDefinition::signed("Tilt/Trim", 8, 1.0),
        FieldDefinition::reserved(16),
    ],
};
