use super::field::{FieldDefinition, PgnDefinition};

pub const PGN: u32 = 59904;

// Requests are three bytes long on the wire.
pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "ISO Request",
    priority: 6,
    fast_packet: false,
    length: 3,
    fields: &[FieldDefinition::unsigned("PGN", 24)],
};
