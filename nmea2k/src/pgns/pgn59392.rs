use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::ISO_CONTROL;

pub const PGN: u32 = 59392;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "ISO Acknowledgement",
    priority: 6,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::lookup("Control", 8, ISO_CONTROL),
        FieldDefinition::unsigned("Group Function", 8),
        FieldDefinition::reserved(24),
        FieldDefinition::unsigned("PGN", 24),
    ],
};
