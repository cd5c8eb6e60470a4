use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::PGN_LIST_FUNCTION;

pub const PGN: u32 = 126464;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "PGN List (Transmit and Receive)",
    priority: 6,
    fast_packet: true,
    length: 1,
    fields: &[
        FieldDefinition::lookup("Function Code", 8, PGN_LIST_FUNCTION),
        FieldDefinition::repeat("list", &[FieldDefinition::unsigned("PGN", 24)]),
    ],
};
