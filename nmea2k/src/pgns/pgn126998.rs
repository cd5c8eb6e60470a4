use super::field::{FieldDefinition, PgnDefinition};

pub const PGN: u32 = 126998;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Configuration Information",
    priority: 6,
    fast_packet: true,
    length: 6,
    fields: &[
        FieldDefinition::string_lau("Installation Description #1"),
        FieldDefinition::string_lau("Installation Description #2"),
        FieldDefinition::string_lau("Manufacturer Information"),
    ],
};
