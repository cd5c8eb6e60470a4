use super::field::{FieldDefinition, PgnDefinition};

pub const PGN: u32 = 126996;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Product Information",
    priority: 6,
    fast_packet: true,
    length: 134,
    fields: &[
        FieldDefinition::scaled("NMEA 2000 Version", 16, 0.001),
        FieldDefinition::unsigned("Product Code", 16),
        FieldDefinition::string_fix("Model ID", 32),
        FieldDefinition::string_fix("Software Version Code", 32),
        FieldDefinition::string_fix("Model Version", 32),
        FieldDefinition::string_fix("Model Serial Code", 32),
        FieldDefinition::unsigned("Certification Level", 8),
        FieldDefinition::unsigned("Load Equivalency", 8),
    ],
};
