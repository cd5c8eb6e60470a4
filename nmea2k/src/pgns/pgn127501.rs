use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::OFF_ON_ERROR;

pub const PGN: u32 = 127501;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Binary Switch Bank Status",
    priority: 3,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::unsigned("Instance", 8),
        FieldDefinition::lookup("Indicator1", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator2", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator3", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator4", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator5", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator6", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator7", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator8", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator9", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator10", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator11", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator12", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator13", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator14", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator15", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator16", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator17", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator18", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator19", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator20", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator21", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator22", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator23", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator24", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator25", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator26", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator27", 2, OFF_ON_ERROR),
        FieldDefinition::lookup("Indicator28", 2, OFF_ON_ERROR),
    ],
};
