use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::OFF_ON;

pub const PGN: u32 = 127502;

// Switches left out of a command are sent as "not available" (0b11)
// so the receiving bank leaves them untouched.
pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Switch Bank Control",
    priority: 3,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::unsigned("Instance", 8),
        FieldDefinition::lookup("Switch1", 2, OFF_ON),
        FieldDefinition::lookup("Switch2", 2, OFF_ON),
        FieldDefinition::lookup("Switch3", 2, OFF_ON),
        FieldDefinition::lookup("Switch4", 2, OFF_ON),
        FieldDefinition::lookup("Switch5", 2, OFF_ON),
        FieldDefinition::lookup("Switch6", 2, OFF_ON),
        FieldDefinition::lookup("Switch7", 2, OFF_ON),
        FieldDefinition::lookup("Switch8", 2, OFF_ON),
        FieldDefinition::lookup("Switch9", 2, OFF_ON),
        FieldDefinition::lookup("Switch10", 2, OFF_ON),
        FieldDefinition::lookup("Switch11", 2, OFF_ON),
        FieldDefinition::lookup("Switch12", 2, OFF_ON),
        FieldDefinition::lookup("Switch13", 2, OFF_ON),
        FieldDefinition::lookup("Switch14", 2, OFF_ON),
        FieldDefinition::lookup("Switch15", 2, OFF_ON),
        FieldDefinition::lookup("Switch16", 2, OFF_ON),
        FieldDefinition::lookup("Switch17", 2, OFF_ON),
        FieldDefinition::lookup("Switch18", 2, OFF_ON),
        FieldDefinition::lookup("Switch19", 2, OFF_ON),
        FieldDefinition::lookup("Switch20", 2, OFF_ON),
        FieldDefinition::lookup("Switch21", 2, OFF_ON),
        FieldDefinition::lookup("Switch22", 2, OFF_ON),
        FieldDefinition::lookup("Switch23", 2, OFF_ON),
        FieldDefinition::lookup("Switch24", 2, OFF_ON),
        FieldDefinition::lookup("Switch25", 2, OFF_ON),
        FieldDefinition::lookup("Switch26", 2, OFF_ON),
        FieldDefinition::lookup("Switch27", 2, OFF_ON),
        FieldDefinition::lookup("Switch28", 2, OFF_ON),
    ],
};
