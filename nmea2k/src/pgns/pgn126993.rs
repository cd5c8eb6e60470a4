use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::{CONTROLLER_STATE, EQUIPMENT_STATUS};

pub const PGN: u32 = 126993;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Heartbeat",
    priority: 7,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::scaled("Data transmit offset", 16, 0.01),
        FieldDefinition::unsigned("Sequence Counter", 8),
        FieldDefinition::lookup("Controller 1 State", 2, CONTROLLER_STATE),
        FieldDefinition::lookup("Controller 2 State", 2, CONTROLLER_STATE),
        FieldDefinition::lookup("Equipment Status", 2, EQUIPMENT_STATUS),
        FieldDefinition::reserved(34),
    ],
};
