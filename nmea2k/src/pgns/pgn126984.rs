use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::{ALERT_CATEGORY, ALERT_RESPONSE_COMMAND, ALERT_TYPE};

pub const PGN: u32 = 126984;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Alert Response",
    priority: 2,
    fast_packet: true,
    length: 25,
    fields: &[
        FieldDefinition::lookup("Alert Type", 4, ALERT_TYPE),
        FieldDefinition::lookup("Alert Category", 4, ALERT_CATEGORY),
        FieldDefinition::unsigned("Alert System", 8),
        FieldDefinition::unsigned("Alert Sub-System", 8),
        FieldDefinition::unsigned("Alert ID", 16),
        FieldDefinition::unsigned("Data Source Network ID NAME", 64),
        FieldDefinition::unsigned("Data Source Instance", 8),
        FieldDefinition::unsigned("Data Source Index-Source", 8),
        FieldDefinition::unsigned("Alert Occurrence Number", 8),
        FieldDefinition::unsigned("Acknowledge Source Network ID NAME", 64),
        FieldDefinition::lookup("Response Command", 2, ALERT_RESPONSE_COMMAND),
        FieldDefinition::reserved(6),
    ],
};
