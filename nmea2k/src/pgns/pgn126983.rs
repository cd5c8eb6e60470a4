use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::{
    ALERT_CATEGORY, ALERT_STATE, ALERT_THRESHOLD_STATUS, ALERT_TRIGGER_CONDITION, ALERT_TYPE,
};

pub const PGN: u32 = 126983;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Alert",
    priority: 2,
    fast_packet: true,
    length: 28,
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
        FieldDefinition::unsigned("Temporary Silence Status", 1),
        FieldDefinition::unsigned("Acknowledge Status", 1),
        FieldDefinition::unsigned("Escalation Status", 1),
        FieldDefinition::unsigned("Temporary Silence Support", 1),
        FieldDefinition::unsigned("Acknowledge Support", 1),
        FieldDefinition::unsigned("Escalation Support", 1),
        FieldDefinition::reserved(2),
        FieldDefinition::unsigned("Acknowledge Source Network ID NAME", 64),
        FieldDefinition::lookup("Trigger Condition", 4, ALERT_TRIGGER_CONDITION),
        FieldDefinition::lookup("Threshold Status", 4, ALERT_THRESHOLD_STATUS),
        FieldDefinition::unsigned("Alert Priority", 8),
        FieldDefinition::lookup("Alert State", 8, ALERT_STATE),
    ],
};
