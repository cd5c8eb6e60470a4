use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::WIND_REFERENCE;

pub const PGN: u32 = 130306;

// Speed in m/s, angle in radians.
pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "Wind Data",
    priority: 2,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::unsigned("SID", 8),
        FieldDefinition::scaled("Wind Speed", 16, 0.01),
        FieldDefinition::scaled("Wind Angle", 16, 0.0001),
        FieldDefinition::lookup("Reference", 3, WIND_REFERENCE),
        FieldDefinition::reserved(21),
    ],
};
