use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::{GNS_INTEGRITY, GNS_METHOD, GNS_TYPE};

pub const PGN: u32 = 129029;

pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "GNSS Position Data",
    priority: 3,
    fast_packet: true,
    length: 43,
    fields: &[
        FieldDefinition::unsigned("SID", 8),
        FieldDefinition::date("Date"),
        FieldDefinition::time("Time"),
        FieldDefinition::signed("Latitude", 64, 1e-16),
        FieldDefinition::signed("Longitude", 64, 1e-16),
        FieldDefinition::signed("Altitude", 64, 1e-6),
        FieldDefinition::lookup("GNSS type", 4, GNS_TYPE),
        FieldDefinition::lookup("Method", 4, GNS_METHOD),
        FieldDefinition::lookup("Integrity", 2, GNS_INTEGRITY),
        FieldDefinition::reserved(6),
        FieldDefinition::unsigned("Number of SVs", 8),
        FieldDefinition::signed("HDOP", 16, 0.01),
        FieldDefinition::signed("PDOP", 16, 0.01),
        FieldDefinition::signed("Geoidal Separation", 32, 0.01),
        FieldDefinition::unsigned("Reference Stations", 8),
        FieldDefinition::repeat(
            "list",
            &[
                FieldDefinition::unsigned("Reference Station Type", 4),
                FieldDefinition::unsigned("Reference Station ID", 12),
                FieldDefinition::scaled("Age of DGNSS Corrections", 16, 0.01),
            ],
        ),
    ],
};
