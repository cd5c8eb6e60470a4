use super::field::{FieldDefinition, PgnDefinition};
use super::lookups::{INDUSTRY_CODE, YES_NO};

pub const PGN: u32 = 60928;

/// The payload is the 64-bit ISO NAME, see [`crate::iso_name::IsoName`].
/// Every sub-field value is a legal NAME component.
pub static DEFINITION: PgnDefinition = PgnDefinition {
    pgn: PGN,
    description: "ISO Address Claim",
    priority: 6,
    fast_packet: false,
    length: 8,
    fields: &[
        FieldDefinition::unsigned("Unique Number", 21).full_range(),
        FieldDefinition::unsigned("Manufacturer Code", 11).full_range(),
        FieldDefinition::unsigned("Device Instance Lower", 3).full_range(),
        FieldDefinition::unsigned("Device Instance Upper", 5).full_range(),
        FieldDefinition::unsigned("Device Function", 8).full_range(),
        FieldDefinition::unsigned("Spare", 1),
        FieldDefinition::unsigned("Device Class", 7).full_range(),
        FieldDefinition::unsigned("System Instance", 4).full_range(),
        FieldDefinition::lookup("Industry Group", 3, INDUSTRY_CODE).full_range(),
        FieldDefinition::lookup("Arbitrary address capable", 1, YES_NO),
    ],
};
