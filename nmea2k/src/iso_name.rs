//! 64-bit ISO 11783 NAME carried by PGN 60928.
//!
//! ```text
//! bits  0-20  unique number
//! bits 21-31  manufacturer code
//! bits 32-34  device instance lower
//! bits 35-39  device instance upper
//! bits 40-47  device function
//! bit  48     spare
//! bits 49-55  device class
//! bits 56-59  system instance
//! bits 60-62  industry group
//! bit  63     arbitrary address capable
//! ```
//!
//! On the bus the NAME is sent little-endian. During address arbitration the
//! numerically lower NAME wins.
use std::fmt;

use crate::pgns::lookups::{INDUSTRY_CODE, YES_NO};
use crate::record::{FieldValue, PgnRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoName(u64);

impl IsoName {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }

    pub const fn builder() -> IsoNameBuilder {
        IsoNameBuilder { raw: 0 }
    }

    /// Read the NAME out of an address-claim payload.
    pub fn from_claim_payload(payload: &[u8]) -> Option<Self> {
        let bytes: [u8; 8] = payload.get(..8)?.try_into().ok()?;
        Some(Self(u64::from_le_bytes(bytes)))
    }

    pub const fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    pub const fn unique_number(&self) -> u32 {
        (self.0 & 0x1F_FFFF) as u32
    }

    pub const fn manufacturer_code(&self) -> u16 {
        ((self.0 >> 21) & 0x7FF) as u16
    }

    pub const fn device_instance_lower(&self) -> u8 {
        ((self.0 >> 32) & 0x07) as u8
    }

    pub const fn device_instance_upper(&self) -> u8 {
        ((self.0 >> 35) & 0x1F) as u8
    }

    pub const fn device_function(&self) -> u8 {
        ((self.0 >> 40) & 0xFF) as u8
    }

    pub const fn device_class(&self) -> u8 {
        ((self.0 >> 49) & 0x7F) as u8
    }

    pub const fn system_instance(&self) -> u8 {
        ((self.0 >> 56) & 0x0F) as u8
    }

    pub const fn industry_group(&self) -> u8 {
        ((self.0 >> 60) & 0x07) as u8
    }

    /// Bit 63: the node may move to another address when it loses a claim.
    pub const fn is_arbitrary_address_capable(&self) -> bool {
        (self.0 >> 63) & 0x01 != 0
    }

    /// An address-claim record announcing this NAME from `source`.
    pub fn claim_record(&self, source: u8) -> PgnRecord {
        let mut record = PgnRecord::new(crate::pgns::ISO_ADDRESS_CLAIM)
            .with_field("Unique Number", FieldValue::Unsigned(self.unique_number() as u64))
            .with_field(
                "Manufacturer Code",
                FieldValue::Unsigned(self.manufacturer_code() as u64),
            )
            .with_field(
                "Device Instance Lower",
                FieldValue::Unsigned(self.device_instance_lower() as u64),
            )
            .with_field(
                "Device Instance Upper",
                FieldValue::Unsigned(self.device_instance_upper() as u64),
            )
            .with_field(
                "Device Function",
                FieldValue::Unsigned(self.device_function() as u64),
            )
            .with_field("Spare", FieldValue::Unsigned((self.0 >> 48) & 0x01))
            .with_field("Device Class", FieldValue::Unsigned(self.device_class() as u64))
            .with_field(
                "System Instance",
                FieldValue::Unsigned(self.system_instance() as u64),
            )
            .with_field(
                "Industry Group",
                labelled(INDUSTRY_CODE, self.industry_group() as u64),
            )
            .with_field(
                "Arbitrary address capable",
                labelled(YES_NO, self.is_arbitrary_address_capable() as u64),
            );
        record.source = source;
        record
    }
}

/// The lookup label for `raw`, as the codec decodes it.
fn labelled(table: &[(u64, &'static str)], raw: u64) -> FieldValue {
    table
        .iter()
        .find(|(value, _)| *value == raw)
        .map_or(FieldValue::Unsigned(raw), |(_, label)| {
            FieldValue::Lookup(label.to_string())
        })
}

impl From<u64> for IsoName {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for IsoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:016X} (unique {}, mfg {}, function {}, class {}, aac {})",
            self.0,
            self.unique_number(),
            self.manufacturer_code(),
            self.device_function(),
            self.device_class(),
            self.is_arbitrary_address_capable()
        )
    }
}

/// Fluent builder for [`IsoName`]. Values wider than their field are masked.
#[derive(Debug, Clone, Copy)]
pub struct IsoNameBuilder {
    raw: u64,
}

impl IsoNameBuilder {
    const fn set(mut self, shift: u32, mask: u64, value: u64) -> Self {
        self.raw = (self.raw & !(mask << shift)) | ((value & mask) << shift);
        self
    }

    pub const fn unique_number(self, value: u32) -> Self {
        self.set(0, 0x1F_FFFF, value as u64)
    }

    pub const fn manufacturer_code(self, value: u16) -> Self {
        self.set(21, 0x7FF, value as u64)
    }

    /// Full 8-bit instance, split into its lower 3 and upper 5 bits.
    pub const fn device_instance(self, value: u8) -> Self {
        self.set(32, 0xFF, value as u64)
    }

    pub const fn device_function(self, value: u8) -> Self {
        self.set(40, 0xFF, value as u64)
    }

    pub const fn device_class(self, value: u8) -> Self {
        self.set(49, 0x7F, value as u64)
    }

    pub const fn system_instance(self, value: u8) -> Self {
        self.set(56, 0x0F, value as u64)
    }

    pub const fn industry_group(self, value: u8) -> Self {
        self.set(60, 0x07, value as u64)
    }

    pub const fn arbitrary_address_capable(self, value: bool) -> Self {
        self.set(63, 0x01, value as u64)
    }

    pub const fn build(self) -> IsoName {
        IsoName(self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::fast_packet::SequenceCounter;

    fn sample() -> IsoName {
        IsoName::builder()
            .unique_number(123_456)
            .manufacturer_code(2046)
            .device_instance(0b1010_1101)
            .device_function(130)
            .device_class(25)
            .system_instance(3)
            .industry_group(4)
            .arbitrary_address_capable(true)
            .build()
    }

    #[test]
    fn test_builder_fields() {
        let name = sample();
        assert_eq!(name.unique_number(), 123_456);
        assert_eq!(name.manufacturer_code(), 2046);
        assert_eq!(name.device_instance_lower(), 0b101);
        assert_eq!(name.device_instance_upper(), 0b10101);
        assert_eq!(name.device_function(), 130);
        assert_eq!(name.device_class(), 25);
        assert_eq!(name.system_instance(), 3);
        assert_eq!(name.industry_group(), 4);
        assert!(name.is_arbitrary_address_capable());
    }

    #[test]
    fn test_builder_masks_wide_values() {
        let name = IsoName::builder().unique_number(u32::MAX).build();
        assert_eq!(name.raw(), 0x1F_FFFF);
    }

    #[test]
    fn test_lower_name_orders_first() {
        let low = IsoName::from_raw(0x10);
        let high = IsoName::from_raw(0x20);
        assert!(low < high);
    }

    #[test]
    fn test_claim_record_encodes_raw_name() {
        let name = sample();
        let frames = codec::encode(&name.claim_record(66), &mut SequenceCounter::new()).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].id.as_raw(), 0x18EE_FF42);
        assert_eq!(frames[0].data(), &name.to_le_bytes());
        assert_eq!(IsoName::from_claim_payload(frames[0].data()), Some(name));
    }

    #[test]
    fn test_claim_record_survives_decode() {
        let name = IsoName::builder()
            .unique_number(0x1F_FFFF)
            .manufacturer_code(0x7FF)
            .device_instance(0xFF)
            .device_function(255)
            .device_class(0x7F)
            .system_instance(15)
            .industry_group(7)
            .arbitrary_address_capable(true)
            .build();
        let record = name.claim_record(66);
        let frames = codec::encode(&record, &mut SequenceCounter::new()).unwrap();
        let decoded = codec::decode(&frames[0]).unwrap();
        assert_eq!(decoded.field("Device Instance Lower"), Some(&FieldValue::Unsigned(7)));
        assert_eq!(decoded.field("System Instance"), Some(&FieldValue::Unsigned(15)));
        assert_eq!(decoded.field("Industry Group"), Some(&FieldValue::Unsigned(7)));
        assert_eq!(decoded, record);

        let record = sample().claim_record(12);
        assert_eq!(
            record.field("Industry Group"),
            Some(&FieldValue::Lookup("Marine".into()))
        );
        assert_eq!(
            record.field("Arbitrary address capable"),
            Some(&FieldValue::Lookup("Yes".into()))
        );
        let frames = codec::encode(&record, &mut SequenceCounter::new()).unwrap();
        assert_eq!(codec::decode(&frames[0]).unwrap(), record);
    }

    #[test]
    fn test_claim_payload_too_short() {
        assert_eq!(IsoName::from_claim_payload(&[1, 2, 3]), None);
    }
}
