/// Static description of one PGN: how its payload is laid out and sent.
#[derive(Debug)]
pub struct PgnDefinition {
    pub pgn: u32,
    pub description: &'static str,
    /// Priority used when the caller does not specify one.
    pub priority: u8,
    pub fast_packet: bool,
    /// Single-frame payloads are padded with 0xFF up to this many bytes.
    pub length: usize,
    pub fields: &'static [FieldDefinition],
}

#[derive(Debug)]
pub struct FieldDefinition {
    pub name: &'static str,
    /// Width in bits; ignored for variable-length kinds.
    pub bits: u16,
    pub kind: FieldKind,
    /// Every raw value is meaningful; no pattern is reserved for "not available".
    pub full_range: bool,
}

#[derive(Debug)]
pub enum FieldKind {
    Unsigned { resolution: f64 },
    Signed { resolution: f64 },
    Lookup(&'static [(u64, &'static str)]),
    Reserved,
    /// Fixed-size string padded with 0xFF, 0x00, '@' or spaces.
    StringFix,
    /// Length + encoding prefixed string (STRING_LAU).
    StringLau,
    /// Days since 1970-01-01.
    Date,
    /// Units of 0.0001 s since midnight.
    Time,
    /// Group of fixed-size fields repeated until the end of the payload.
    Repeat(&'static [FieldDefinition]),
}

impl FieldDefinition {
    pub const fn unsigned(name: &'static str, bits: u16) -> Self {
        Self {
            name,
            bits,
            kind: FieldKind::Unsigned { resolution: 1.0 },
            full_range: false,
        }
    }

    pub const fn scaled(name: &'static str, bits: u16, resolution: f64) -> Self {
        Self {
            name,
            bits,
            kind: FieldKind::Unsigned { resolution },
            full_range: false,
        }
    }

    pub const fn signed(name: &'static str, bits: u16, resolution: f64) -> Self {
        Self {
            name,
            bits,
            kind: FieldKind::Signed { resolution },
            full_range: false,
        }
    }

    pub const fn lookup(
        name: &'static str,
        bits: u16,
        table: &'static [(u64, &'static str)],
    ) -> Self {
        Self {
            name,
            bits,
            kind: FieldKind::Lookup(table),
            full_range: false,
        }
    }

    pub const fn reserved(bits: u16) -> Self {
        Self {
            name: "Reserved",
            bits,
            kind: FieldKind::Reserved,
            full_range: false,
        }
    }

    pub const fn string_fix(name: &'static str, bytes: u16) -> Self {
        Self {
            name,
            bits: bytes * 8,
            kind: FieldKind::StringFix,
            full_range: false,
        }
    }

    pub const fn string_lau(name: &'static str) -> Self {
        Self {
            name,
            bits: 0,
            kind: FieldKind::StringLau,
            full_range: false,
        }
    }

    pub const fn date(name: &'static str) -> Self {
        Self {
            name,
            bits: 16,
            kind: FieldKind::Date,
            full_range: false,
        }
    }

    pub const fn time(name: &'static str) -> Self {
        Self {
            name,
            bits: 32,
            kind: FieldKind::Time,
            full_range: false,
        }
    }

    pub const fn repeat(name: &'static str, fields: &'static [FieldDefinition]) -> Self {
        Self {
            name,
            bits: 0,
            kind: FieldKind::Repeat(fields),
            full_range: false,
        }
    }

    /// Mark a numeric or lookup field whose all-ones value is valid data.
    pub const fn full_range(self) -> Self {
        Self {
            full_range: true,
            ..self
        }
    }

    /// Largest raw value the field can hold.
    pub fn max_raw(&self) -> u64 {
        if self.bits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.bits) - 1
        }
    }

    /// Raw pattern meaning "data not available" for numeric and lookup fields.
    ///
    /// Single-bit fields have no such pattern and default to zero.
    pub fn not_available_raw(&self) -> u64 {
        match self.kind {
            _ if self.bits <= 1 => 0,
            FieldKind::Signed { .. } => (1u64 << (self.bits - 1)) - 1,
            _ => self.max_raw(),
        }
    }

    /// Whether `raw` means "data not available" for this field.
    pub fn is_not_available(&self, raw: u64) -> bool {
        !self.full_range && self.bits > 1 && raw == self.not_available_raw()
    }

    pub fn lookup_name(&self, raw: u64) -> Option<&'static str> {
        match self.kind {
            FieldKind::Lookup(table) => table
                .iter()
                .find(|(value, _)| *value == raw)
                .map(|(_, name)| *name),
            _ => None,
        }
    }

    pub fn lookup_value(&self, name: &str) -> Option<u64> {
        match self.kind {
            FieldKind::Lookup(table) => table
                .iter()
                .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
                .map(|(value, _)| *value),
            _ => None,
        }
    }
}
