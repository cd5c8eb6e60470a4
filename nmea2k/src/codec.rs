//! Table-driven PGN codec.
//!
//! Decoding walks the field list of a [`PgnDefinition`] with a [`BitReader`];
//! encoding walks it with a [`BitWriter`] and then frames the payload as a
//! single frame or a fast-packet sequence.
use chrono::{Duration as ChronoDuration, NaiveDate, NaiveTime, Timelike};

use crate::bits::{BitReader, BitWriter};
use crate::can_id::CanId;
use crate::error::{BitReaderError, DecodeError, EncodeError};
use crate::fast_packet::{FastPacketBuilder, SequenceCounter};
use crate::frame::CanFrame;
use crate::pgns::{self, FieldDefinition, FieldKind};
use crate::record::{FieldValue, Fields, PgnRecord};

const TIME_UNITS_PER_SECOND: u64 = 10_000;
const SECONDS_PER_DAY: u64 = 86_400;

/// Decode a single received frame.
pub fn decode(frame: &CanFrame) -> Result<PgnRecord, DecodeError> {
    decode_payload(frame.id, frame.data())
}

/// Decode a complete payload, either a single frame or a reassembled fast packet.
pub fn decode_payload(id: CanId, payload: &[u8]) -> Result<PgnRecord, DecodeError> {
    let pgn = id.pgn();
    let definition = pgns::definition(pgn).ok_or_else(|| DecodeError::UnknownPgn {
        pgn,
        payload: payload.to_vec(),
    })?;

    let mut reader = BitReader::new(payload);
    let fields = decode_fields(definition.fields, &mut reader).map_err(|failure| match failure {
        FieldFailure::Truncated(field) => DecodeError::Truncated {
            pgn,
            field,
            len: payload.len(),
            payload: payload.to_vec(),
        },
        FieldFailure::Invalid(field) => DecodeError::InvalidField {
            pgn,
            field,
            payload: payload.to_vec(),
        },
    })?;

    Ok(PgnRecord {
        pgn,
        priority: id.priority(),
        source: id.source_address(),
        destination: id.destination(),
        fields,
    })
}

enum FieldFailure {
    Truncated(&'static str),
    Invalid(&'static str),
}

fn decode_fields(
    definitions: &'static [FieldDefinition],
    reader: &mut BitReader,
) -> Result<Fields, FieldFailure> {
    let mut fields = Fields::new();
    for definition in definitions {
        if let Some(value) = decode_field(definition, reader)? {
            fields.insert(definition.name.to_string(), value);
        }
    }
    Ok(fields)
}

fn decode_field(
    definition: &'static FieldDefinition,
    reader: &mut BitReader,
) -> Result<Option<FieldValue>, FieldFailure> {
    let name = definition.name;
    let truncated = |error: BitReaderError| match error {
        BitReaderError::OutOfBounds { .. } => FieldFailure::Truncated(name),
        _ => FieldFailure::Invalid(name),
    };

    match &definition.kind {
        FieldKind::Reserved => {
            // Senders often cut trailing reserved bits.
            let skip = (definition.bits as usize).min(reader.remaining_bits());
            reader.advance(skip).map_err(truncated)?;
            Ok(None)
        }
        FieldKind::Unsigned { resolution } => {
            let raw = reader.read_u64(definition.bits).map_err(truncated)?;
            if definition.is_not_available(raw) {
                return Ok(None);
            }
            Ok(Some(scaled_value(raw, *resolution)))
        }
        FieldKind::Signed { resolution } => {
            let raw = reader.read_u64(definition.bits).map_err(truncated)?;
            if definition.is_not_available(raw) {
                return Ok(None);
            }
            let value = sign_extend(raw, definition.bits);
            Ok(Some(match value {
                v if *resolution == 1.0 => FieldValue::Signed(v),
                v => FieldValue::Float(round_to_resolution(v as f64 * resolution, *resolution)),
            }))
        }
        FieldKind::Lookup(_) => {
            let raw = reader.read_u64(definition.bits).map_err(truncated)?;
            if definition.is_not_available(raw) {
                return Ok(None);
            }
            Ok(Some(match definition.lookup_name(raw) {
                Some(label) => FieldValue::Lookup(label.to_string()),
                None => FieldValue::Unsigned(raw),
            }))
        }
        FieldKind::StringFix => {
            let bytes = reader
                .read_slice(definition.bits as usize / 8)
                .map_err(truncated)?;
            Ok(non_empty_text(trim_padding(bytes)))
        }
        FieldKind::StringLau => {
            let len = reader.read_u64(8).map_err(truncated)? as usize;
            let encoding = reader.read_u64(8).map_err(truncated)?;
            if len < 2 {
                return Ok(None);
            }
            let body = reader.read_slice(len - 2).map_err(truncated)?;
            let text = match encoding {
                0 => decode_utf16(body),
                _ => trim_padding(body),
            };
            Ok(non_empty_text(text))
        }
        FieldKind::Date => {
            let days = reader.read_u64(definition.bits).map_err(truncated)?;
            if definition.is_not_available(days) {
                return Ok(None);
            }
            let date = NaiveDate::from_ymd_opt(1970, 1, 1)
                .and_then(|epoch| epoch.checked_add_signed(ChronoDuration::days(days as i64)))
                .ok_or(FieldFailure::Invalid(name))?;
            Ok(Some(FieldValue::Text(date.format("%Y.%m.%d").to_string())))
        }
        FieldKind::Time => {
            let units = reader.read_u64(definition.bits).map_err(truncated)?;
            if definition.is_not_available(units) {
                return Ok(None);
            }
            let seconds = units / TIME_UNITS_PER_SECOND;
            let nanos = (units % TIME_UNITS_PER_SECOND) * 100_000;
            if seconds >= SECONDS_PER_DAY {
                return Err(FieldFailure::Invalid(name));
            }
            let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds as u32, nanos as u32)
                .ok_or(FieldFailure::Invalid(name))?;
            Ok(Some(FieldValue::Text(time.format("%H:%M:%S%.f").to_string())))
        }
        FieldKind::Repeat(group) => {
            let group_bits: usize = group.iter().map(|field| field.bits as usize).sum();
            let mut items = Vec::new();
            while group_bits > 0 && reader.remaining_bits() >= group_bits {
                let item = decode_fields(group, reader)?;
                if !item.is_empty() {
                    items.push(item);
                }
            }
            Ok(Some(FieldValue::List(items)))
        }
    }
}

fn scaled_value(raw: u64, resolution: f64) -> FieldValue {
    if resolution == 1.0 {
        FieldValue::Unsigned(raw)
    } else {
        FieldValue::Float(round_to_resolution(raw as f64 * resolution, resolution))
    }
}

fn sign_extend(raw: u64, bits: u16) -> i64 {
    if bits >= 64 {
        return raw as i64;
    }
    let shift = 64 - bits as u32;
    ((raw << shift) as i64) >> shift
}

/// Number of decimals needed to represent multiples of `resolution`.
fn resolution_decimals(resolution: f64) -> Option<i32> {
    (0..=16).find(|&decimals| {
        let scaled = resolution * 10f64.powi(decimals);
        (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0)
    })
}

/// Strip the floating point noise introduced by scaling.
fn round_to_resolution(value: f64, resolution: f64) -> f64 {
    match resolution_decimals(resolution) {
        Some(decimals) => {
            let factor = 10f64.powi(decimals);
            (value * factor).round() / factor
        }
        None => value,
    }
}

fn trim_padding(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|b| !matches!(b, 0xFF | 0x00 | b'@' | b' '))
        .map_or(0, |index| index + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

fn decode_utf16(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
        .trim_end_matches(['\0', '\u{FFFF}', ' '])
        .to_string()
}

fn non_empty_text(text: String) -> Option<FieldValue> {
    (!text.is_empty()).then_some(FieldValue::Text(text))
}

/// Encode a record into the frames to put on the bus.
///
/// The record's `source` is used as the frame source address.
pub fn encode(
    record: &PgnRecord,
    sequence: &mut SequenceCounter,
) -> Result<Vec<CanFrame>, EncodeError> {
    let payload = encode_payload(record)?;
    frame_payload(
        record.pgn,
        record.priority,
        record.source,
        record.destination,
        &payload,
        sequence,
    )
}

/// Serialize the fields of a record without framing them.
pub fn encode_payload(record: &PgnRecord) -> Result<Vec<u8>, EncodeError> {
    let definition = pgns::definition(record.pgn).ok_or(EncodeError::UnknownPgn(record.pgn))?;
    let mut writer = BitWriter::new();
    encode_fields(definition.fields, &record.fields, &mut writer)?;
    let mut payload = writer.into_bytes();
    if !definition.fast_packet && payload.len() < definition.length {
        payload.resize(definition.length, 0xFF);
    }
    Ok(payload)
}

/// Frame an already serialized payload.
pub fn encode_raw(
    pgn: u32,
    priority: u8,
    source: u8,
    destination: u8,
    payload: &[u8],
    sequence: &mut SequenceCounter,
) -> Result<Vec<CanFrame>, EncodeError> {
    frame_payload(pgn, priority, source, destination, payload, sequence)
}

fn frame_payload(
    pgn: u32,
    priority: u8,
    source: u8,
    destination: u8,
    payload: &[u8],
    sequence: &mut SequenceCounter,
) -> Result<Vec<CanFrame>, EncodeError> {
    let id = CanId::new(priority, pgn, source, destination)?;
    if pgns::is_fast_packet(pgn) {
        let builder = FastPacketBuilder::new(id, payload, sequence.next_id())?;
        return Ok(builder.build().collect());
    }
    let too_long = || EncodeError::PayloadTooLong {
        pgn,
        len: payload.len(),
        max: 8,
    };
    let frame = CanFrame::new(id, payload).ok_or_else(too_long)?;
    Ok(vec![frame])
}

fn encode_fields(
    definitions: &[FieldDefinition],
    fields: &Fields,
    writer: &mut BitWriter,
) -> Result<(), EncodeError> {
    for definition in definitions {
        encode_field(definition, fields.get(definition.name), writer)?;
    }
    Ok(())
}

fn encode_field(
    definition: &FieldDefinition,
    value: Option<&FieldValue>,
    writer: &mut BitWriter,
) -> Result<(), EncodeError> {
    let name = definition.name;
    let bits = definition.bits;
    let invalid = |reason: &str| EncodeError::InvalidField {
        field: name.to_string(),
        reason: reason.to_string(),
    };
    let out_of_range = |value: f64| EncodeError::OutOfRange {
        field: name.to_string(),
        value,
    };

    match (&definition.kind, value) {
        (FieldKind::Reserved, _) => writer.write_ones(bits as usize)?,
        (FieldKind::Repeat(_), None) => {}
        (FieldKind::StringLau, None) => writer.write_slice(&[2, 1])?,
        (FieldKind::StringFix, None) => writer.write_ones(bits as usize)?,
        (_, None) => writer.write_u64(definition.not_available_raw(), bits)?,

        (FieldKind::Unsigned { resolution }, Some(value)) => {
            let raw = match (value, *resolution == 1.0) {
                (FieldValue::Unsigned(raw), true) => *raw,
                _ => {
                    let number = value.as_f64().ok_or_else(|| invalid("expected a number"))?;
                    let raw = (number / resolution).round();
                    if !(0.0..=definition.max_raw() as f64).contains(&raw) {
                        return Err(out_of_range(number));
                    }
                    raw as u64
                }
            };
            if raw > definition.max_raw() || definition.is_not_available(raw) {
                return Err(out_of_range(raw as f64));
            }
            writer.write_u64(raw, bits)?;
        }
        (FieldKind::Signed { resolution }, Some(value)) => {
            let number = value.as_f64().ok_or_else(|| invalid("expected a number"))?;
            let scaled = (number / resolution).round();
            let max = ((1u64 << (bits - 1)) - 1) as f64;
            let min = -(max + 1.0);
            if !(min..=max).contains(&scaled) {
                return Err(out_of_range(number));
            }
            let raw = scaled as i64 as u64 & definition.max_raw();
            if definition.is_not_available(raw) {
                return Err(out_of_range(number));
            }
            writer.write_u64(raw, bits)?;
        }
        (FieldKind::Lookup(_), Some(value)) => {
            let raw = match value {
                FieldValue::Unsigned(raw) => *raw,
                FieldValue::Lookup(label) | FieldValue::Text(label) => definition
                    .lookup_value(label)
                    .or_else(|| label.trim().parse().ok())
                    .ok_or_else(|| EncodeError::UnknownLookup {
                        field: name.to_string(),
                        value: label.clone(),
                    })?,
                _ => return Err(invalid("expected a lookup name or a positive integer")),
            };
            if raw > definition.max_raw() || definition.is_not_available(raw) {
                return Err(out_of_range(raw as f64));
            }
            writer.write_u64(raw, bits)?;
        }
        (FieldKind::StringFix, Some(value)) => {
            let text = value.as_str().ok_or_else(|| invalid("expected a string"))?;
            let mut bytes = vec![0xFF; bits as usize / 8];
            let len = text.len().min(bytes.len());
            bytes[..len].copy_from_slice(&text.as_bytes()[..len]);
            writer.write_slice(&bytes)?;
        }
        (FieldKind::StringLau, Some(value)) => {
            let text = value.as_str().ok_or_else(|| invalid("expected a string"))?;
            if text.len() > 253 {
                return Err(invalid("string longer than 253 bytes"));
            }
            writer.write_slice(&[text.len() as u8 + 2, 1])?;
            writer.write_slice(text.as_bytes())?;
        }
        (FieldKind::Date, Some(value)) => {
            let days = match value {
                FieldValue::Unsigned(days) => *days,
                FieldValue::Text(text) => parse_date(text).ok_or_else(|| invalid("expected YYYY.MM.DD"))?,
                _ => return Err(invalid("expected YYYY.MM.DD")),
            };
            if days >= definition.max_raw() {
                return Err(out_of_range(days as f64));
            }
            writer.write_u64(days, bits)?;
        }
        (FieldKind::Time, Some(value)) => {
            let units = match value {
                FieldValue::Text(text) => parse_time(text).ok_or_else(|| invalid("expected HH:MM:SS"))?,
                other => {
                    let seconds = other.as_f64().ok_or_else(|| invalid("expected HH:MM:SS"))?;
                    if !(0.0..SECONDS_PER_DAY as f64).contains(&seconds) {
                        return Err(out_of_range(seconds));
                    }
                    (seconds * TIME_UNITS_PER_SECOND as f64).round() as u64
                }
            };
            writer.write_u64(units, bits)?;
        }
        (FieldKind::Repeat(group), Some(FieldValue::List(items))) => {
            for item in items {
                encode_fields(group, item, writer)?;
            }
        }
        (FieldKind::Repeat(_), Some(_)) => return Err(invalid("expected a list")),
    }
    Ok(())
}

fn parse_date(text: &str) -> Option<u64> {
    let date = NaiveDate::parse_from_str(text, "%Y.%m.%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    u64::try_from((date - epoch).num_days()).ok()
}

fn parse_time(text: &str) -> Option<u64> {
    let time = NaiveTime::parse_from_str(text, "%H:%M:%S%.f").ok()?;
    let seconds = time.num_seconds_from_midnight() as u64;
    let units = (time.nanosecond() as u64 / 100_000).min(TIME_UNITS_PER_SECOND - 1);
    Some(seconds * TIME_UNITS_PER_SECOND + units)
}
