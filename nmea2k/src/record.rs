//! Decoded PGN messages and their JSON representation.
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::can_id::BROADCAST_ADDRESS;
use crate::error::EncodeError;
use crate::pgns::{self, FieldDefinition, FieldKind};

pub type Fields = BTreeMap<String, FieldValue>;

/// A typed field value.
///
/// Serializes to the bare JSON value (number, string or array of objects).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Lookup(String),
    Text(String),
    List(Vec<Fields>),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Unsigned(value) => Some(*value as f64),
            FieldValue::Signed(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            FieldValue::Text(text) | FieldValue::Lookup(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Unsigned(value) => Some(*value),
            FieldValue::Signed(value) => u64::try_from(*value).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Lookup(text) | FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A PGN with its header and decoded fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PgnRecord {
    pub pgn: u32,
    pub priority: u8,
    pub source: u8,
    pub destination: u8,
    pub fields: Fields,
}

impl PgnRecord {
    /// An empty broadcast record using the PGN's default priority.
    pub fn new(pgn: u32) -> Self {
        let priority = pgns::definition(pgn).map_or(6, |d| d.priority);
        Self {
            pgn,
            priority,
            source: 0,
            destination: BROADCAST_ADDRESS,
            fields: Fields::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn to_destination(mut self, destination: u8) -> Self {
        self.destination = destination;
        self
    }

    pub fn description(&self) -> Option<&'static str> {
        pgns::definition(self.pgn).map(|d| d.description)
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// A message handed to `sendPGN`, ready to be encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum OutgoingMessage {
    Record(PgnRecord),
    /// Raw payload for PGNs the codec has no definition for.
    Raw {
        pgn: u32,
        priority: u8,
        destination: u8,
        payload: Vec<u8>,
    },
}

impl OutgoingMessage {
    pub fn pgn(&self) -> u32 {
        match self {
            OutgoingMessage::Record(record) => record.pgn,
            OutgoingMessage::Raw { pgn, .. } => *pgn,
        }
    }

    /// Parse a canboat-style JSON message.
    ///
    /// Accepted shapes:
    /// - `{"pgn", "prio"?, "dst"?, "fields": {...}}`
    /// - `{"pgn", "prio"?, "dst"?, "<field name>": ...}` (flat)
    /// - `{"pgn", "prio"?, "dst"?, "data": [bytes]}` raw payload
    pub fn from_json(message: &Value) -> Result<Self, EncodeError> {
        let object = message.as_object().ok_or(EncodeError::NotAnObject)?;
        let pgn = object
            .get("pgn")
            .and_then(json_u64)
            .and_then(|pgn| u32::try_from(pgn).ok())
            .ok_or(EncodeError::MissingPgn)?;
        let definition = pgns::definition(pgn);

        let priority = match object.get("prio").and_then(json_u64) {
            Some(prio) if prio <= 7 => prio as u8,
            Some(prio) => {
                return Err(EncodeError::OutOfRange {
                    field: "prio".to_string(),
                    value: prio as f64,
                });
            }
            None => definition.map_or(6, |d| d.priority),
        };
        let destination = match object.get("dst").and_then(json_u64) {
            Some(dst) if dst <= 255 => dst as u8,
            Some(dst) => {
                return Err(EncodeError::OutOfRange {
                    field: "dst".to_string(),
                    value: dst as f64,
                });
            }
            None => BROADCAST_ADDRESS,
        };

        let fields_object = object.get("fields").and_then(Value::as_object);
        match (definition, fields_object, object.get("data")) {
            (Some(definition), Some(fields), _) => Ok(OutgoingMessage::Record(PgnRecord {
                pgn,
                priority,
                source: 0,
                destination,
                fields: fields_from_json(definition.fields, fields)?,
            })),
            (_, None, Some(data)) => Ok(OutgoingMessage::Raw {
                pgn,
                priority,
                destination,
                payload: bytes_from_json("data", data)?,
            }),
            (Some(definition), None, None) => Ok(OutgoingMessage::Record(PgnRecord {
                pgn,
                priority,
                source: 0,
                destination,
                fields: fields_from_json(definition.fields, object)?,
            })),
            (None, _, _) => Err(EncodeError::UnknownPgn(pgn)),
        }
    }
}

/// Convert JSON values into typed fields, guided by the definition.
/// Unknown keys are ignored and `null` counts as absent.
pub fn fields_from_json(
    definitions: &[FieldDefinition],
    object: &Map<String, Value>,
) -> Result<Fields, EncodeError> {
    let mut fields = Fields::new();
    for definition in definitions {
        if matches!(definition.kind, FieldKind::Reserved) {
            continue;
        }
        let Some(value) = object.get(definition.name).filter(|v| !v.is_null()) else {
            continue;
        };
        fields.insert(
            definition.name.to_string(),
            field_from_json(definition, value)?,
        );
    }
    Ok(fields)
}

fn field_from_json(definition: &FieldDefinition, value: &Value) -> Result<FieldValue, EncodeError> {
    let invalid = |reason: &str| EncodeError::InvalidField {
        field: definition.name.to_string(),
        reason: reason.to_string(),
    };

    match &definition.kind {
        FieldKind::Unsigned { .. } | FieldKind::Signed { .. } => match value {
            Value::Number(number) => Ok(number_value(number)),
            Value::String(text) => text
                .trim()
                .parse::<serde_json::Number>()
                .map(|number| number_value(&number))
                .map_err(|_| invalid("expected a number")),
            _ => Err(invalid("expected a number")),
        },
        FieldKind::Lookup(_) => match value {
            Value::String(text) => Ok(FieldValue::Lookup(text.clone())),
            Value::Number(number) => number
                .as_u64()
                .map(FieldValue::Unsigned)
                .ok_or_else(|| invalid("expected a lookup name or a positive integer")),
            _ => Err(invalid("expected a lookup name or a positive integer")),
        },
        FieldKind::StringFix | FieldKind::StringLau => match value {
            Value::String(text) => Ok(FieldValue::Text(text.clone())),
            Value::Number(number) => Ok(FieldValue::Text(number.to_string())),
            _ => Err(invalid("expected a string")),
        },
        FieldKind::Date | FieldKind::Time => match value {
            Value::String(text) => Ok(FieldValue::Text(text.clone())),
            Value::Number(number) => Ok(number_value(number)),
            _ => Err(invalid("expected a string or a number")),
        },
        FieldKind::Repeat(group) => {
            let items = value.as_array().ok_or_else(|| invalid("expected an array"))?;
            items
                .iter()
                .map(|item| {
                    item.as_object()
                        .ok_or_else(|| invalid("expected an array of objects"))
                        .and_then(|object| fields_from_json(group, object))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(FieldValue::List)
        }
        FieldKind::Reserved => Err(invalid("reserved field")),
    }
}

fn number_value(number: &serde_json::Number) -> FieldValue {
    if let Some(value) = number.as_u64() {
        FieldValue::Unsigned(value)
    } else if let Some(value) = number.as_i64() {
        FieldValue::Signed(value)
    } else {
        FieldValue::Float(number.as_f64().unwrap_or(f64::NAN))
    }
}

fn json_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts `[1, 2, 3]` or the Node.js buffer shape `{"type": "Buffer", "data": [1, 2, 3]}`.
fn bytes_from_json(field: &str, value: &Value) -> Result<Vec<u8>, EncodeError> {
    let invalid = || EncodeError::InvalidField {
        field: field.to_string(),
        reason: "expected an array of bytes".to_string(),
    };
    let array = match value {
        Value::Array(array) => array,
        Value::Object(object) => object
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(invalid)?,
        _ => return Err(invalid()),
    };
    array
        .iter()
        .map(|byte| {
            byte.as_u64()
                .and_then(|b| u8::try_from(b).ok())
                .ok_or_else(invalid)
        })
        .collect()
}
