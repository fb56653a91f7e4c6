//! Typed, ordered field sets backing each wizard step.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Supported data kinds for wizard fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Boolean,
    Text,
    Integer,
    Date,
    Time,
}

impl FieldKind {
    /// Parses raw user input into a value of this kind.
    pub fn parse(self, raw: &str) -> Result<FieldValue, String> {
        let trimmed = raw.trim();
        match self {
            FieldKind::Boolean => match trimmed.to_lowercase().as_str() {
                "y" | "yes" | "true" | "1" => Ok(FieldValue::Boolean(true)),
                "n" | "no" | "false" | "0" => Ok(FieldValue::Boolean(false)),
                _ => Err("Enter yes/no, true/false, or 1/0".into()),
            },
            FieldKind::Text => Ok(FieldValue::Text(trimmed.to_string())),
            FieldKind::Integer => trimmed
                .parse::<u32>()
                .map(FieldValue::Integer)
                .map_err(|_| "Enter a whole number of zero or more (e.g., 3)".into()),
            FieldKind::Date => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(FieldValue::Date)
                .map_err(|_| "Use YYYY-MM-DD format".into()),
            FieldKind::Time => NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
                .map(FieldValue::Time)
                .map_err(|_| "Use 24-hour HH:MM format".into()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FieldKind::Boolean => "yes/no",
            FieldKind::Text => "text",
            FieldKind::Integer => "number",
            FieldKind::Date => "date",
            FieldKind::Time => "time",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Boolean(bool),
    Text(String),
    Integer(u32),
    Date(NaiveDate),
    Time(NaiveTime),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Date(_) => FieldKind::Date,
            FieldValue::Time(_) => FieldKind::Time,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Boolean(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
            FieldValue::Time(value) => write!(f, "{}", value.format(TIME_FORMAT)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    Unknown(String),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

/// A single named input of a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: Option<FieldValue>,
}

impl Field {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            value: None,
        }
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Boolean).with_value(FieldValue::Boolean(false))
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn integer(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Integer)
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub fn time(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Time)
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: FieldValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is_missing(&self) -> bool {
        match &self.value {
            None => true,
            Some(FieldValue::Text(text)) => text.is_empty(),
            Some(_) => false,
        }
    }

    /// Value rendered for display, empty when unset.
    pub fn display_value(&self) -> String {
        self.value
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Ordered collection of fields keyed by name.
///
/// Declaration order is preserved: address concatenation and prompts rely on
/// it. Lookups that miss return type-appropriate zero values instead of
/// failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    pub const EMPTY: FieldSet = FieldSet { fields: Vec::new() };

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field) -> Self {
        self.insert(field);
        self
    }

    /// Appends `field`, replacing any existing field with the same key.
    pub fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Field> {
        let index = self.fields.iter().position(|f| f.key == key)?;
        Some(self.fields.remove(index))
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.get(key).and_then(|f| f.value.as_ref())
    }

    /// Stores a typed value, rejecting unknown keys and kind mismatches.
    pub fn set(&mut self, key: &str, value: FieldValue) -> Result<(), FieldError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or_else(|| FieldError::Unknown(key.to_string()))?;
        if value.kind() != field.kind {
            return Err(FieldError::Invalid {
                field: key.to_string(),
                reason: format!("expected a {} value", field.kind),
            });
        }
        field.value = Some(value);
        Ok(())
    }

    /// Parses `raw` according to the field's kind and stores the result.
    pub fn set_raw(&mut self, key: &str, raw: &str) -> Result<(), FieldError> {
        let kind = self
            .get(key)
            .map(|f| f.kind)
            .ok_or_else(|| FieldError::Unknown(key.to_string()))?;
        let value = kind.parse(raw).map_err(|reason| FieldError::Invalid {
            field: key.to_string(),
            reason,
        })?;
        self.set(key, value)
    }

    pub fn clear(&mut self, key: &str) -> Result<(), FieldError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or_else(|| FieldError::Unknown(key.to_string()))?;
        field.value = None;
        Ok(())
    }

    pub fn bool(&self, key: &str) -> bool {
        matches!(self.value(key), Some(FieldValue::Boolean(true)))
    }

    pub fn integer(&self, key: &str) -> u32 {
        match self.value(key) {
            Some(FieldValue::Integer(value)) => *value,
            _ => 0,
        }
    }

    /// Any set value rendered as text; missing values become `""`.
    pub fn text(&self, key: &str) -> String {
        self.value(key).map(ToString::to_string).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reorders fields to follow `order`; keys absent from `order` move last.
    pub(crate) fn sort_by_order(&mut self, order: &[String]) {
        self.fields.sort_by_key(|f| {
            order
                .iter()
                .position(|key| *key == f.key)
                .unwrap_or(usize::MAX)
        });
    }
}
