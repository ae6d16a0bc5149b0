use crate::data::{FieldValues, RecordKind, value_of};
use jiff::civil::Date;
use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldRule {
    RequiredString,
    RequiredDate,
    RequiredNumber,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Date,
    Number,
}

impl InputKind {
    /// The `type` attribute of the rendered `<input>`.
    pub const fn html_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Number => "number",
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Text,
            rule: FieldRule::RequiredString,
        }
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Date,
            rule: FieldRule::RequiredDate,
        }
    }

    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            input: InputKind::Number,
            rule: FieldRule::RequiredNumber,
        }
    }

    pub fn check(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Some(format!("{} is required", self.label));
        }

        match self.rule {
            FieldRule::RequiredString => None,
            FieldRule::RequiredDate => parse_date(trimmed)
                .is_none()
                .then(|| format!("{} must be a valid date", self.label)),
            FieldRule::RequiredNumber => parse_number(trimmed)
                .is_none()
                .then(|| format!("{} must be a number", self.label)),
        }
    }
}

/// Per-field error messages. Empty means the draft may be submitted.
pub type ValidationErrors = BTreeMap<&'static str, String>;

#[derive(Debug)]
pub struct FormSchema {
    pub kind: RecordKind,
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn validate(&self, values: &FieldValues) -> ValidationErrors {
        let errors: ValidationErrors = self
            .fields
            .iter()
            .filter_map(|spec| {
                spec.check(value_of(values, spec.name))
                    .map(|message| (spec.name, message))
            })
            .collect();

        if !errors.is_empty() {
            trace!(kind = %self.kind, fields = ?errors.keys().collect::<Vec<_>>(), "Draft failed validation");
        }
        errors
    }

    ///`None` for unknown fields as well as valid ones
    pub fn validate_field(&self, name: &str, value: &str) -> Option<String> {
        self.field(name).and_then(|spec| spec.check(value))
    }
}

pub fn parse_date(value: &str) -> Option<Date> {
    value.trim().parse().ok()
}

pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}
