use crate::{
    data::{FieldValues, RecordFields, RecordKind, value_of},
    error::{DraftConversionSnafu, RosterResult},
    validator::{FieldSpec, FormSchema, parse_number},
};
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

static COURSE_SCHEMA: FormSchema = FormSchema {
    kind: RecordKind::Course,
    fields: &[
        FieldSpec::text("nameOfCourse", "Name of Course"),
        FieldSpec::text("codeOfCourse", "Code of Course"),
        FieldSpec::number("credit", "Credit"),
        FieldSpec::number("hours", "Hours"),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(rename = "nameOfCourse")]
    pub name: String,
    #[serde(rename = "codeOfCourse")]
    pub code: String,
    pub credit: f64,
    pub hours: f64,
}

impl RecordFields for Course {
    const KIND: RecordKind = RecordKind::Course;

    fn schema() -> &'static FormSchema {
        &COURSE_SCHEMA
    }

    fn blank_values() -> FieldValues {
        FieldValues::from([
            ("nameOfCourse", String::new()),
            ("codeOfCourse", String::new()),
            ("credit", "0".to_string()),
            ("hours", "0".to_string()),
        ])
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::from([
            ("nameOfCourse", self.name.clone()),
            ("codeOfCourse", self.code.clone()),
            ("credit", self.credit.to_string()),
            ("hours", self.hours.to_string()),
        ])
    }

    fn from_values(values: &FieldValues) -> RosterResult<Self> {
        let number = |field| {
            parse_number(value_of(values, field)).context(DraftConversionSnafu {
                kind: Self::KIND,
                field,
            })
        };

        Ok(Self {
            name: value_of(values, "nameOfCourse").to_string(),
            code: value_of(values, "codeOfCourse").to_string(),
            credit: number("credit")?,
            hours: number("hours")?,
        })
    }

    fn key_field() -> &'static str {
        "codeOfCourse"
    }

    fn display_key(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}
