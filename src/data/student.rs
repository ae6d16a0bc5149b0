use crate::{
    data::{FieldValues, RecordFields, RecordKind, value_of},
    error::{DraftConversionSnafu, RosterResult},
    validator::{FieldSpec, FormSchema, parse_date},
};
use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use snafu::OptionExt;

static STUDENT_SCHEMA: FormSchema = FormSchema {
    kind: RecordKind::Student,
    fields: &[
        FieldSpec::text("name", "Name"),
        FieldSpec::text("studentId", "Student ID"),
        FieldSpec::date("dob", "Date of Birth"),
        FieldSpec::text("address", "Address"),
        FieldSpec::text("phoneNumber", "Phone Number"),
        FieldSpec::text("prefix", "Prefix"),
        FieldSpec::text("typeOfSubject", "Type of Subject"),
        FieldSpec::text("FieldOfStudy", "Field of Study"),
        FieldSpec::text("FieldOfWork", "Field of Work"),
        FieldSpec::text("classRoom", "Class Room"),
        FieldSpec::text("year", "Year"),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
    #[serde(deserialize_with = "lenient_date")]
    pub dob: Date,
    pub address: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub prefix: String,
    #[serde(rename = "typeOfSubject")]
    pub subject_type: String,
    #[serde(rename = "FieldOfStudy")]
    pub field_of_study: String,
    #[serde(rename = "FieldOfWork")]
    pub field_of_work: String,
    #[serde(rename = "classRoom")]
    pub class_room: String,
    pub year: String,
}

impl RecordFields for Student {
    const KIND: RecordKind = RecordKind::Student;

    fn schema() -> &'static FormSchema {
        &STUDENT_SCHEMA
    }

    fn to_values(&self) -> FieldValues {
        FieldValues::from([
            ("name", self.name.clone()),
            ("studentId", self.student_id.clone()),
            ("dob", self.dob.to_string()),
            ("address", self.address.clone()),
            ("phoneNumber", self.phone_number.clone()),
            ("prefix", self.prefix.clone()),
            ("typeOfSubject", self.subject_type.clone()),
            ("FieldOfStudy", self.field_of_study.clone()),
            ("FieldOfWork", self.field_of_work.clone()),
            ("classRoom", self.class_room.clone()),
            ("year", self.year.clone()),
        ])
    }

    fn from_values(values: &FieldValues) -> RosterResult<Self> {
        let text = |name| value_of(values, name).to_string();
        let dob = parse_date(value_of(values, "dob")).context(DraftConversionSnafu {
            kind: Self::KIND,
            field: "dob",
        })?;

        Ok(Self {
            name: text("name"),
            student_id: text("studentId"),
            dob,
            address: text("address"),
            phone_number: text("phoneNumber"),
            prefix: text("prefix"),
            subject_type: text("typeOfSubject"),
            field_of_study: text("FieldOfStudy"),
            field_of_work: text("FieldOfWork"),
            class_room: text("classRoom"),
            year: text("year"),
        })
    }

    fn key_field() -> &'static str {
        "studentId"
    }

    fn display_key(&self) -> String {
        format!("{} ({})", self.name, self.student_id)
    }
}

//the backend may hand dates back as full timestamps, we only care about the day
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .or_else(|| raw.get(..10).and_then(parse_date))
        .ok_or_else(|| D::Error::custom(format!("invalid date {raw:?}")))
}
