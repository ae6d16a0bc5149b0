use crate::data::{RecordId, RecordKind};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::{num::ParseIntError, path::PathBuf};

pub type RosterResult<T> = Result<T, RosterError>;
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failures talking to the backend API.
///
/// Every one of these is caught at the controller boundary and turned into a notification,
/// so none of them should ever reach a rendered page directly.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum GatewayError {
    #[snafu(display("Unable to reach the backend at {url}"))]
    Network { source: reqwest::Error, url: String },
    #[snafu(display("Backend rejected the request ({status}): {body}"))]
    Validation { status: StatusCode, body: String },
    #[snafu(display("Nothing found at {url}"))]
    NotFound { url: String },
    #[snafu(display("Backend failed ({status}): {body}"))]
    Server { status: StatusCode, body: String },
    #[snafu(display("Unable to decode backend response from {url}"))]
    MalformedResponse {
        source: serde_json::Error,
        url: String,
    },
    #[snafu(display("Backend response from {url} had no `{key}` collection"))]
    MissingCollection { key: &'static str, url: String },
}

impl GatewayError {
    #[cfg(test)]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}`", name))]
    ParseEnvNumber {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("`{}` is not a usable backend base URL", value))]
    InvalidApiBase { value: String },
    #[snafu(display("Unable to build HTTP client"))]
    BuildHttpClient { source: reqwest::Error },
    #[snafu(display("Unable to find {} with id {}", kind, id))]
    MissingRecord { kind: RecordKind, id: RecordId },
    #[snafu(display("{} records have no field called `{}`", kind, name))]
    UnknownField { kind: RecordKind, name: String },
    #[snafu(display("Field `{}` could not be read from a validated {} draft", field, kind))]
    DraftConversion {
        kind: RecordKind,
        field: &'static str,
    },
    #[snafu(display("There is no {} deletion waiting for confirmation", kind))]
    NoPendingDelete { kind: RecordKind },
    #[snafu(display("Unknown delete decision {:?}", original))]
    BadDecision { original: String },
    #[snafu(display("Unable to read token file {}", path.display()))]
    ReadTokenFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to write token file {}", path.display()))]
    WriteTokenFile {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to decode token file {}", path.display()))]
    DecodeTokenFile {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[snafu(display("Unable to encode token file"))]
    EncodeTokenFile { source: serde_json::Error },
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input

        let basic_error = |desc: String| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Roster Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseEnvNumber { .. } => ISE,
            Self::InvalidApiBase { .. } | Self::BuildHttpClient { .. } => ISE,
            Self::MissingRecord { .. } => NF,
            Self::UnknownField { .. } => BI,
            Self::DraftConversion { .. } => ISE,
            Self::NoPendingDelete { .. } => BI,
            Self::BadDecision { .. } => BI,
            Self::ReadTokenFile { .. } | Self::WriteTokenFile { .. } => ISE,
            Self::DecodeTokenFile { .. } | Self::EncodeTokenFile { .. } => ISE,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()).into_string())).into_response()
    }
}
