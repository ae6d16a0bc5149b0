use crate::error::{BadEnvVarSnafu, InvalidApiBaseSnafu, ParseEnvNumberSnafu, RosterResult};
use dotenvy::var;
use snafu::{ResultExt, ensure};
use std::{path::PathBuf, sync::Arc, time::Duration};

pub const DEFAULT_NOTIFICATION_MS: u64 = 3_000;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_config: Arc<ApiConfig>,
    pub server_ip: String,
    pub token_path: PathBuf,
    pub notification_timeout: Duration,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            api_config: Arc::new(ApiConfig::new()?),
            server_ip: var("ROSTER_SERVER_IP").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            token_path: var("ROSTER_TOKEN_PATH")
                .map_or_else(|_| PathBuf::from("roster_token.json"), PathBuf::from),
            notification_timeout: Duration::from_millis(optional_number(
                "ROSTER_NOTIFICATION_MS",
                DEFAULT_NOTIFICATION_MS,
            )?),
        })
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }
}

#[derive(Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl ApiConfig {
    pub fn new() -> RosterResult<Self> {
        let base_url = var("ROSTER_API_BASE").context(BadEnvVarSnafu {
            name: "ROSTER_API_BASE",
        })?;
        ensure!(
            reqwest::Url::parse(&base_url).is_ok(),
            InvalidApiBaseSnafu { value: base_url }
        );

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(optional_number(
                "ROSTER_REQUEST_TIMEOUT_SECS",
                10,
            )?),
        })
    }
}

fn optional_number(name: &'static str, default: u64) -> RosterResult<u64> {
    var(name).map_or(Ok(default), |raw| {
        raw.trim().parse().context(ParseEnvNumberSnafu { name })
    })
}
