//! Who the console is acting as.
//!
//! A single bearer token lives in durable storage under the key `"token"`. Whether one is
//! there decides if the current user's profile gets fetched when the console starts.

use crate::{
    error::{
        DecodeTokenFileSnafu, EncodeTokenFileSnafu, ReadTokenFileSnafu, RosterResult,
        WriteTokenFileSnafu,
    },
    gateway::{ProfileGateway, SharedToken},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use snafu::ResultExt;
use std::{io::ErrorKind, path::PathBuf, sync::Arc};
use tokio::sync::RwLock;

const TOKEN_KEY: &str = "token";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("Unknown user")
    }
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> RosterResult<Option<SecretString>>;
    async fn save(&self, token: &SecretString) -> RosterResult<()>;
    async fn clear(&self) -> RosterResult<()>;
}

/// Keeps the token in a small JSON object on disk, next to anything else already in there.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_map(&self) -> RosterResult<Map<String, Value>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Map::new()),
            Ok(contents) => serde_json::from_str(&contents).context(DecodeTokenFileSnafu {
                path: self.path.clone(),
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(source) => Err(source).context(ReadTokenFileSnafu {
                path: self.path.clone(),
            }),
        }
    }

    async fn write_map(&self, map: &Map<String, Value>) -> RosterResult<()> {
        let encoded = serde_json::to_vec_pretty(map).context(EncodeTokenFileSnafu)?;
        tokio::fs::write(&self.path, encoded)
            .await
            .context(WriteTokenFileSnafu {
                path: self.path.clone(),
            })
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> RosterResult<Option<SecretString>> {
        Ok(self
            .read_map()
            .await?
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(|token| SecretString::from(token.to_string())))
    }

    async fn save(&self, token: &SecretString) -> RosterResult<()> {
        let mut map = self.read_map().await?;
        map.insert(
            TOKEN_KEY.to_string(),
            Value::String(token.expose_secret().to_string()),
        );
        self.write_map(&map).await
    }

    async fn clear(&self) -> RosterResult<()> {
        let mut map = self.read_map().await?;
        if map.remove(TOKEN_KEY).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SessionState {
    pub loading: bool,
    pub profile: Option<UserProfile>,
}

/// Token + current user, handed to whatever needs it rather than living in a global.
pub struct Session {
    store: Arc<dyn TokenStore>,
    profiles: Arc<dyn ProfileGateway>,
    token: SharedToken,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(
        store: Arc<dyn TokenStore>,
        profiles: Arc<dyn ProfileGateway>,
        token: SharedToken,
    ) -> Self {
        Self {
            store,
            profiles,
            token,
            state: RwLock::new(SessionState {
                loading: true,
                profile: None,
            }),
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.read().await.profile.clone()
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }

    async fn fetch_profile(&self) {
        match self.profiles.fetch_self().await {
            Ok(profile) => {
                info!(user = profile.display_name(), "Signed in");
                self.state.write().await.profile = Some(profile);
            }
            Err(e) => warn!(?e, "Unable to fetch current user"),
        }
    }

    /// Picks up a previously stored token, if any, and loads the matching profile.
    pub async fn init(&self) {
        self.set_loading(true).await;

        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(?e, "Unable to read stored token");
                None
            }
        };
        let has_token = stored.is_some();
        *self.token.write().await = stored;

        if has_token {
            self.fetch_profile().await;
        } else {
            debug!("No stored token, staying signed out");
        }

        self.set_loading(false).await;
    }

    pub async fn save_token(&self, token: SecretString) -> RosterResult<()> {
        self.set_loading(true).await;

        let saved = self.store.save(&token).await;
        if saved.is_ok() {
            *self.token.write().await = Some(token);
            self.fetch_profile().await;
        }

        self.set_loading(false).await;
        saved
    }

    pub async fn remove_token(&self) -> RosterResult<()> {
        self.set_loading(true).await;

        let cleared = self.store.clear().await;
        *self.token.write().await = None;
        self.state.write().await.profile = None;

        self.set_loading(false).await;
        cleared
    }

    ///a failed refresh keeps the profile we already had
    pub async fn refresh_self(&self) {
        self.fetch_profile().await;
    }
}
