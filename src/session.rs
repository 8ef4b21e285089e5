use anyhow::Result;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::data_dir;
use crate::model::user::User;

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<User>,
}

/// Client-held session state: the token pair plus the signed-in user,
/// persisted so a restart doesn't require logging in again.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    data: SessionData,
}

impl Session {
    pub fn load() -> Self {
        Self::load_from(data_dir().join("session.json"))
    }

    pub fn load_from(path: PathBuf) -> Self {
        let data = if path.exists() {
            std::fs::read_to_string(&path)
                .ok()
                .and_then(|contents| serde_json::from_str(&contents).ok())
                .unwrap_or_default()
        } else {
            SessionData::default()
        };
        Self { path, data }
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn access(&self) -> Option<&str> {
        self.data.access.as_deref()
    }

    pub fn refresh(&self) -> Option<&str> {
        self.data.refresh.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.data.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.access.is_some() && self.data.user.is_some()
    }

    pub fn store_tokens(&mut self, access: String, refresh: String) -> Result<()> {
        self.data.access = Some(access);
        self.data.refresh = Some(refresh);
        self.save()
    }

    pub fn store_access(&mut self, access: String) -> Result<()> {
        self.data.access = Some(access);
        self.save()
    }

    pub fn store_user(&mut self, user: User) -> Result<()> {
        self.data.user = Some(user);
        self.save()
    }

    /// Drop access, refresh, and user, and remove the session file.
    pub fn clear(&mut self) -> Result<()> {
        self.data = SessionData::default();
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Expiry of the current access token, read from its JWT payload.
    pub fn access_expires_at(&self) -> Option<DateTime<Utc>> {
        self.data.access.as_deref().and_then(token_expiry)
    }
}

#[derive(Deserialize)]
struct Claims {
    exp: i64,
}

/// Decode the `exp` claim from a JWT without verifying it. The server owns
/// token validity; this only tells the client when a refresh is due.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    Utc.timestamp_opt(claims.exp, 0).single()
}
