//! Persistence of the member document through the GitHub contents API.
//!
//! A save is a read-then-write: fetch the current file to learn its blob
//! SHA (a 404 means the file does not exist yet), then PUT the new content.
//! The bearer token is passed in by the caller rather than read from any
//! ambient store.

use crate::member::MembersDocument;
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

const ACCEPT: &str = "application/vnd.github.v3+json";

/// Where and how the document is committed.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API root, overridable for tests
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    /// Path of the data file inside the repository
    pub path: String,
    pub commit_message: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            owner: "nward21".to_string(),
            repo: "bfc-member-collage-logos".to_string(),
            path: "members.json".to_string(),
            commit_message: "Update members via dashboard".to_string(),
            user_agent: concat!("bfc-logo-grid/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30000,
        }
    }
}

impl GitHubConfig {
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path
        )
    }

    pub fn user_url(&self) -> String {
        format!("{}/user", self.api_base.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

pub struct GitHubStore {
    client: Client,
    config: GitHubConfig,
    token: Option<String>,
}

impl GitHubStore {
    pub fn new(config: GitHubConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config, token })
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingCredential)
    }

    /// SHA of the current file, `None` when it does not exist yet.
    fn current_sha(&self, token: &str) -> Result<Option<String>> {
        let resp = self
            .client
            .get(self.config.contents_url())
            .header("Authorization", format!("token {}", token))
            .header("Accept", ACCEPT)
            .send()?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Error::Persistence("Failed to fetch current file".into()));
        }
        let body: serde_json::Value = resp.json()?;
        Ok(body.get("sha").and_then(|v| v.as_str()).map(str::to_string))
    }

    /// Commit `document` as pretty-printed JSON. Returns the API response.
    pub fn save(&self, document: &MembersDocument) -> Result<serde_json::Value> {
        let token = self.token()?;
        let content = document.to_json_pretty()?;
        let sha = self.current_sha(token)?;
        log::info!(
            "Saving {} members to {} ({})",
            document.members.len(),
            self.config.contents_url(),
            if sha.is_some() { "update" } else { "create" }
        );

        let body = PutContents {
            message: &self.config.commit_message,
            content: STANDARD.encode(content.as_bytes()),
            sha,
        };
        let resp = self
            .client
            .put(self.config.contents_url())
            .header("Authorization", format!("token {}", token))
            .header("Accept", ACCEPT)
            .json(&body)
            .send()?;

        if !resp.status().is_success() {
            let status = resp.status();
            let message = resp
                .json::<serde_json::Value>()
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| "Failed to save to GitHub".to_string());
            log::warn!("GitHub save rejected with {}: {}", status, message);
            return Err(Error::Persistence(message));
        }
        Ok(resp.json()?)
    }

    /// Whether `token` belongs to the repository owner.
    pub fn validate_token(&self, token: &str) -> Result<bool> {
        let resp = self
            .client
            .get(self.config.user_url())
            .header("Authorization", format!("token {}", token))
            .header("Accept", ACCEPT)
            .send()?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let user: serde_json::Value = resp.json()?;
        Ok(user.get("login").and_then(|l| l.as_str()) == Some(self.config.owner.as_str()))
    }
}
