//! Minimal Phabricator Conduit client.
//!
//! Conduit methods are called with a form-encoded POST to `<host><method>`
//! and always answer `{"result": ..., "error_code": ..., "error_info": ...}`.

use crate::domain::ports::RevisionSearch;
use crate::utils::error::{Result, ScopeError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ConduitResponse<T> {
    result: Option<T>,
    error_code: Option<String>,
    error_info: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhoAmI {
    pub phid: String,
    #[serde(rename = "userName")]
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    data: Vec<Revision>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Revision {
    pub id: u64,
    pub phid: String,
    pub fields: RevisionFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevisionFields {
    #[serde(default)]
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct PhabricatorClient {
    client: Client,
    host: String,
    token: String,
}

impl PhabricatorClient {
    pub fn new(client: Client, host: &str, token: &str) -> Self {
        let host = if host.ends_with('/') {
            host.to_string()
        } else {
            format!("{}/", host)
        };

        Self {
            client,
            host,
            token: token.to_string(),
        }
    }

    /// Creates a client and checks the token with `user.whoami`.
    pub async fn connect(host: &str, token: &str) -> Result<Self> {
        let phab = Self::new(Client::new(), host, token);

        match phab.whoami().await {
            Ok(me) => {
                tracing::info!("Connected to Phabricator as {}", me.user_name);
                Ok(phab)
            }
            Err(e) => Err(ScopeError::PhabricatorInit {
                message: e.to_string(),
            }),
        }
    }

    pub async fn whoami(&self) -> Result<WhoAmI> {
        self.call("user.whoami", &[]).await
    }

    pub async fn search_revisions(&self, query: &str) -> Result<Vec<Revision>> {
        let result: SearchResult = self
            .call(
                "differential.revision.search",
                &[("constraints[query]", query), ("limit", "1")],
            )
            .await?;
        Ok(result.data)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.host, method);

        let mut form: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        form.push(("api.token", self.token.as_str()));
        form.extend_from_slice(params);

        tracing::debug!("Conduit call {}", method);
        let response = self.client.post(&url).form(&form).send().await?;

        if !response.status().is_success() {
            return Err(ScopeError::UnexpectedStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let decoded: ConduitResponse<T> = serde_json::from_str(&body)?;

        if let Some(code) = decoded.error_code {
            return Err(ScopeError::Conduit {
                code,
                info: decoded.error_info.unwrap_or_default(),
            });
        }

        decoded.result.ok_or_else(|| ScopeError::Conduit {
            code: "ERR-EMPTY-RESULT".to_string(),
            info: format!("{} returned no result", method),
        })
    }
}

impl RevisionSearch for PhabricatorClient {
    async fn find_revision(&self, query: &str) -> Result<Option<String>> {
        let revisions = self.search_revisions(query).await?;
        Ok(revisions.into_iter().next().map(|r| r.fields.uri))
    }
}
