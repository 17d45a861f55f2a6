use crate::domain::ports::DocumentSource;
use crate::utils::error::{Result, ScopeError};
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: Client,
}

impl HttpDocumentSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpDocumentSource {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

impl DocumentSource for HttpDocumentSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        if !response.status().is_success() {
            return Err(ScopeError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
