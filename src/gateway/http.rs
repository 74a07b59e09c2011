use crate::config::EditorConfig;
use crate::error::GatewayError;
use crate::gateway::traits::PropertyGateway;
use crate::models::PropertyRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Property gateway backed by the REST API
pub struct HttpGateway {
    client: Client,
    base: Url,
    token: Option<String>,
}

/// `GET /properties` answers either with a bare array or wrapped in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<PropertyRecord>),
    Wrapped { data: Vec<PropertyRecord> },
}

impl HttpGateway {
    /// Create a gateway with default settings (local backend)
    pub fn new() -> Result<Self> {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let base = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("API URL cannot be used as a base: {}", config.api_url);
        }

        Ok(Self {
            client,
            base,
            token: config.api_token.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in with_config
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// Turn a non-success response into the message the backend gave, if any
async fn rejection(response: Response) -> GatewayError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    warn!("Backend returned status: {}", status);

    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(*key).and_then(|v| v.as_str()).map(String::from))
        })
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

    GatewayError::Rejected(message)
}

#[async_trait]
impl PropertyGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<PropertyRecord>, GatewayError> {
        let url = self.endpoint(&["properties"]);
        debug!("Fetching URL: {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response.text().await?;
        debug!("Downloaded {} bytes of property data", body.len());

        let records = match serde_json::from_str::<ListBody>(&body).map_err(|e| GatewayError::Decode(e.to_string()))? {
            ListBody::Bare(records) | ListBody::Wrapped { data: records } => records,
        };
        info!("Loaded {} properties from {}", records.len(), self.source_name());
        Ok(records)
    }

    async fn update(&self, id: &str, record: &PropertyRecord) -> Result<(), GatewayError> {
        let url = self.endpoint(&["properties", id]);
        debug!("Updating property at {}", url);

        let response = self.authorize(self.client.put(url).json(record)).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        info!("Saved property {}", id);
        Ok(())
    }

    fn source_name(&self) -> &'static str {
        "REST API"
    }
}
