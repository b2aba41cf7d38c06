use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::{Envelope, GenerationRequest, GenerationResult, StyleRecord, TemplateRecord};

pub const GENERATION_FALLBACK: &str = "Server error generating prompts";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("status={status} body={body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Decode(String),
    #[error("{}", .0.as_deref().unwrap_or(GENERATION_FALLBACK))]
    Rejected(Option<String>),
}

impl ApiError {
    /// Text shown in the error panel.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected(Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            ApiError::Rejected(_) => GENERATION_FALLBACK.to_string(),
            ApiError::Status { status, .. } => format!("{GENERATION_FALLBACK} (status {status})"),
            other => other.to_string(),
        }
    }
}

/// Remote side of the lab: reference data plus prompt generation.
///
/// The reference loads never fail; an unavailable collection is reported as empty.
#[async_trait]
pub trait PromptService: Send + Sync {
    async fn fetch_styles(&self) -> Vec<StyleRecord>;
    async fn fetch_templates(&self) -> Vec<TemplateRecord>;
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ApiError>;
}

pub struct HttpPromptService {
    client: Client,
    base_url: String,
}

impl HttpPromptService {
    pub fn new(base_url: impl Into<String>) -> Self {
        // No timeout: a hung generation keeps the lab in Submitting.
        Self { client: Client::new(), base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    async fn get_collection<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, ApiError> {
        let response = self.client.get(self.url(endpoint)).send().await.map_err(|e| ApiError::Http(e.to_string()))?;
        let envelope: Envelope<Vec<T>> = read_envelope(response).await?;
        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            Err(ApiError::Rejected(envelope.error))
        }
    }

    async fn load_or_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Vec<T> {
        match self.get_collection(endpoint).await {
            Ok(items) => {
                info!("📥 Loaded {} records from {}", items.len(), endpoint);
                items
            }
            Err(e) => {
                error!("❌ Failed to load {}: {}", endpoint, e);
                Vec::new()
            }
        }
    }
}

// Keeps error bodies (often whole HTML pages) short enough to log.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{}...[truncated {} chars]", head, body.chars().count() - MAX)
    } else {
        body.to_string()
    }
}

async fn read_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<Envelope<T>, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| ApiError::Http(e.to_string()))?;
    // The service reports failures inside the envelope, often with a non-2xx status.
    match serde_json::from_str::<Envelope<T>>(&body) {
        Ok(envelope) => Ok(envelope),
        Err(_) if !status.is_success() => {
            error!("❌ API Error response ({}): {}", status, truncate_body(&body));
            Err(ApiError::Status { status: status.as_u16(), body: truncate_body(&body) })
        }
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

#[async_trait]
impl PromptService for HttpPromptService {
    async fn fetch_styles(&self) -> Vec<StyleRecord> {
        self.load_or_empty("styles.php").await
    }

    async fn fetch_templates(&self) -> Vec<TemplateRecord> {
        self.load_or_empty("templates.php").await
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ApiError> {
        let url = self.url("generate.php");
        info!("🔗 Posting generation request to: {}", url);

        let response =
            self.client.post(&url).json(request).send().await.map_err(|e| ApiError::Http(e.to_string()))?;
        let envelope: Envelope<GenerationResult> = read_envelope(response).await?;

        if !envelope.success {
            warn!("⚠️ Generation rejected: {:?}", envelope.error);
            return Err(ApiError::Rejected(envelope.error));
        }
        envelope.data.ok_or_else(|| ApiError::Decode("success response without data".into()))
    }
}
