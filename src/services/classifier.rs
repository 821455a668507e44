use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Category, Classification},
};

/// Clothing image classifier abstraction
///
/// The classification model runs elsewhere; this crate only consumes its
/// four output labels (category, color, season, occasion) to populate a
/// new wardrobe item. Implementations must be safe to share across
/// request handlers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a clothing photo into its labels.
    async fn classify(&self, image: &[u8]) -> AppResult<Classification>;

    /// Classifier name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Raw JSON response from the classifier service
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierResponse {
    pub category: String,
    #[serde(default)]
    pub color: Option<String>,
    pub season: String,
    pub occasion: String,
}

impl TryFrom<ClassifierResponse> for Classification {
    type Error = AppError;

    fn try_from(response: ClassifierResponse) -> Result<Self, Self::Error> {
        let category = Category::parse_label(&response.category).ok_or_else(|| {
            AppError::Classifier(format!("Unknown category label: {}", response.category))
        })?;

        Ok(Classification {
            category,
            color: response.color,
            season: response.season,
            occasion: response.occasion,
        })
    }
}

/// HTTP-backed classifier client
///
/// POSTs the raw image bytes to the classifier service and parses the
/// label response.
#[derive(Clone)]
pub struct HttpClassifier {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl HttpClassifier {
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, image: &[u8]) -> AppResult<Classification> {
        let url = format!("{}/classify", self.api_url);

        let mut request = self
            .http_client
            .post(&url)
            .header("content-type", "application/octet-stream")
            .body(image.to_vec());

        if let Some(api_key) = &self.api_key {
            request = request.header("x-api-key", api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Classifier(format!(
                "Classifier returned status {}: {}",
                status, body
            )));
        }

        let parsed: ClassifierResponse = response.json().await?;
        let classification = Classification::try_from(parsed)?;

        tracing::info!(
            category = %classification.category,
            season = %classification.season,
            occasion = %classification.occasion,
            classifier = self.name(),
            "Image classified"
        );

        Ok(classification)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
