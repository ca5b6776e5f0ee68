use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

/// Reported by hosted inference backends alongside the response body,
/// e.g. "cpu" or "gpu+optimized".
const COMPUTE_TYPE_HEADER: &str = "x-compute-type";

#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl InferenceClient {
    pub fn new(base_url: String, api_token: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_token,
            timeout,
        }
    }

    async fn invoke(&self, model_id: &str, payload: JsonValue) -> Result<InferenceResponse> {
        let url = format!("{}/models/{}", self.base_url.trim_end_matches('/'), model_id);
        let mut request = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let compute_type = response
            .headers()
            .get(COMPUTE_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "{} returned {}: {}",
                model_id, status, text
            )));
        }

        let body: JsonValue = response.json().await?;
        Ok(InferenceResponse { body, compute_type })
    }
}

struct InferenceResponse {
    body: JsonValue,
    compute_type: Option<String>,
}

/// Text-to-text generation checkpoint wrapper.
#[derive(Clone)]
pub struct GenerationModel {
    client: InferenceClient,
    model_id: String,
}

impl GenerationModel {
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let payload = json!({
            "inputs": prompt,
            "parameters": { "max_length": 100, "num_return_sequences": 1 },
            "options": { "wait_for_model": true },
        });
        let response = self.client.invoke(&self.model_id, payload).await?;
        response
            .body
            .get(0)
            .and_then(|v| v.get("generated_text"))
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| {
                Error::Inference(format!("{}: unexpected generation response", self.model_id))
            })
    }

    async fn warm_up(&self) -> Result<Option<String>> {
        let payload = json!({
            "inputs": "Generate a question about product transparency",
            "parameters": { "max_length": 20 },
            "options": { "wait_for_model": true },
        });
        let response = self.client.invoke(&self.model_id, payload).await?;
        Ok(response.compute_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Checkpoints disagree on label casing; anything unrecognized is neutral.
    pub fn from_raw(label: &str) -> SentimentLabel {
        match label.to_ascii_uppercase().as_str() {
            "POSITIVE" => SentimentLabel::Positive,
            "NEGATIVE" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Classification {
    label: String,
    score: f64,
}

/// Sentiment classification checkpoint wrapper.
#[derive(Clone)]
pub struct SentimentModel {
    client: InferenceClient,
    model_id: String,
}

impl SentimentModel {
    pub async fn classify(&self, text: &str) -> Result<SentimentLabel> {
        let payload = json!({
            "inputs": text,
            "options": { "wait_for_model": true },
        });
        let response = self.client.invoke(&self.model_id, payload).await?;

        // The API nests one candidate list per input string.
        let candidates: Vec<Classification> =
            serde_json::from_value::<Vec<Vec<Classification>>>(response.body.clone())
                .map(|mut nested| if nested.is_empty() { Vec::new() } else { nested.remove(0) })
                .or_else(|_| serde_json::from_value::<Vec<Classification>>(response.body))?;

        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(|c| SentimentLabel::from_raw(&c.label))
            .ok_or_else(|| {
                Error::Inference(format!("{}: empty classification response", self.model_id))
            })
    }

    async fn warm_up(&self) -> Result<Option<String>> {
        let payload = json!({
            "inputs": "ok",
            "options": { "wait_for_model": true },
        });
        let response = self.client.invoke(&self.model_id, payload).await?;
        Ok(response.compute_type)
    }
}

/// Sentence embedding checkpoint wrapper. Loaded and health-reported, but not
/// consulted by the scorer.
#[derive(Clone)]
pub struct EmbeddingModel {
    client: InferenceClient,
    model_id: String,
}

impl EmbeddingModel {
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let payload = json!({
            "inputs": texts,
            "options": { "wait_for_model": true },
        });
        let response = self.client.invoke(&self.model_id, payload).await?;
        serde_json::from_value(response.body).map_err(Error::from)
    }

    pub fn cosine_sim(a: &[f32], b: &[f32]) -> f32 {
        let mut dot = 0f32;
        let mut na = 0f32;
        let mut nb = 0f32;
        for (x, y) in a.iter().zip(b.iter()) {
            dot += x * y;
            na += x * x;
            nb += y * y;
        }
        if na == 0.0 || nb == 0.0 {
            0.0
        } else {
            dot / (na.sqrt() * nb.sqrt())
        }
    }

    async fn warm_up(&self) -> Result<Option<String>> {
        let payload = json!({
            "inputs": ["ok"],
            "options": { "wait_for_model": true },
        });
        let response = self.client.invoke(&self.model_id, payload).await?;
        Ok(response.compute_type)
    }
}

/// Model handles resolved at startup. Any subset may be absent; every request
/// path must keep working against an empty registry.
#[derive(Clone, Default)]
pub struct ModelRegistry {
    pub question_generator: Option<GenerationModel>,
    pub sentiment_analyzer: Option<SentimentModel>,
    pub sentence_model: Option<EmbeddingModel>,
    pub gpu_available: bool,
}

impl ModelRegistry {
    /// Probes each configured model once. A failed probe logs a warning and
    /// leaves that adapter absent; the process always comes up.
    pub async fn load(config: &Config) -> ModelRegistry {
        let mut registry = ModelRegistry::default();

        let Some(base_url) = config.inference_api_url.clone() else {
            tracing::warn!("INFERENCE_API_URL not set, running with fallback methods only");
            return registry;
        };

        let client = InferenceClient::new(
            base_url,
            config.inference_api_token.clone(),
            Duration::from_secs(config.inference_timeout_secs),
        );

        let generator = GenerationModel {
            client: client.clone(),
            model_id: config.question_model.clone(),
        };
        match generator.warm_up().await {
            Ok(compute_type) => {
                registry.note_compute_type(compute_type);
                registry.question_generator = Some(generator);
            }
            Err(e) => tracing::warn!(
                error = %e,
                model = %config.question_model,
                "question generation model unavailable"
            ),
        }

        let analyzer = SentimentModel {
            client: client.clone(),
            model_id: config.sentiment_model.clone(),
        };
        match analyzer.warm_up().await {
            Ok(compute_type) => {
                registry.note_compute_type(compute_type);
                registry.sentiment_analyzer = Some(analyzer);
            }
            Err(e) => tracing::warn!(
                error = %e,
                model = %config.sentiment_model,
                "sentiment analysis model unavailable"
            ),
        }

        let embedder = EmbeddingModel {
            client,
            model_id: config.embedding_model.clone(),
        };
        match embedder.warm_up().await {
            Ok(compute_type) => {
                registry.note_compute_type(compute_type);
                registry.sentence_model = Some(embedder);
            }
            Err(e) => tracing::warn!(
                error = %e,
                model = %config.embedding_model,
                "sentence embedding model unavailable"
            ),
        }

        tracing::info!(
            question_generator = registry.question_generator.is_some(),
            sentiment_analyzer = registry.sentiment_analyzer.is_some(),
            sentence_model = registry.sentence_model.is_some(),
            gpu_available = registry.gpu_available,
            "model adapters loaded"
        );
        registry
    }

    fn note_compute_type(&mut self, compute_type: Option<String>) {
        if compute_type.is_some_and(|c| c.to_ascii_lowercase().contains("gpu")) {
            self.gpu_available = true;
        }
    }
}
