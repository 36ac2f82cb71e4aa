//! The learning assistant: text questions, topic help, study guides, and
//! spoken questions with tone detection.
//!
//! Every public entry point returns something displayable. Provider failures
//! are retried, logged, and then turned into a fallback message.

use crate::prompt::{self, QUERY, TOPIC_HELP};
use crate::provider::{CompletionRequest, LlmProvider, LlmResponse, ProviderError, provider_from_config};
use crate::sentiment::{self, AudioFeatures, FeatureExtractor, FileSizeEstimator, Sentiment};
use crate::transcribe::{Transcriber, WhisperTranscriber};
use roadmap_core::config::{RoadmapConfig, SentimentConfig};
use roadmap_core::graph::{CompletionState, NodeStore};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Everything produced for one spoken question.
#[derive(Debug, Clone, Serialize)]
pub struct AudioReply {
    pub transcription: String,
    pub sentiment: Option<Sentiment>,
    pub features: Option<AudioFeatures>,
    pub response: String,
    pub recommendation: String,
    pub success: bool,
}

impl AudioReply {
    fn failed(err: &dyn std::fmt::Display) -> Self {
        Self {
            transcription: String::new(),
            sentiment: None,
            features: None,
            response: format!("Sorry, I encountered an error processing your audio: {err}"),
            recommendation: "Please try recording again or check your microphone.".to_string(),
            success: false,
        }
    }
}

/// One-line description of the learner's tone for the system prompt.
pub fn sentiment_context(sentiment: &Sentiment) -> String {
    format!(
        "User's emotional state: {} (confidence: {:.2}). Audio analysis: {}",
        sentiment.emotion, sentiment.confidence, sentiment.analysis
    )
}

/// Call the LLM, retrying retryable failures with exponential backoff.
pub fn call_with_retry(
    provider: &dyn LlmProvider,
    request: &CompletionRequest,
    max_retries: usize,
    base_delay: Duration,
) -> Result<LlmResponse, ProviderError> {
    let mut attempt = 0;
    loop {
        match provider.complete(request) {
            Ok(response) => {
                tracing::debug!(
                    model = provider.model_name(),
                    input_tokens = ?response.input_tokens,
                    output_tokens = ?response.output_tokens,
                    "LLM call succeeded"
                );
                return Ok(response);
            }
            Err(e) => {
                tracing::warn!("LLM call attempt {} failed: {}", attempt + 1, e);
                if attempt >= max_retries || !e.is_retryable() {
                    return Err(e);
                }
                let factor = 2u32.saturating_pow(u32::try_from(attempt).unwrap_or(u32::MAX));
                std::thread::sleep(base_delay.saturating_mul(factor));
                attempt += 1;
            }
        }
    }
}

/// Learning assistant bound to one roadmap.
pub struct Assistant<'a> {
    store: &'a NodeStore,
    llm: Box<dyn LlmProvider>,
    transcriber: Option<Box<dyn Transcriber>>,
    extractor: Box<dyn FeatureExtractor>,
    thresholds: SentimentConfig,
    max_retries: usize,
    retry_delay: Duration,
    /// Rotates through each emotion's recommendations.
    variant: AtomicUsize,
}

impl<'a> Assistant<'a> {
    pub fn new(store: &'a NodeStore, llm: Box<dyn LlmProvider>) -> Self {
        Self {
            store,
            llm,
            transcriber: None,
            extractor: Box::new(FileSizeEstimator),
            thresholds: SentimentConfig::default(),
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
            variant: AtomicUsize::new(0),
        }
    }

    /// Build from config: the configured chat provider plus Whisper when
    /// `OPENAI_API_KEY` is set.
    pub fn from_config(store: &'a NodeStore, config: &RoadmapConfig) -> Result<Self, ProviderError> {
        let llm = provider_from_config(&config.assistant)?;
        let timeout = Duration::from_secs(config.assistant.timeout_secs);
        let base_url = if config.assistant.provider == "openai" {
            config.assistant.base_url.clone()
        } else {
            None
        };

        let mut assistant = Self::new(store, llm)
            .with_thresholds(config.sentiment.clone())
            .with_max_retries(config.assistant.max_retries);
        match WhisperTranscriber::from_env(base_url, timeout) {
            Ok(whisper) => assistant = assistant.with_transcriber(Box::new(whisper)),
            Err(e) => tracing::debug!("transcription unavailable: {}", e),
        }
        Ok(assistant)
    }

    pub fn with_transcriber(mut self, transcriber: Box<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn FeatureExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_thresholds(mut self, thresholds: SentimentConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Base delay before the first retry; doubles each attempt.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Send a request through the retry loop.
    pub fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse, ProviderError> {
        call_with_retry(self.llm.as_ref(), request, self.max_retries, self.retry_delay)
    }

    /// Answer a learning question with roadmap, tone, and progress context.
    pub fn ask(
        &self,
        question: &str,
        sentiment_context: Option<&str>,
        completed: &CompletionState,
    ) -> String {
        let system = prompt::system_prompt(self.store, sentiment_context, completed);
        let request = QUERY.request(system, question.to_string());
        match self.complete(&request) {
            Ok(response) => response.text,
            Err(e) => {
                tracing::warn!("chat fallback: {}", e);
                format!("I'm having trouble responding right now: {e}. Please try again.")
            }
        }
    }

    /// Answer a question about one topic.
    pub fn topic_help(&self, topic_id: &str, question: &str) -> String {
        let system = prompt::topic_help_prompt(self.store, topic_id);
        let request = TOPIC_HELP.request(system, question.to_string());
        match self.complete(&request) {
            Ok(response) => response.text,
            Err(e) => {
                tracing::warn!(topic = topic_id, "topic help fallback: {}", e);
                format!("I'm having trouble accessing topic help: {e}. Please try again.")
            }
        }
    }

    /// A structured, multi-week study guide for one topic.
    pub fn study_guide(&self, topic_id: &str, completed: &CompletionState) -> String {
        let request = prompt::study_guide_request(self.store, topic_id, completed);
        match self.complete(&request) {
            Ok(response) => response.text,
            Err(e) => {
                tracing::warn!(topic = topic_id, "study guide fallback: {}", e);
                format!(
                    "I encountered an error while generating the study guide: {e}. \
                     Please check your API key and internet connection, then try again."
                )
            }
        }
    }

    /// Transcribe a spoken question, read its tone, and answer it.
    ///
    /// Any failure before the answer step yields a reply with
    /// `success == false` and a generic recommendation.
    pub fn process_audio(&self, audio_path: &Path, completed: &CompletionState) -> AudioReply {
        match self.listen(audio_path) {
            Ok((transcription, features, sentiment)) => {
                let variant = self.variant.fetch_add(1, Ordering::Relaxed);
                let recommendation = sentiment::learning_recommendation(
                    sentiment.emotion,
                    sentiment.confidence,
                    variant,
                );
                let context = sentiment_context(&sentiment);
                let response = self.ask(&transcription, Some(&context), completed);
                AudioReply {
                    transcription,
                    sentiment: Some(sentiment),
                    features: Some(features),
                    response,
                    recommendation,
                    success: true,
                }
            }
            Err(e) => {
                tracing::warn!(path = %audio_path.display(), "audio processing failed: {}", e);
                AudioReply::failed(&e)
            }
        }
    }

    fn listen(&self, audio_path: &Path) -> Result<(String, AudioFeatures, Sentiment), ProviderError> {
        if !audio_path.exists() {
            return Err(ProviderError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("audio file not found: {}", audio_path.display()),
            )));
        }
        let transcriber = self.transcriber.as_ref().ok_or(ProviderError::MissingApiKey {
            provider: "whisper".to_string(),
            var: "OPENAI_API_KEY",
        })?;

        let transcription = transcriber.transcribe(audio_path)?;
        let features = self.extractor.extract(audio_path)?;
        let sentiment = sentiment::predict(&features, &self.thresholds);
        tracing::debug!(
            emotion = %sentiment.emotion,
            confidence = sentiment.confidence,
            "voice tone"
        );
        Ok((transcription, features, sentiment))
    }
}
