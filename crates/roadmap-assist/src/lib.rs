//! LLM learning assistant for the roadmap.
//!
//! Answers questions with the roadmap and the learner's progress as context,
//! and accepts spoken questions whose tone steers the answer.
//!
//! # Architecture
//!
//! - **provider**: `LlmProvider` trait with OpenAI and Anthropic implementations
//! - **transcribe**: `Transcriber` trait with OpenAI Whisper
//! - **sentiment**: emotion scoring from speech features and study suggestions
//! - **prompt**: system prompts built from the roadmap
//! - **assistant**: retries, fallbacks, and the spoken-question pipeline

pub mod assistant;
pub mod prompt;
pub mod provider;
pub mod sentiment;
pub mod transcribe;

pub use assistant::{Assistant, AudioReply, sentiment_context};
pub use provider::{
    CompletionRequest, LlmProvider, LlmResponse, ProviderError, api_key_env,
    available_providers, create_provider,
};
pub use sentiment::{AudioFeatures, Emotion, Sentiment};
pub use transcribe::Transcriber;
