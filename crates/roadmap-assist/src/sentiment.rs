//! Emotional tone from speech features, and study advice to match.
//!
//! Scoring is additive: each feature that crosses a threshold adds fixed
//! weights to a few emotions, then the scores are normalized to sum to 1.
//! The dominant emotion's normalized score is the confidence.

use roadmap_core::config::SentimentConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Speech features that drive the scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AudioFeatures {
    /// Mean RMS energy.
    pub energy: f64,
    /// Beats per minute.
    pub tempo: f64,
    /// Hz.
    pub spectral_centroid: f64,
    pub zero_crossing_rate: f64,
    pub pitch_variance: f64,
    /// Seconds.
    pub duration: f64,
}

/// Declaration order breaks ties: the first emotion with the top score wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Excited,
    Positive,
    Neutral,
    Calm,
    Stressed,
    Negative,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Excited,
        Emotion::Positive,
        Emotion::Neutral,
        Emotion::Calm,
        Emotion::Stressed,
        Emotion::Negative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Excited => "excited",
            Emotion::Positive => "positive",
            Emotion::Neutral => "neutral",
            Emotion::Calm => "calm",
            Emotion::Stressed => "stressed",
            Emotion::Negative => "negative",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Study suggestions for this emotion.
    fn recommendations(self) -> &'static [&'static str; 3] {
        match self {
            Emotion::Excited => &[
                "Great energy! This is perfect for tackling challenging topics like AI Agents or Infrastructure.",
                "Your enthusiasm is awesome! Consider diving into complex topics like RAG systems.",
                "Amazing energy! Perfect time to explore advanced topics like Multi-agent systems.",
            ],
            Emotion::Positive => &[
                "Positive attitude detected! Good time for structured learning like LLM APIs.",
                "Great mindset! Consider working through the Model Adaptation topics.",
                "Excellent mood for learning! Try the Storage for Retrieval section.",
            ],
            Emotion::Calm => &[
                "Nice calm energy! Perfect for detailed topics like Security or Observability.",
                "Great focus detected! Ideal for reading documentation and resources.",
                "Calm and focused! Perfect for deep-diving into theoretical concepts.",
            ],
            Emotion::Neutral => &[
                "Steady state! Good for any topic in the roadmap. Consider your prerequisites.",
                "Balanced energy! Great for methodical progress through the learning path.",
                "Good baseline! Perfect for reviewing previous topics or starting new ones.",
            ],
            Emotion::Stressed => &[
                "Take a breath! Maybe start with easier topics or review familiar material.",
                "Detected some tension. Consider shorter learning sessions or basic concepts.",
                "Stress detected. Try starting with overview materials or taking a break.",
            ],
            Emotion::Negative => &[
                "Tough day? Consider light review or motivational content about AI careers.",
                "Low energy detected. Maybe watch some inspiring AI demos or success stories.",
                "Not feeling it? Try exploring the 'Forward looking elements' for inspiration.",
            ],
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`predict`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sentiment {
    pub emotion: Emotion,
    /// Normalized score of `emotion`, in `[0, 1]`.
    pub confidence: f64,
    /// Normalized score per emotion.
    pub scores: BTreeMap<Emotion, f64>,
    /// Human-readable summary, e.g. "Detected high energy, fast speech".
    pub analysis: String,
}

/// Score each emotion from `features` and pick the dominant one.
pub fn predict(features: &AudioFeatures, thresholds: &SentimentConfig) -> Sentiment {
    let mut scores = [0.0_f64; 6];
    let mut add = |emotion: Emotion, weight: f64| scores[emotion.index()] += weight;

    if features.energy > thresholds.energy_high {
        add(Emotion::Excited, 0.3);
        add(Emotion::Positive, 0.2);
    } else if features.energy < thresholds.energy_low {
        add(Emotion::Calm, 0.3);
        add(Emotion::Negative, 0.1);
    } else {
        add(Emotion::Neutral, 0.2);
    }

    if features.tempo > thresholds.tempo_fast {
        add(Emotion::Excited, 0.25);
        add(Emotion::Stressed, 0.15);
    } else if features.tempo < thresholds.tempo_slow {
        add(Emotion::Calm, 0.25);
        add(Emotion::Negative, 0.1);
    } else {
        add(Emotion::Positive, 0.2);
        add(Emotion::Neutral, 0.15);
    }

    if features.zero_crossing_rate > thresholds.zcr_high {
        add(Emotion::Stressed, 0.2);
        add(Emotion::Excited, 0.1);
    } else if features.zero_crossing_rate < thresholds.zcr_low {
        add(Emotion::Calm, 0.2);
        add(Emotion::Positive, 0.1);
    }

    if features.spectral_centroid > thresholds.centroid_bright {
        add(Emotion::Excited, 0.15);
        add(Emotion::Positive, 0.1);
    } else if features.spectral_centroid < thresholds.centroid_dark {
        add(Emotion::Calm, 0.15);
        add(Emotion::Negative, 0.05);
    }

    if features.pitch_variance > thresholds.pitch_variance_high {
        add(Emotion::Excited, 0.1);
        add(Emotion::Stressed, 0.1);
    } else if features.pitch_variance < thresholds.pitch_variance_low {
        add(Emotion::Calm, 0.1);
        add(Emotion::Neutral, 0.1);
    }

    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        for score in &mut scores {
            *score /= total;
        }
    }

    // Strict comparison keeps the earliest emotion on ties.
    let mut dominant = Emotion::ALL[0];
    for emotion in Emotion::ALL {
        if scores[emotion.index()] > scores[dominant.index()] {
            dominant = emotion;
        }
    }

    Sentiment {
        emotion: dominant,
        confidence: scores[dominant.index()],
        scores: Emotion::ALL
            .iter()
            .map(|e| (*e, scores[e.index()]))
            .collect(),
        analysis: analysis_text(features, thresholds),
    }
}

fn analysis_text(features: &AudioFeatures, thresholds: &SentimentConfig) -> String {
    let mut parts = Vec::new();
    if features.energy > thresholds.energy_high {
        parts.push("high energy");
    } else if features.energy < thresholds.energy_low {
        parts.push("low energy");
    }
    if features.tempo > thresholds.tempo_fast {
        parts.push("fast speech");
    } else if features.tempo < thresholds.tempo_slow {
        parts.push("slow speech");
    }
    if features.zero_crossing_rate > thresholds.zcr_high {
        parts.push("variable tone");
    }

    if parts.is_empty() {
        "Detected moderate characteristics".to_string()
    } else {
        format!("Detected {}", parts.join(", "))
    }
}

/// A study suggestion for `emotion`, with a note on how sure the reading is.
///
/// `variant` picks among the emotion's suggestions (wrapping).
pub fn learning_recommendation(emotion: Emotion, confidence: f64, variant: usize) -> String {
    let options = emotion.recommendations();
    let modifier = if confidence > 0.7 {
        " (High confidence in this assessment)"
    } else if confidence > 0.5 {
        " (Moderate confidence)"
    } else {
        " (Low confidence - this is just a suggestion)"
    };
    format!("{}{}", options[variant % options.len()], modifier)
}

/// Source of [`AudioFeatures`] for a recording.
pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, audio_path: &Path) -> std::io::Result<AudioFeatures>;
}

/// Estimates features from the file size alone.
///
/// Duration assumes 44.1 kB per second, capped at ten seconds; every other
/// feature is a fixed mid-range value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSizeEstimator;

impl FeatureExtractor for FileSizeEstimator {
    fn extract(&self, audio_path: &Path) -> std::io::Result<AudioFeatures> {
        let bytes = std::fs::metadata(audio_path)?.len();
        let duration = (bytes as f64 / 44_100.0).min(10.0);
        Ok(AudioFeatures {
            energy: 0.5,
            tempo: 120.0,
            spectral_centroid: 1000.0,
            zero_crossing_rate: 0.1,
            pitch_variance: 100.0,
            duration,
        })
    }
}
