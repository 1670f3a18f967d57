//! Request/response contract for the external free-text mood analysis.
//!
//! The analysis itself is produced by an LLM behind [`crate::MoodAnalyzer`];
//! this module only owns the prompt, the expected JSON shape and the checks
//! applied to what comes back.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::WellnessError;
use crate::model::{MoodAnalysis, MoodDimensions};

pub const MAX_EMOTIONAL_KEYWORDS: usize = 5;
pub const MAX_RECOMMENDED_ACTIVITIES: usize = 3;

pub const SYSTEM_PROMPT: &str = "You are a gaming wellness AI analyzing a player's mood for game recommendations. Reply with a single JSON object and nothing else.";

/// Structured analysis returned by the mood analysis service.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct TextMoodAnalysis {
    /// -5 (very negative) to +5 (very positive)
    pub sentiment_score: f64,
    #[serde(default)]
    pub emotional_keywords: Vec<String>,
    pub mood_dimensions: MoodDimensions,
    #[serde(default)]
    pub recommended_activities: Vec<String>,
    #[serde(default)]
    pub supportive_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellness_insights: Option<String>,
}

impl TextMoodAnalysis {
    /// Reject out-of-range values and trim the keyword/activity lists to
    /// their documented maximum lengths.
    pub fn validated(mut self) -> Result<Self, WellnessError> {
        if !self.sentiment_score.is_finite() || !(-5.0..=5.0).contains(&self.sentiment_score) {
            return Err(WellnessError::InvalidInput(format!(
                "sentiment_score must be in -5..=5, got {}",
                self.sentiment_score
            )));
        }
        self.mood_dimensions.validate()?;
        self.emotional_keywords.truncate(MAX_EMOTIONAL_KEYWORDS);
        self.recommended_activities
            .truncate(MAX_RECOMMENDED_ACTIVITIES);
        Ok(self)
    }

    /// The subset stored alongside a mood entry.
    pub fn to_mood_analysis(&self) -> MoodAnalysis {
        MoodAnalysis {
            sentiment_score: self.sentiment_score,
            emotional_keywords: self.emotional_keywords.clone(),
            recommended_activities: self.recommended_activities.clone(),
        }
    }
}

/// Human label for a sentiment score.
pub fn sentiment_label(score: f64) -> &'static str {
    if score >= 3.0 {
        "Very Positive"
    } else if score >= 1.0 {
        "Positive"
    } else if score >= -1.0 {
        "Neutral"
    } else if score >= -3.0 {
        "Negative"
    } else {
        "Very Negative"
    }
}

/// User prompt sent to the analysis model for a mood description.
pub fn build_analysis_prompt(text: &str) -> String {
    format!(
        "Analyze this mood description: \"{}\"\n\n\
         Respond with a JSON object containing:\n\
         1. sentiment_score: number from -5 (very negative) through 0 (neutral) to +5 (very positive)\n\
         2. emotional_keywords: 3-5 key emotions detected in the text\n\
         3. mood_dimensions: object with energy_level, stress_level, focus_level, social_desire and challenge_seeking, each an integer from 1 to 10\n\
         4. recommended_activities: 2-3 specific gaming activities that would help their current state\n\
         5. supportive_message: 1-2 empathetic sentences acknowledging their feelings\n\
         6. wellness_insights: insights about their gaming wellness needs right now\n\n\
         Be empathetic, supportive, and focus on how gaming can positively impact their wellness.",
        text.trim()
    )
}
