//! Mood, game catalog, session and profile records.
//!
//! Field names follow the stored entity schemas (`snake_case`) and every
//! enumerated vocabulary is a closed enum, so unknown tags fail to
//! deserialize instead of silently scoring as "no match".

use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::WellnessError;
use crate::analysis::TextMoodAnalysis;

pub const DIMENSION_MIN: u8 = 1;
pub const DIMENSION_MAX: u8 = 10;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MoodContext {
    Morning,
    Afternoon,
    Evening,
    LateNight,
}

impl MoodContext {
    /// Time-of-day bucket for a local hour (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=5 => MoodContext::LateNight,
            6..=11 => MoodContext::Morning,
            12..=17 => MoodContext::Afternoon,
            _ => MoodContext::Evening,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeatherMoodFactor {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Neutral,
}

/// Externally produced analysis of the free-text mood description.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MoodAnalysis {
    /// -5 (very negative) to +5 (very positive)
    pub sentiment_score: f64,
    #[serde(default)]
    pub emotional_keywords: Vec<String>,
    #[serde(default)]
    pub recommended_activities: Vec<String>,
}

/// The five validated self-report axes, each in `[1, 10]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct MoodDimensions {
    pub energy_level: u8,
    pub stress_level: u8,
    pub focus_level: u8,
    pub social_desire: u8,
    pub challenge_seeking: u8,
}

impl MoodDimensions {
    pub fn new(
        energy_level: u8,
        stress_level: u8,
        focus_level: u8,
        social_desire: u8,
        challenge_seeking: u8,
    ) -> Result<Self, WellnessError> {
        let dims = Self {
            energy_level,
            stress_level,
            focus_level,
            social_desire,
            challenge_seeking,
        };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> Result<(), WellnessError> {
        for (name, value) in self.named() {
            check_dimension(name, Some(value))?;
        }
        Ok(())
    }

    /// Composite mood score: `(energy + (10 - stress) + focus + social + challenge) / 5`.
    pub fn mood_score(&self) -> f64 {
        (f64::from(self.energy_level)
            + (10.0 - f64::from(self.stress_level))
            + f64::from(self.focus_level)
            + f64::from(self.social_desire)
            + f64::from(self.challenge_seeking))
            / 5.0
    }

    fn named(&self) -> [(&'static str, u8); 5] {
        [
            ("energy_level", self.energy_level),
            ("stress_level", self.stress_level),
            ("focus_level", self.focus_level),
            ("social_desire", self.social_desire),
            ("challenge_seeking", self.challenge_seeking),
        ]
    }
}

fn check_dimension(name: &str, value: Option<u8>) -> Result<u8, WellnessError> {
    match value {
        None => Err(WellnessError::InvalidInput(format!("{name} is missing"))),
        Some(v) if !(DIMENSION_MIN..=DIMENSION_MAX).contains(&v) => Err(
            WellnessError::InvalidInput(format!("{name} must be in 1..=10, got {v}")),
        ),
        Some(v) => Ok(v),
    }
}

/// Maps any fractional, negative or out-of-`u8` value to 0 so the entry is
/// later rejected by [`MoodEntry::dimensions`] instead of failing the whole
/// payload. Whole floats such as `5.0` are kept.
fn lenient_dimension<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u8>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(d)?;
    Ok(raw.map(|v| {
        v.as_u64()
            .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u8::try_from(n).ok())
            .unwrap_or(0)
    }))
}

/// One stored mood self-report.
///
/// The dimensions are optional because stored records can be incomplete;
/// use [`MoodEntry::dimensions`] to get the validated view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MoodEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub energy_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub stress_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub focus_level: Option<u8>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub social_desire: Option<u8>,
    #[serde(default, deserialize_with = "lenient_dimension")]
    pub challenge_seeking: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_analysis: Option<MoodAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<MoodContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_mood_factor: Option<WeatherMoodFactor>,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    /// Build an entry from validated dimensions; the context bucket uses the
    /// local hour of `created_at`.
    pub fn new(dims: MoodDimensions, created_at: DateTime<Utc>) -> Self {
        Self::new_in(dims, created_at, &Local)
    }

    /// Like [`MoodEntry::new`], bucketing the context by the hour in `tz`.
    pub fn new_in<Tz: TimeZone>(dims: MoodDimensions, created_at: DateTime<Utc>, tz: &Tz) -> Self {
        Self {
            id: None,
            energy_level: Some(dims.energy_level),
            stress_level: Some(dims.stress_level),
            focus_level: Some(dims.focus_level),
            social_desire: Some(dims.social_desire),
            challenge_seeking: Some(dims.challenge_seeking),
            mood_text: None,
            mood_analysis: None,
            context: Some(MoodContext::from_hour(created_at.with_timezone(tz).hour())),
            weather_mood_factor: None,
            created_at,
        }
    }

    /// Build the entry recorded after a free-text analysis: the estimated
    /// dimensions replace slider input and the supportive message becomes
    /// the stored mood text.
    pub fn from_text_analysis(analysis: &TextMoodAnalysis, created_at: DateTime<Utc>) -> Self {
        let mut entry = Self::new(analysis.mood_dimensions, created_at);
        entry.mood_text = Some(if analysis.supportive_message.trim().is_empty() {
            "Analyzed from text input".to_string()
        } else {
            analysis.supportive_message.clone()
        });
        entry.mood_analysis = Some(analysis.to_mood_analysis());
        entry
    }

    /// Validated dimensions, or `InvalidInput` naming the first missing or
    /// out-of-range axis.
    pub fn dimensions(&self) -> Result<MoodDimensions, WellnessError> {
        Ok(MoodDimensions {
            energy_level: check_dimension("energy_level", self.energy_level)?,
            stress_level: check_dimension("stress_level", self.stress_level)?,
            focus_level: check_dimension("focus_level", self.focus_level)?,
            social_desire: check_dimension("social_desire", self.social_desire)?,
            challenge_seeking: check_dimension("challenge_seeking", self.challenge_seeking)?,
        })
    }

    pub fn is_usable(&self) -> bool {
        self.dimensions().is_ok()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum Genre {
    Action,
    Adventure,
    #[serde(rename = "RPG")]
    Rpg,
    Strategy,
    Puzzle,
    Simulation,
    Sports,
    Racing,
    Fighting,
    Shooter,
    Platformer,
    Indie,
    Casual,
    Educational,
    Horror,
    Survival,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum Platform {
    #[serde(rename = "PC")]
    Pc,
    PlayStation,
    Xbox,
    #[serde(rename = "Nintendo Switch")]
    NintendoSwitch,
    Mobile,
    #[serde(rename = "Web Browser")]
    WebBrowser,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MoodTag {
    Calming,
    Energizing,
    Challenging,
    Social,
    Solo,
    Creative,
    Competitive,
    Relaxing,
    FocusBuilding,
    StressRelief,
    Mindful,
    Escapist,
    Therapeutic,
    Uplifting,
    Meditative,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StressCompatibility {
    LowStressOnly,
    MediumStressOk,
    HighStressFriendly,
    AnyStress,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum SessionLength {
    #[serde(rename = "quick_5min")]
    Quick5Min,
    #[serde(rename = "short_15min")]
    Short15Min,
    #[serde(rename = "medium_30min")]
    Medium30Min,
    #[serde(rename = "long_1hour")]
    Long1Hour,
    #[serde(rename = "extended_2plus_hours")]
    Extended2PlusHours,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityFeature {
    ColorblindFriendly,
    SubtitleSupport,
    OneHandedPlay,
    LowMotion,
    ScreenReaderCompatible,
    AdjustableDifficulty,
    PauseFriendly,
    AdhdFriendly,
    AnxietyFriendly,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum PriceRange {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "under_10")]
    Under10,
    #[serde(rename = "10_to_30")]
    From10To30,
    #[serde(rename = "30_to_60")]
    From30To60,
    #[serde(rename = "over_60")]
    Over60,
}

/// Inclusive energy band a game suits best.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct EnergyRange {
    pub min: u8,
    pub max: u8,
}

impl EnergyRange {
    pub fn contains(&self, energy: u8) -> bool {
        energy >= self.min && energy <= self.max
    }
}

/// One catalog entry recommendations are scored against.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub mood_tags: Vec<MoodTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideal_energy_range: Option<EnergyRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_compatibility: Option<StressCompatibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_length: Option<SessionLength>,
    #[serde(default)]
    pub accessibility_features: Vec<AccessibilityFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wellness_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
}

impl GameRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            genres: Vec::new(),
            platforms: Vec::new(),
            mood_tags: Vec::new(),
            ideal_energy_range: None,
            stress_compatibility: None,
            session_length: None,
            accessibility_features: Vec::new(),
            wellness_rating: None,
            image_url: None,
            price_range: None,
        }
    }

    pub fn has_tag(&self, tag: MoodTag) -> bool {
        self.mood_tags.contains(&tag)
    }

    pub fn has_any_tag(&self, tags: &[MoodTag]) -> bool {
        tags.iter().any(|t| self.has_tag(*t))
    }

    /// Check the numeric catalog fields against their documented ranges.
    pub fn validate(&self) -> Result<(), WellnessError> {
        if self.title.trim().is_empty() {
            return Err(WellnessError::InvalidInput("title is empty".into()));
        }
        if let Some(range) = self.ideal_energy_range {
            let bounds = DIMENSION_MIN..=DIMENSION_MAX;
            if !bounds.contains(&range.min) || !bounds.contains(&range.max) {
                return Err(WellnessError::InvalidInput(format!(
                    "ideal_energy_range {}..={} outside 1..=10",
                    range.min, range.max
                )));
            }
            if range.min > range.max {
                return Err(WellnessError::InvalidInput(format!(
                    "ideal_energy_range min {} exceeds max {}",
                    range.min, range.max
                )));
            }
        }
        if let Some(rating) = self.wellness_rating {
            if !(1.0..=5.0).contains(&rating) {
                return Err(WellnessError::InvalidInput(format!(
                    "wellness_rating must be in 1..=5, got {rating}"
                )));
            }
        }
        Ok(())
    }
}

/// Validate a whole catalog, collecting `(index, error)` for each bad record.
pub fn validate_catalog(catalog: &[GameRecord]) -> Vec<(usize, WellnessError)> {
    catalog
        .iter()
        .enumerate()
        .filter_map(|(i, game)| game.validate().err().map(|e| (i, e)))
        .collect()
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionContext {
    StressRelief,
    EnergyBoost,
    FocusTraining,
    SocialConnection,
    CreativeOutlet,
    MindfulBreak,
    Entertainment,
    ChallengeSeeking,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WellnessActivity {
    BreathingExercise,
    PostureCheck,
    EyeRest,
    HydrationReminder,
    Stretching,
    MindfulMoment,
}

/// A game played from a recommendation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct GameSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub game_id: String,
    pub pre_mood_entry_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_mood_entry_id: Option<String>,
    pub duration_minutes: u32,
    /// 1 to 5
    pub satisfaction_rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_improvement_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_context: Option<SessionContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_reminders_used: Option<bool>,
    #[serde(default)]
    pub wellness_activities: Vec<WellnessActivity>,
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    pub fn has_valid_rating(&self) -> bool {
        (1.0..=5.0).contains(&self.satisfaction_rating)
    }

    /// At least one minute played and a rating in `[1, 5]`.
    pub fn is_valid(&self) -> bool {
        self.duration_minutes >= 1 && self.has_valid_rating()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WellnessGoal {
    StressManagement,
    MoodImprovement,
    BalancedGaming,
    MindfulBreaks,
    SocialConnection,
    FocusEnhancement,
    CreativityBoost,
    Relaxation,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityNeed {
    ColorblindSupport,
    SubtitleRequired,
    OneHandedControls,
    MotionSensitivity,
    ScreenReader,
    AnxietyAccommodations,
    AdhdAccommodations,
    AutismAccommodations,
}

/// Profile fields the aggregator and dashboard read.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub wellness_streak: u32,
    #[serde(default)]
    pub total_wellness_score: f64,
    #[serde(default)]
    pub wellness_goals: Vec<WellnessGoal>,
    #[serde(default)]
    pub preferred_platforms: Vec<Platform>,
    #[serde(default)]
    pub favorite_genres: Vec<Genre>,
    #[serde(default)]
    pub accessibility_needs: Vec<AccessibilityNeed>,
}
