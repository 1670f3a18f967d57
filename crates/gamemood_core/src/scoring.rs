//! Mood-to-game recommendation scoring.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::WellnessError;
use crate::model::{
    GameRecord, MoodDimensions, MoodEntry, MoodTag, Platform, SessionContext, SessionLength,
    StressCompatibility,
};
use crate::observability;

pub const BASE_SCORE: f64 = 50.0;
pub const MIN_MATCH_SCORE: u8 = 10;
pub const MAX_MATCH_SCORE: u8 = 98;
/// Lowest score shown under the "top matches" filter.
pub const HIGH_MATCH_THRESHOLD: u8 = 80;

/// A catalog entry together with its match score for one mood.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct RankedGame {
    #[serde(flatten)]
    pub game: GameRecord,
    pub match_score: u8,
}

/// Score every catalog entry against `mood` and rank them best first.
///
/// Ties keep catalog order. Fails with `InvalidInput` when the mood entry is
/// missing a dimension or has one out of range.
pub fn score_games(
    mood: &MoodEntry,
    catalog: &[GameRecord],
) -> Result<Vec<RankedGame>, WellnessError> {
    let dims = mood.dimensions()?;
    let mut ranked: Vec<RankedGame> = catalog
        .iter()
        .map(|game| RankedGame {
            game: game.clone(),
            match_score: match_score(&dims, game),
        })
        .collect();
    // `sort_by` is stable, so equal scores stay in catalog order.
    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));

    observability::record_games_scored(ranked.len());
    tracing::debug!(
        games = ranked.len(),
        top = ranked.first().map(|r| r.match_score),
        "scored catalog"
    );
    Ok(ranked)
}

/// Match score of a single game, clamped to `[10, 98]`.
pub fn match_score(mood: &MoodDimensions, game: &GameRecord) -> u8 {
    let mut score = BASE_SCORE;

    if let Some(range) = game.ideal_energy_range {
        score += if range.contains(mood.energy_level) {
            15.0
        } else {
            -10.0
        };
    }

    score += stress_bonus(mood.stress_level, game.stress_compatibility);
    score += tag_bonus(mood, game);
    score += session_length_bonus(mood.focus_level, game.session_length);

    if let Some(rating) = game.wellness_rating {
        score += rating * 2.0;
    }

    let clamped = score.clamp(f64::from(MIN_MATCH_SCORE), f64::from(MAX_MATCH_SCORE));
    clamped.round() as u8
}

fn stress_bonus(stress: u8, compatibility: Option<StressCompatibility>) -> f64 {
    let Some(compatibility) = compatibility else {
        return 0.0;
    };
    let mut bonus = 0.0;
    if stress <= 3 && compatibility == StressCompatibility::LowStressOnly {
        bonus += 15.0;
    }
    if stress <= 6 && compatibility == StressCompatibility::MediumStressOk {
        bonus += 10.0;
    }
    if stress > 6 && compatibility == StressCompatibility::HighStressFriendly {
        bonus += 15.0;
    }
    if compatibility == StressCompatibility::AnyStress {
        bonus += 5.0;
    }
    bonus
}

fn tag_bonus(mood: &MoodDimensions, game: &GameRecord) -> f64 {
    let rules: [(bool, MoodTag, f64); 8] = [
        (mood.energy_level >= 7, MoodTag::Energizing, 10.0),
        (mood.stress_level >= 7, MoodTag::StressRelief, 15.0),
        (mood.focus_level >= 7, MoodTag::FocusBuilding, 10.0),
        (mood.social_desire >= 7, MoodTag::Social, 12.0),
        (mood.social_desire <= 4, MoodTag::Solo, 12.0),
        (mood.challenge_seeking >= 7, MoodTag::Challenging, 10.0),
        (mood.energy_level <= 4, MoodTag::Relaxing, 15.0),
        (mood.stress_level >= 6, MoodTag::Calming, 12.0),
    ];
    rules
        .into_iter()
        .filter(|(applies, tag, _)| *applies && game.has_tag(*tag))
        .map(|(_, _, bonus)| bonus)
        .sum()
}

fn session_length_bonus(focus: u8, length: Option<SessionLength>) -> f64 {
    match length {
        Some(SessionLength::Quick5Min) if focus <= 4 => 10.0,
        Some(SessionLength::Extended2PlusHours) if focus >= 7 => 8.0,
        _ => 0.0,
    }
}

/// Category tabs offered over a ranked list.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    HighMatch,
    StressRelief,
    EnergyBoost,
    Focus,
    Social,
}

impl CategoryFilter {
    fn matches(&self, ranked: &RankedGame) -> bool {
        let game = &ranked.game;
        match self {
            CategoryFilter::All => true,
            CategoryFilter::HighMatch => ranked.match_score >= HIGH_MATCH_THRESHOLD,
            CategoryFilter::StressRelief => game.has_any_tag(&[
                MoodTag::StressRelief,
                MoodTag::Calming,
                MoodTag::Relaxing,
            ]),
            CategoryFilter::EnergyBoost => {
                game.has_any_tag(&[MoodTag::Energizing, MoodTag::Uplifting])
            }
            CategoryFilter::Focus => game.has_any_tag(&[MoodTag::FocusBuilding, MoodTag::Mindful]),
            CategoryFilter::Social => {
                game.has_tag(MoodTag::Social)
                    || game
                        .platforms
                        .iter()
                        .any(|p| matches!(p, Platform::PlayStation | Platform::Xbox | Platform::Pc))
            }
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct RecommendationFilter {
    #[serde(default)]
    pub category: CategoryFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_length: Option<SessionLength>,
}

/// Narrow a ranked list, keeping its order.
pub fn filter_recommendations(
    ranked: &[RankedGame],
    filter: &RecommendationFilter,
) -> Vec<RankedGame> {
    ranked
        .iter()
        .filter(|r| filter.category.matches(r))
        .filter(|r| match filter.platform {
            Some(platform) => r.game.platforms.contains(&platform),
            None => true,
        })
        .filter(|r| match filter.session_length {
            Some(length) => r.game.session_length == Some(length),
            None => true,
        })
        .cloned()
        .collect()
}

/// Rounded mean match score, `None` for an empty list.
pub fn average_match_score(ranked: &[RankedGame]) -> Option<u8> {
    if ranked.is_empty() {
        return None;
    }
    let total: u32 = ranked.iter().map(|r| u32::from(r.match_score)).sum();
    Some((f64::from(total) / ranked.len() as f64).round() as u8)
}

/// Reason recorded on a session started from a recommendation.
pub fn session_context_for(mood: &MoodDimensions) -> SessionContext {
    if mood.stress_level >= 7 {
        SessionContext::StressRelief
    } else if mood.energy_level <= 4 {
        SessionContext::EnergyBoost
    } else if mood.focus_level >= 7 {
        SessionContext::FocusTraining
    } else if mood.social_desire >= 7 {
        SessionContext::SocialConnection
    } else {
        SessionContext::Entertainment
    }
}

/// One-paragraph plain-language reading of a mood.
pub fn mood_summary(mood: &MoodDimensions) -> String {
    let energy = match mood.energy_level {
        7.. => "energetic ",
        ..=4 => "low-energy ",
        _ => "moderately energetic ",
    };
    let stress = match mood.stress_level {
        7.. => "and stressed. ",
        ..=3 => "and calm. ",
        _ => "with some stress. ",
    };
    let focus = match mood.focus_level {
        7.. => "You're highly focused ",
        ..=4 => "You're having trouble focusing ",
        _ => "You have decent focus ",
    };
    let social = match mood.social_desire {
        7.. => "and want social interaction.",
        ..=4 => "and prefer solo activities.",
        _ => "and are neutral about social interaction.",
    };
    format!("Based on your mood, you seem to be feeling {energy}{stress}{focus}{social}")
}
