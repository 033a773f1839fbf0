use serde::{Deserialize, Serialize};

use super::domain::EsgAnswer;
use super::scoring::ScoringConfig;

const MAX_QUESTION_SCORE: i32 = 3;

/// Maturity tier derived from the normalized 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaturityLevel {
    Initial,
    Managed,
    Defined,
    Strategic,
    Optimized,
}

impl MaturityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "Initial",
            Self::Managed => "Managed",
            Self::Defined => "Defined",
            Self::Strategic => "Strategic",
            Self::Optimized => "Optimized",
        }
    }
}

/// Normalized assessment outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsgScore {
    pub overall_score: u32,
    pub level: MaturityLevel,
}

/// Breakdown for one pillar of the question catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScore {
    pub scoring: u32,
    pub progress: u32,
    pub answered: usize,
    pub total: usize,
}

fn clamp_score(raw: i32) -> i32 {
    raw.clamp(0, MAX_QUESTION_SCORE)
}

/// Normalize a full answer set against the standard's question count.
///
/// Scores are clamped to 0..=3 before summation so corrupt stored values
/// cannot push the result out of range, and the summed ratio is capped at
/// 1.0 so an answer set longer than the question catalog cannot either.
/// The denominator is the standard's fixed question count, so
/// partially-completed assessments score lower instead of scoring against
/// only the answered subset.
pub fn score(answers: &[EsgAnswer], total_question_count: usize, config: &ScoringConfig) -> EsgScore {
    let max_possible = (total_question_count.max(1) * MAX_QUESTION_SCORE as usize) as f64;
    let total: i64 = answers
        .iter()
        .map(|answer| clamp_score(answer.maturity_score) as i64)
        .sum();

    let ratio = (total as f64 / max_possible).min(1.0);
    let overall_score = (ratio * 100.0).round() as u32;
    EsgScore {
        overall_score,
        level: config.maturity_bands.level_for(overall_score),
    }
}

/// Score the subset of answers belonging to one pillar's question ids.
pub fn pillar_score(answers: &[EsgAnswer], pillar_question_ids: &[String]) -> PillarScore {
    let total = pillar_question_ids.len();
    if total == 0 {
        return PillarScore {
            scoring: 0,
            progress: 0,
            answered: 0,
            total: 0,
        };
    }

    let pillar_answers: Vec<&EsgAnswer> = answers
        .iter()
        .filter(|answer| pillar_question_ids.contains(&answer.question_id))
        .collect();
    let answered = pillar_answers.len();

    let max_possible = (total * MAX_QUESTION_SCORE as usize) as f64;
    let sum: i64 = pillar_answers
        .iter()
        .map(|answer| clamp_score(answer.maturity_score) as i64)
        .sum();

    PillarScore {
        scoring: ((sum as f64 / max_possible).min(1.0) * 100.0).round() as u32,
        progress: ((answered as f64 / total as f64).min(1.0) * 100.0).round() as u32,
        answered,
        total,
    }
}
