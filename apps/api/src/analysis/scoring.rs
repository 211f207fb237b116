//! Readiness scoring: base score at submission time, live score from self-assessment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::skills::ExtractedSkills;

const BASE_SCORE: u32 = 35;
const PER_CATEGORY_POINTS: u32 = 5;
const CATEGORY_POINTS_CAP: u32 = 30;
const COMPANY_BONUS: u32 = 10;
const ROLE_BONUS: u32 = 10;
const LONG_JD_BONUS: u32 = 10;
/// JD length (in characters) that must be exceeded to earn `LONG_JD_BONUS`.
const LONG_JD_THRESHOLD: usize = 800;
const MAX_SCORE: u32 = 100;

/// Per-skill self-assessment toggled by the user after an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Know,
    Practice,
}

impl Confidence {
    fn delta(self) -> i32 {
        match self {
            Confidence::Know => 1,
            Confidence::Practice => -1,
        }
    }
}

/// Computes the readiness score frozen on a record at creation time.
///
/// 35 + min(5 × categories, 30) + 10 (company) + 10 (role) + 10 (JD > 800 units), capped at 100.
pub fn base_score(extracted: &ExtractedSkills, company: &str, role: &str, jd_text: &str) -> u8 {
    let mut score = BASE_SCORE;

    let categories = u32::try_from(extracted.len()).unwrap_or(u32::MAX);
    score += categories
        .saturating_mul(PER_CATEGORY_POINTS)
        .min(CATEGORY_POINTS_CAP);

    if !company.trim().is_empty() {
        score += COMPANY_BONUS;
    }
    if !role.trim().is_empty() {
        score += ROLE_BONUS;
    }
    // Length in UTF-16 code units, the unit stored histories were scored with.
    if jd_text.encode_utf16().count() > LONG_JD_THRESHOLD {
        score += LONG_JD_BONUS;
    }

    score.min(MAX_SCORE) as u8
}

/// Adjusts `base` by +1 per "know" and -1 per "practice", clamped to 0..=100.
///
/// Skills absent from the map contribute nothing. The result depends only on
/// the current map, never on the order in which toggles happened.
pub fn live_score(base: u8, confidence: &BTreeMap<String, Confidence>) -> u8 {
    let delta: i32 = confidence.values().map(|c| c.delta()).sum();
    (i32::from(base) + delta).clamp(0, MAX_SCORE as i32) as u8
}

/// Readiness bands, inclusive on their lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ReadinessLevel {
    pub fn label(self) -> &'static str {
        match self {
            ReadinessLevel::Excellent => "Excellent",
            ReadinessLevel::Good => "Good",
            ReadinessLevel::Fair => "Fair",
            ReadinessLevel::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Label plus colour classes for rendering a score badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessTier {
    pub level: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
}

pub fn readiness_level(score: u8) -> ReadinessLevel {
    match score {
        80..=u8::MAX => ReadinessLevel::Excellent,
        65..=79 => ReadinessLevel::Good,
        50..=64 => ReadinessLevel::Fair,
        _ => ReadinessLevel::NeedsImprovement,
    }
}

pub fn readiness_tier(score: u8) -> ReadinessTier {
    let level = readiness_level(score);
    let (color, bg_color) = match level {
        ReadinessLevel::Excellent => ("text-green-600", "bg-green-100"),
        ReadinessLevel::Good => ("text-blue-600", "bg-blue-100"),
        ReadinessLevel::Fair => ("text-yellow-600", "bg-yellow-100"),
        ReadinessLevel::NeedsImprovement => ("text-red-600", "bg-red-100"),
    };
    ReadinessTier {
        level: level.label(),
        color,
        bg_color,
    }
}
