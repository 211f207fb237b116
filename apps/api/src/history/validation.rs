//! Validity checks for persisted history loaded from storage.
//!
//! Stored blobs may be hand-edited, truncated, or written by an older build.
//! Records failing the shape check are dropped, never repaired. Records that
//! pass are decoded leniently by `decode_record`.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::analysis::company_intel::generate_company_intel;
use crate::analysis::content::{generate_7day_plan, generate_checklist, generate_questions};
use crate::analysis::scoring::{base_score, Confidence};
use crate::analysis::skills::{CategoryMatch, ExtractedSkills, SkillCategory};
use crate::models::analysis::AnalysisRecord;

/// Why a stored record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("missing string `id`")]
    MissingId,
    #[error("missing string `createdAt`")]
    MissingCreatedAt,
    #[error("missing string `jdText`")]
    MissingJdText,
    #[error("`extractedSkills` is not an object")]
    MissingExtractedSkills,
}

/// Outcome of cleaning one stored history list.
#[derive(Debug, Clone, Default)]
pub struct HistoryValidation {
    pub records: Vec<AnalysisRecord>,
    pub rejected: Vec<RejectReason>,
}

impl HistoryValidation {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Minimal shape a stored record must have: string `id`, `createdAt`, `jdText`
/// and an object `extractedSkills`.
pub fn check_record_shape(value: &Value) -> Result<(), RejectReason> {
    let is_string = |field: &str| value.get(field).is_some_and(Value::is_string);

    if !is_string("id") {
        return Err(RejectReason::MissingId);
    }
    if !is_string("createdAt") {
        return Err(RejectReason::MissingCreatedAt);
    }
    if !is_string("jdText") {
        return Err(RejectReason::MissingJdText);
    }
    if !value.get("extractedSkills").is_some_and(Value::is_object) {
        return Err(RejectReason::MissingExtractedSkills);
    }
    Ok(())
}

fn read_field<T: DeserializeOwned>(entry: &Value, field: &str) -> Option<T> {
    entry
        .get(field)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn read_string(entry: &Value, field: &str) -> Option<String> {
    entry.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Unknown categories and unreadable matches are skipped.
fn read_skills(entry: &Value) -> ExtractedSkills {
    let Some(object) = entry.get("extractedSkills").and_then(Value::as_object) else {
        return ExtractedSkills::default();
    };

    object
        .iter()
        .filter_map(|(key, value)| {
            let category: SkillCategory =
                serde_json::from_value(Value::String(key.clone())).ok()?;
            let matched: CategoryMatch = serde_json::from_value(value.clone()).ok()?;
            Some((category, matched))
        })
        .collect()
}

/// Keeps only entries for labels the record actually extracted.
fn read_confidence(entry: &Value, extracted: &ExtractedSkills) -> BTreeMap<String, Confidence> {
    let Some(object) = entry.get("skillConfidenceMap").and_then(Value::as_object) else {
        return BTreeMap::new();
    };

    object
        .iter()
        .filter(|(label, _)| extracted.contains_label(label))
        .filter_map(|(label, value)| {
            let confidence: Confidence = serde_json::from_value(value.clone()).ok()?;
            Some((label.clone(), confidence))
        })
        .collect()
}

/// Builds a record from an entry that passed `check_record_shape`.
///
/// Content derived from the skills (checklist, plan, questions, company intel)
/// is regenerated when missing or unreadable. `baseScore` is recomputed when
/// missing or above 100. `finalScore` is never trusted and always derived.
pub fn decode_record(entry: &Value) -> AnalysisRecord {
    let created_at = read_string(entry, "createdAt").unwrap_or_default();
    let company = read_string(entry, "company").unwrap_or_default();
    let role = read_string(entry, "role").unwrap_or_default();
    let jd_text = read_string(entry, "jdText").unwrap_or_default();
    let extracted_skills = read_skills(entry);

    let stored_base = read_field::<u8>(entry, "baseScore").filter(|score| *score <= 100);
    let base = stored_base
        .unwrap_or_else(|| base_score(&extracted_skills, &company, &role, &jd_text));

    let mut record = AnalysisRecord {
        id: read_string(entry, "id").unwrap_or_default(),
        updated_at: read_string(entry, "updatedAt").unwrap_or_else(|| created_at.clone()),
        created_at,
        checklist: read_field(entry, "checklist")
            .unwrap_or_else(|| generate_checklist(&extracted_skills)),
        plan: read_field(entry, "plan").unwrap_or_else(|| generate_7day_plan(&extracted_skills)),
        questions: read_field(entry, "questions")
            .unwrap_or_else(|| generate_questions(&extracted_skills)),
        company_intel: read_field(entry, "companyIntel")
            .unwrap_or_else(|| generate_company_intel(&company, &extracted_skills, &jd_text)),
        skill_confidence_map: read_confidence(entry, &extracted_skills),
        base_score: base,
        final_score: base,
        company,
        role,
        jd_text,
        extracted_skills,
    };
    record.refresh_final_score();
    record
}

/// Validates and decodes every entry, keeping order and dropping failures.
pub fn validate_history(entries: Vec<Value>) -> HistoryValidation {
    let mut result = HistoryValidation::default();

    for (index, entry) in entries.iter().enumerate() {
        match check_record_shape(entry) {
            Ok(()) => result.records.push(decode_record(entry)),
            Err(reason) => {
                warn!("Dropping malformed history entry at index {index}: {reason}");
                result.rejected.push(reason);
            }
        }
    }

    result
}
