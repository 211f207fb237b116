use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::company_intel::CompanyIntel;
use crate::analysis::content::{Checklist, StudyPlan};
use crate::analysis::scoring::{live_score, Confidence};
use crate::analysis::skills::ExtractedSkills;

/// Output of one analysis run, before the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDraft {
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: ExtractedSkills,
    pub checklist: Checklist,
    pub plan: StudyPlan,
    pub questions: Vec<String>,
    pub base_score: u8,
    pub company_intel: CompanyIntel,
}

/// A persisted analysis.
///
/// Everything except `skill_confidence_map`, `final_score` and `updated_at` is
/// fixed at creation. `final_score` is always derived from `base_score` and the
/// confidence map; it is never read back from storage.
///
/// Ids and timestamps are opaque strings so that histories written by older
/// clients (millisecond ids, ISO timestamps) stay loadable. Decoding from
/// storage goes through `history::validation::decode_record`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub company: String,
    pub role: String,
    pub jd_text: String,
    pub extracted_skills: ExtractedSkills,
    pub checklist: Checklist,
    pub plan: StudyPlan,
    pub questions: Vec<String>,
    pub base_score: u8,
    pub final_score: u8,
    pub skill_confidence_map: BTreeMap<String, Confidence>,
    pub company_intel: CompanyIntel,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl AnalysisRecord {
    pub fn from_draft(draft: AnalysisDraft, id: String, now: DateTime<Utc>) -> Self {
        let created_at = format_timestamp(now);
        let mut record = Self {
            id,
            updated_at: created_at.clone(),
            created_at,
            company: draft.company,
            role: draft.role,
            jd_text: draft.jd_text,
            extracted_skills: draft.extracted_skills,
            checklist: draft.checklist,
            plan: draft.plan,
            questions: draft.questions,
            base_score: draft.base_score,
            final_score: draft.base_score,
            skill_confidence_map: BTreeMap::new(),
            company_intel: draft.company_intel,
        };
        record.refresh_final_score();
        record
    }

    /// Records the user's confidence for `skill` and recomputes `final_score`.
    ///
    /// Callers are expected to have checked that `skill` is one of the record's
    /// extracted labels.
    pub fn set_skill_confidence(
        &mut self,
        skill: &str,
        confidence: Confidence,
        now: DateTime<Utc>,
    ) {
        self.skill_confidence_map
            .insert(skill.to_string(), confidence);
        self.refresh_final_score();
        self.updated_at = format_timestamp(now);
    }

    pub fn refresh_final_score(&mut self) {
        self.final_score = live_score(self.base_score, &self.skill_confidence_map);
    }
}

#[cfg(test)]
impl AnalysisRecord {
    /// True when every field fixed at creation matches `draft`.
    pub fn matches_draft(&self, draft: &AnalysisDraft) -> bool {
        self.company == draft.company
            && self.role == draft.role
            && self.jd_text == draft.jd_text
            && self.extracted_skills == draft.extracted_skills
            && self.checklist == draft.checklist
            && self.plan == draft.plan
            && self.questions == draft.questions
            && self.base_score == draft.base_score
            && self.company_intel == draft.company_intel
    }
}
