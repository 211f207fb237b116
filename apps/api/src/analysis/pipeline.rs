//! Analysis pipeline: one job-description submission in, one draft record out.
//!
//! Flow: extract_skills → {base_score, company intel, checklist, plan, questions}.
//! Every stage reads the same extraction and nothing else, so the draft is a
//! pure function of the input apart from the intel timestamp.

use serde::Deserialize;
use tracing::debug;

use crate::analysis::company_intel::generate_company_intel;
use crate::analysis::content::{generate_7day_plan, generate_checklist, generate_questions};
use crate::analysis::scoring::base_score;
use crate::analysis::skills::extract_skills;
use crate::models::analysis::AnalysisDraft;

/// A submission from the presentation layer. `company` and `role` may be empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub jd_text: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
}

/// Runs the full pipeline. Callers reject empty `jd_text` before getting here.
pub fn analyze(input: &AnalysisInput) -> AnalysisDraft {
    let company = input.company.trim();
    let role = input.role.trim();

    let extracted_skills = extract_skills(&input.jd_text);
    debug!(
        "Extracted {} skills across {:?}",
        extracted_skills.total_skill_count(),
        extracted_skills
            .iter()
            .map(|(_, m)| m.display_name.as_str())
            .collect::<Vec<_>>()
    );

    let base_score = base_score(&extracted_skills, company, role, &input.jd_text);
    let company_intel = generate_company_intel(company, &extracted_skills, &input.jd_text);

    AnalysisDraft {
        company: company.to_string(),
        role: role.to_string(),
        jd_text: input.jd_text.clone(),
        checklist: generate_checklist(&extracted_skills),
        plan: generate_7day_plan(&extracted_skills),
        questions: generate_questions(&extracted_skills),
        base_score,
        company_intel,
        extracted_skills,
    }
}
