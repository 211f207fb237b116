//! Company Intelligence: offline heuristics for company size, industry, hiring
//! focus, and the likely interview pipeline.
//!
//! Nothing here looks anything up. Size comes from a fixed list of well-known
//! enterprise names, industry from keyword tables, rounds from per-tier templates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::skills::{ExtractedSkills, SkillCategory};

const DEFAULT_INDUSTRY: &str = "Technology Services";

const ENTERPRISE_COMPANIES: &[&str] = &[
    "accenture",
    "adobe",
    "amazon",
    "apple",
    "atlassian",
    "bosch",
    "capgemini",
    "cisco",
    "cognizant",
    "deloitte",
    "ey",
    "flipkart",
    "google",
    "hcl",
    "hp",
    "ibm",
    "infosys",
    "intel",
    "jp morgan",
    "jpmorgan",
    "kpmg",
    "microsoft",
    "oracle",
    "pwc",
    "salesforce",
    "sap",
    "tcs",
    "tata",
    "tech mahindra",
    "uber",
    "wipro",
    "walmart",
    "wells fargo",
];

/// Ordered industry table; the first row with any keyword hit wins.
const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Financial Services",
        &["bank", "finance", "fintech", "capital", "investment", "trading"],
    ),
    (
        "E-commerce",
        &["ecommerce", "e-commerce", "retail", "marketplace", "shopping"],
    ),
    ("Cloud Services", &["cloud", "aws", "azure", "saas", "paas"]),
    (
        "Consulting",
        &["consulting", "advisory", "accenture", "deloitte", "pwc", "kpmg", "ey"],
    ),
    ("Automotive", &["automotive", "car", "vehicle", "bosch"]),
    (
        "IT Services",
        &["tcs", "infosys", "wipro", "hcl", "cognizant", "tech mahindra", "capgemini"],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Midsize,
    Enterprise,
}

impl CompanySize {
    pub fn label(self) -> &'static str {
        match self {
            CompanySize::Startup => "Startup (<200 employees)",
            CompanySize::Midsize => "Mid-size (200-2,000 employees)",
            CompanySize::Enterprise => "Enterprise (2,000+ employees)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiringFocus {
    pub title: String,
    pub points: Vec<String>,
}

/// One stage of an inferred interview pipeline. Position in the list is the stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub title: String,
    pub focus: String,
    #[serde(rename = "why")]
    pub rationale: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyIntel {
    pub company_name: String,
    pub industry: String,
    pub company_size: CompanySize,
    pub size_label: String,
    pub hiring_focus: HiringFocus,
    pub rounds: Vec<Round>,
    pub generated_at: DateTime<Utc>,
}

/// Infers the size tier from a free-text company name.
///
/// A name matches a known enterprise when either string contains the other,
/// so "Amazon Web Services" and "amaz" both land on enterprise. There is no
/// name-based path to `Midsize`.
pub fn infer_company_size(company_name: &str) -> CompanySize {
    let normalized = company_name.trim().to_lowercase();
    if normalized.is_empty() {
        return CompanySize::Startup;
    }

    let is_enterprise = ENTERPRISE_COMPANIES
        .iter()
        .any(|known| normalized.contains(known) || known.contains(normalized.as_str()));

    if is_enterprise {
        CompanySize::Enterprise
    } else {
        CompanySize::Startup
    }
}

/// Infers an industry label from the company name plus the JD text.
pub fn infer_industry(company_name: &str, jd_text: &str) -> String {
    if company_name.is_empty() {
        return DEFAULT_INDUSTRY.to_string();
    }

    let haystack = format!("{company_name} {jd_text}").to_lowercase();

    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(industry, _)| industry.to_string())
        .unwrap_or_else(|| DEFAULT_INDUSTRY.to_string())
}

pub fn hiring_focus(size: CompanySize) -> HiringFocus {
    let (title, points): (&str, [&str; 4]) = match size {
        CompanySize::Enterprise => (
            "Structured DSA + Core Fundamentals",
            [
                "Strong emphasis on data structures and algorithms",
                "Core CS subjects (OS, DBMS, Networks, OOPS)",
                "Multiple rounds with increasing difficulty",
                "Focus on problem-solving patterns and optimization",
            ],
        ),
        CompanySize::Midsize => (
            "Balanced Mix: DSA + Practical Skills",
            [
                "Moderate DSA expectations with practical coding",
                "Some focus on specific tech stack experience",
                "Project discussion and implementation details",
                "Problem-solving with business context",
            ],
        ),
        CompanySize::Startup => (
            "Practical Problem Solving + Stack Depth",
            [
                "Hands-on coding in specific frameworks/technologies",
                "Real-world problem solving over theoretical DSA",
                "Quick proof of skills through take-home or live coding",
                "Cultural fit and learning agility emphasized",
            ],
        ),
    };

    HiringFocus {
        title: title.to_string(),
        points: points.iter().map(|p| p.to_string()).collect(),
    }
}

fn round(title: &str, focus: &str, rationale: &str, duration: &str) -> Round {
    Round {
        title: title.to_string(),
        focus: focus.to_string(),
        rationale: rationale.to_string(),
        duration: duration.to_string(),
    }
}

/// Builds the interview pipeline for `size`, with focus text switched on detected skills.
///
/// Enterprise: round 3 depends on Core CS. Mid-size and startup: rounds 1 and 2
/// depend on whether Web or Languages was detected.
pub fn generate_round_mapping(size: CompanySize, extracted: &ExtractedSkills) -> Vec<Round> {
    let has_dsa = extracted.has(SkillCategory::CoreCs);
    let hands_on =
        extracted.has(SkillCategory::Web) || extracted.has(SkillCategory::Languages);

    match size {
        CompanySize::Enterprise => vec![
            round(
                "Round 1: Online Assessment",
                "DSA + Aptitude + Core CS MCQs",
                "Filters large applicant pools efficiently. Tests foundational problem-solving and CS knowledge.",
                "60-90 mins",
            ),
            round(
                "Round 2: Technical Interview I",
                "DSA Deep Dive (Arrays, Strings, Trees, DP)",
                "Validates algorithmic thinking and coding proficiency. Checks if you can optimize solutions.",
                "45-60 mins",
            ),
            round(
                "Round 3: Technical Interview II",
                if has_dsa {
                    "Advanced DSA + System Design Basics"
                } else {
                    "Technical Skills + Projects"
                },
                "Assesses depth in problem-solving and design thinking. Ensures you can handle complex scenarios.",
                "60 mins",
            ),
            round(
                "Round 4: HR/Managerial",
                "Behavioral Questions + Cultural Fit",
                "Evaluates communication, teamwork, and alignment with company values.",
                "30-45 mins",
            ),
        ],
        CompanySize::Midsize => vec![
            round(
                "Round 1: Initial Screening",
                if hands_on {
                    "Practical Coding Challenge"
                } else {
                    "DSA + Technical MCQs"
                },
                "Quick filter to assess baseline technical skills and interest.",
                "30-60 mins",
            ),
            round(
                "Round 2: Technical Discussion",
                if hands_on {
                    "Tech Stack + Live Coding"
                } else {
                    "DSA + Core CS Concepts"
                },
                "Tests your hands-on experience and ability to explain technical decisions.",
                "45-60 mins",
            ),
            round(
                "Round 3: Final Round",
                "Projects + Behavioral + Hiring Manager",
                "Validates real-world experience and ensures good team fit.",
                "45 mins",
            ),
        ],
        CompanySize::Startup => vec![
            round(
                "Round 1: Practical Task",
                if hands_on {
                    "Build a small feature/component"
                } else {
                    "Solve a real-world problem"
                },
                "Startups need proof of immediate contribution. This tests your ability to ship working code.",
                "Take-home (2-4 hours)",
            ),
            round(
                "Round 2: Technical Deep Dive",
                if hands_on {
                    "Code review + Discussion on approach"
                } else {
                    "Live problem solving + Stack discussion"
                },
                "Assesses code quality, thought process, and collaboration style.",
                "60 mins",
            ),
            round(
                "Round 3: Culture + Vision Fit",
                "Meet the team, discuss growth mindset",
                "Startups value adaptability and passion. This ensures you align with their mission and pace.",
                "30-45 mins",
            ),
        ],
    }
}

/// Composes size, industry, hiring focus and rounds for one analysis.
pub fn generate_company_intel(
    company_name: &str,
    extracted: &ExtractedSkills,
    jd_text: &str,
) -> CompanyIntel {
    let company_size = infer_company_size(company_name);

    CompanyIntel {
        company_name: company_name.to_string(),
        industry: infer_industry(company_name, jd_text),
        company_size,
        size_label: company_size.label().to_string(),
        hiring_focus: hiring_focus(company_size),
        rounds: generate_round_mapping(company_size, extracted),
        generated_at: Utc::now(),
    }
}
