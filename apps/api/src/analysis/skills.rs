//! Skill Extractor: maps raw job-description text onto the fixed skill taxonomy.
//!
//! Matching is plain case-insensitive substring containment, keyword by keyword,
//! in taxonomy-declared order. No tokenisation, no stemming.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Closed set of taxonomy buckets.
///
/// Variant order is taxonomy order: `ExtractedSkills` iterates categories in
/// this order and the content generator relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "coreCS")]
    CoreCs,
    #[serde(rename = "languages")]
    Languages,
    #[serde(rename = "web")]
    Web,
    #[serde(rename = "data")]
    Data,
    #[serde(rename = "cloudDevOps")]
    CloudDevOps,
    #[serde(rename = "testing")]
    Testing,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 6] = [
        SkillCategory::CoreCs,
        SkillCategory::Languages,
        SkillCategory::Web,
        SkillCategory::Data,
        SkillCategory::CloudDevOps,
        SkillCategory::Testing,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            SkillCategory::CoreCs => "Core CS",
            SkillCategory::Languages => "Languages",
            SkillCategory::Web => "Web",
            SkillCategory::Data => "Data",
            SkillCategory::CloudDevOps => "Cloud/DevOps",
            SkillCategory::Testing => "Testing",
        }
    }

    /// Lowercase keywords, tested in this order.
    ///
    /// Some entries carry deliberate padding (`"go "`, `" c "`) so that they only
    /// hit as standalone words inside running text.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SkillCategory::CoreCs => CORE_CS_KEYWORDS,
            SkillCategory::Languages => LANGUAGE_KEYWORDS,
            SkillCategory::Web => WEB_KEYWORDS,
            SkillCategory::Data => DATA_KEYWORDS,
            SkillCategory::CloudDevOps => CLOUD_DEVOPS_KEYWORDS,
            SkillCategory::Testing => TESTING_KEYWORDS,
        }
    }
}

const CORE_CS_KEYWORDS: &[&str] = &[
    "dsa",
    "data structures",
    "algorithms",
    "oop",
    "object oriented",
    "dbms",
    "database",
    "os",
    "operating system",
    "networks",
    "networking",
    "computer networks",
];

const LANGUAGE_KEYWORDS: &[&str] = &[
    "java",
    "python",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "golang",
    "go ",
    " c ",
    "rust",
    "kotlin",
    "swift",
];

const WEB_KEYWORDS: &[&str] = &[
    "react", "next.js", "nextjs", "node.js", "nodejs", "express", "rest", "restful", "api",
    "graphql", "vue", "angular", "html", "css", "frontend", "backend",
];

const DATA_KEYWORDS: &[&str] = &[
    "sql",
    "mongodb",
    "postgresql",
    "postgres",
    "mysql",
    "redis",
    "nosql",
    "cassandra",
    "dynamodb",
    "firebase",
];

const CLOUD_DEVOPS_KEYWORDS: &[&str] = &[
    "aws",
    "azure",
    "gcp",
    "google cloud",
    "docker",
    "kubernetes",
    "k8s",
    "ci/cd",
    "jenkins",
    "github actions",
    "linux",
    "devops",
    "terraform",
];

const TESTING_KEYWORDS: &[&str] = &[
    "selenium",
    "cypress",
    "playwright",
    "junit",
    "pytest",
    "testing",
    "jest",
    "mocha",
    "chai",
    "test automation",
];

/// Matches found for one detected category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    #[serde(rename = "name")]
    pub display_name: String,
    /// First-match order, no duplicates.
    #[serde(rename = "skills")]
    pub matched_labels: Vec<String>,
}

/// Sparse map of detected categories. A category is present only when at least
/// one of its keywords matched; absence means "not detected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedSkills(BTreeMap<SkillCategory, CategoryMatch>);

impl ExtractedSkills {
    pub fn has(&self, category: SkillCategory) -> bool {
        self.0.contains_key(&category)
    }

    /// Labels matched for `category`, empty when the category was not detected.
    pub fn labels(&self, category: SkillCategory) -> &[String] {
        self.0
            .get(&category)
            .map(|m| m.matched_labels.as_slice())
            .unwrap_or(&[])
    }

    /// Number of detected categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Detected categories in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &CategoryMatch)> {
        self.0.iter().map(|(category, m)| (*category, m))
    }

    /// Total matched labels across every category.
    pub fn total_skill_count(&self) -> usize {
        self.0.values().map(|m| m.matched_labels.len()).sum()
    }

    /// True when `label` was matched under any category. Case-sensitive.
    pub fn contains_label(&self, label: &str) -> bool {
        self.0
            .values()
            .any(|m| m.matched_labels.iter().any(|l| l == label))
    }
}

impl FromIterator<(SkillCategory, CategoryMatch)> for ExtractedSkills {
    fn from_iter<I: IntoIterator<Item = (SkillCategory, CategoryMatch)>>(iter: I) -> Self {
        ExtractedSkills(iter.into_iter().collect())
    }
}

/// Returns true when at least one category was detected.
pub fn has_skills(extracted: &ExtractedSkills) -> bool {
    !extracted.is_empty()
}

/// Extracts detected skill categories from `jd_text`.
///
/// Total over its input: empty text yields an empty map.
pub fn extract_skills(jd_text: &str) -> ExtractedSkills {
    if jd_text.is_empty() {
        return ExtractedSkills::default();
    }

    let normalized = jd_text.to_lowercase();
    let mut detected = BTreeMap::new();

    for category in SkillCategory::ALL {
        let mut labels: Vec<String> = Vec::new();

        for keyword in category.keywords() {
            if !normalized.contains(keyword) {
                continue;
            }
            let label = capitalize_first(keyword);
            if !labels.contains(&label) {
                labels.push(label);
            }
        }

        if !labels.is_empty() {
            detected.insert(
                category,
                CategoryMatch {
                    display_name: category.display_name().to_string(),
                    matched_labels: labels,
                },
            );
        }
    }

    ExtractedSkills(detected)
}

/// Upper-cases the first character only: "node.js" → "Node.js", " c " stays " c ".
fn capitalize_first(keyword: &str) -> String {
    let mut chars = keyword.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCENARIO_JD: &str = "We use React and Node.js for our REST API, PostgreSQL database, \
        and AWS for deployment. Must know Java and data structures.";

    #[test]
    fn test_empty_text_yields_empty_map() {
        let extracted = extract_skills("");
        assert!(extracted.is_empty());
        assert!(!has_skills(&extracted));
    }

    #[test]
    fn test_text_without_keywords_yields_empty_map() {
        assert!(extract_skills("We value kindness and punctuality.").is_empty());
    }

    #[test]
    fn test_scenario_categories() {
        let extracted = extract_skills(SCENARIO_JD);
        let categories: Vec<SkillCategory> = extracted.iter().map(|(c, _)| c).collect();
        assert_eq!(
            categories,
            vec![
                SkillCategory::CoreCs,
                SkillCategory::Languages,
                SkillCategory::Web,
                SkillCategory::Data,
                SkillCategory::CloudDevOps,
            ]
        );
        assert!(!extracted.has(SkillCategory::Testing));
    }

    #[test]
    fn test_scenario_labels_follow_keyword_order() {
        let extracted = extract_skills(SCENARIO_JD);
        assert_eq!(
            extracted.labels(SkillCategory::Web),
            ["React", "Node.js", "Rest", "Api"]
        );
        assert_eq!(extracted.labels(SkillCategory::Languages), ["Java"]);
        assert_eq!(
            extracted.labels(SkillCategory::Data),
            ["Sql", "Postgresql", "Postgres"]
        );
        assert_eq!(extracted.labels(SkillCategory::CloudDevOps), ["Aws"]);
        assert!(extracted
            .labels(SkillCategory::CoreCs)
            .contains(&"Data structures".to_string()));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let extracted = extract_skills("KUBERNETES and Docker");
        assert_eq!(
            extracted.labels(SkillCategory::CloudDevOps),
            ["Docker", "Kubernetes"]
        );
    }

    #[test]
    fn test_repeated_keyword_is_labelled_once() {
        let extracted = extract_skills("python python PYTHON");
        assert_eq!(extracted.labels(SkillCategory::Languages), ["Python"]);
    }

    #[test]
    fn test_javascript_also_matches_java() {
        let extracted = extract_skills("javascript");
        assert_eq!(
            extracted.labels(SkillCategory::Languages),
            ["Java", "Javascript"]
        );
    }

    #[test]
    fn test_display_name_and_serialized_shape() {
        let extracted = extract_skills("jest");
        let json = serde_json::to_value(&extracted).unwrap();
        assert_eq!(json["testing"]["name"], "Testing");
        assert_eq!(json["testing"]["skills"][0], "Jest");
        let back: ExtractedSkills = serde_json::from_value(json).unwrap();
        assert_eq!(back, extracted);
    }

    #[test]
    fn test_total_skill_count_sums_labels() {
        let extracted = extract_skills("react vue sql");
        assert_eq!(extracted.total_skill_count(), 3);
    }

    #[test]
    fn test_contains_label_matches_exact_labels() {
        let extracted = extract_skills(SCENARIO_JD);
        assert!(extracted.contains_label("Java"));
        assert!(extracted.contains_label("Node.js"));
        assert!(!extracted.contains_label("java"));
        assert!(!extracted.contains_label("Kotlin"));
        assert!(!ExtractedSkills::default().contains_label(""));
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("node.js"), "Node.js");
        assert_eq!(capitalize_first(" c "), " c ");
        assert_eq!(capitalize_first("c++"), "C++");
    }

    proptest! {
        #[test]
        fn prop_extraction_is_deterministic(text in ".{0,200}") {
            prop_assert_eq!(extract_skills(&text), extract_skills(&text));
        }

        #[test]
        fn prop_membership_iff_keyword_substring(text in "[a-zA-Z .+#/]{0,120}") {
            let extracted = extract_skills(&text);
            let lowered = text.to_lowercase();
            for category in SkillCategory::ALL {
                let any_hit = category.keywords().iter().any(|k| lowered.contains(k));
                prop_assert_eq!(extracted.has(category), any_hit);
            }
        }
    }
}
