//! Preparation content derived from detected skills: round-wise checklist,
//! 7-day plan, and likely interview questions.
//!
//! All text is fixed. Detected categories only decide which blocks are included
//! and in what order.

use serde::{Deserialize, Serialize};

use crate::analysis::skills::{ExtractedSkills, SkillCategory};

/// Maximum number of questions returned by `generate_questions`.
pub const QUESTION_LIMIT: usize = 10;

/// Round 3 sections shorter than this get the filler block appended.
const TECHNICAL_MIN_ITEMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSection {
    pub title: String,
    pub items: Vec<String>,
}

/// Round-wise checklist. Field order is round order and is preserved in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub round1: ChecklistSection,
    pub round2: ChecklistSection,
    pub round3: ChecklistSection,
    pub round4: ChecklistSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDay {
    pub title: String,
    pub tasks: Vec<String>,
}

/// Seven-day plan grouped as days 1-2, 3-4, 5, 6 and 7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub day1: PlanDay,
    pub day3: PlanDay,
    pub day5: PlanDay,
    pub day6: PlanDay,
    pub day7: PlanDay,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Checklist
// ────────────────────────────────────────────────────────────────────────────

const APTITUDE_ITEMS: &[&str] = &[
    "Practice quantitative aptitude (numbers, percentages, ratios)",
    "Solve logical reasoning puzzles",
    "Review verbal ability and comprehension",
    "Practice time management with mock tests",
    "Brush up on basic mathematics and statistics",
    "Review common aptitude question patterns",
    "Take at least 2 full-length mock aptitude tests",
];

const CORE_CS_ITEMS: &[&str] = &[
    "Master fundamental data structures (arrays, linked lists, trees, graphs)",
    "Practice common algorithms (sorting, searching, graph traversal)",
    "Review OOP concepts and design patterns",
    "Study DBMS fundamentals (normalization, transactions, indexing)",
    "Understand OS concepts (processes, threads, memory management)",
    "Review networking basics (TCP/IP, HTTP, DNS)",
];

const BASIC_DSA_ITEMS: &[&str] = &[
    "Learn basic data structures (arrays, linked lists, stacks, queues)",
    "Practice simple algorithms (sorting, searching)",
    "Understand basic programming concepts",
    "Review fundamental CS theory",
];

const LANGUAGE_ITEMS: &[&str] = &[
    "Practice coding problems in your primary language",
    "Understand language-specific features and best practices",
];

const WEB_ITEMS: &[&str] = &[
    "Review web development fundamentals (HTTP, REST APIs)",
    "Practice building small projects with detected frameworks",
    "Understand frontend-backend communication",
    "Review state management and component lifecycle",
];

const DATA_ITEMS: &[&str] = &[
    "Practice SQL queries (joins, subqueries, aggregations)",
    "Understand database design and indexing",
    "Review NoSQL vs SQL trade-offs",
];

const CLOUD_ITEMS: &[&str] = &[
    "Understand cloud service models (IaaS, PaaS, SaaS)",
    "Review containerization concepts and benefits",
    "Learn CI/CD pipeline basics",
];

const TESTING_ITEMS: &[&str] = &[
    "Understand testing pyramid (unit, integration, e2e)",
    "Practice writing test cases for common scenarios",
];

const TECHNICAL_FALLBACK_ITEMS: &[&str] = &[
    "Prepare to explain your projects in detail",
    "Practice live coding on a whiteboard or IDE",
    "Review your resume and be ready to discuss each point",
    "Prepare examples of problem-solving approaches",
    "Practice explaining technical concepts to non-technical audience",
];

const TECHNICAL_FILLER_ITEMS: &[&str] = &[
    "Prepare questions about the role and team",
    "Review the company's tech stack",
    "Practice explaining your thought process while coding",
];

const HR_ITEMS: &[&str] = &[
    "Prepare STAR format answers for behavioral questions",
    "Research company culture and values",
    "Prepare questions to ask the interviewer",
    "Practice explaining career goals and motivations",
    "Review conflict resolution scenarios",
    "Prepare examples of teamwork and leadership",
];

/// Builds the round-wise checklist.
///
/// Round 3 rules: category blocks for web, data, cloud/devops and testing in that
/// order; the generic fallback when none applied; otherwise the filler block when
/// fewer than five items were collected. The fallback is never topped up.
pub fn generate_checklist(extracted: &ExtractedSkills) -> Checklist {
    let mut dsa = if extracted.has(SkillCategory::CoreCs) {
        owned(CORE_CS_ITEMS)
    } else {
        owned(BASIC_DSA_ITEMS)
    };
    if extracted.has(SkillCategory::Languages) {
        dsa.extend(owned(LANGUAGE_ITEMS));
    }

    let technical_blocks = [
        (SkillCategory::Web, WEB_ITEMS),
        (SkillCategory::Data, DATA_ITEMS),
        (SkillCategory::CloudDevOps, CLOUD_ITEMS),
        (SkillCategory::Testing, TESTING_ITEMS),
    ];
    let mut technical: Vec<String> = technical_blocks
        .iter()
        .filter(|(category, _)| extracted.has(*category))
        .flat_map(|(_, items)| owned(items))
        .collect();

    if technical.is_empty() {
        technical = owned(TECHNICAL_FALLBACK_ITEMS);
    } else if technical.len() < TECHNICAL_MIN_ITEMS {
        technical.extend(owned(TECHNICAL_FILLER_ITEMS));
    }

    Checklist {
        round1: ChecklistSection {
            title: "Round 1: Aptitude & Basics".to_string(),
            items: owned(APTITUDE_ITEMS),
        },
        round2: ChecklistSection {
            title: "Round 2: DSA & Core CS".to_string(),
            items: dsa,
        },
        round3: ChecklistSection {
            title: "Round 3: Technical Interview".to_string(),
            items: technical,
        },
        round4: ChecklistSection {
            title: "Round 4: Managerial/HR".to_string(),
            items: owned(HR_ITEMS),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 7-day plan
// ────────────────────────────────────────────────────────────────────────────

/// Builds the 7-day plan. Conditional tasks sit between each day's fixed
/// opening and closing tasks.
pub fn generate_7day_plan(extracted: &ExtractedSkills) -> StudyPlan {
    let has = |category| extracted.has(category);

    let mut day1 = vec!["Review fundamental CS concepts (OOP, DBMS, OS, Networks)"];
    if has(SkillCategory::Languages) {
        day1.push("Brush up on your primary programming language syntax and features");
    }
    if has(SkillCategory::Web) {
        day1.push("Review web fundamentals: HTTP, REST APIs, request-response cycle");
    }
    day1.push("Practice 5-10 easy coding problems to warm up");

    let mut day3 = vec![
        "Solve 10-15 medium-level DSA problems (arrays, strings, linked lists)",
        "Practice common patterns: two pointers, sliding window, hash maps",
    ];
    if has(SkillCategory::CoreCs) {
        day3.push("Deep dive into trees and graphs (BFS, DFS, traversals)");
    }
    day3.push("Time yourself to improve speed and efficiency");

    let mut day5 = vec!["Update resume with relevant projects and skills"];
    if has(SkillCategory::Web) {
        day5.push("Review your web projects: architecture, challenges, learnings");
    }
    if has(SkillCategory::Data) {
        day5.push("Prepare to explain database design decisions in your projects");
    }
    if has(SkillCategory::CloudDevOps) {
        day5.push("Review deployment strategies and infrastructure choices");
    }
    day5.push("Align your project stories with the job requirements");

    let day6 = vec![
        "Conduct 2-3 mock technical interviews with peers or online",
        "Practice explaining your thought process while coding",
        "Record yourself answering behavioral questions",
        "Get feedback and identify weak areas",
    ];

    let mut day7 = vec!["Review notes from all previous days"];
    if has(SkillCategory::CoreCs) || has(SkillCategory::Languages) {
        day7.push("Revisit weak topics identified during practice");
    }
    day7.extend([
        "Practice 3-5 problems from your weak areas",
        "Prepare questions to ask the interviewer",
        "Get a good night's sleep before the interview day",
    ]);

    let day = |title: &str, tasks: Vec<&str>| PlanDay {
        title: title.to_string(),
        tasks: owned(&tasks),
    };

    StudyPlan {
        day1: day("Day 1-2: Basics & Core CS", day1),
        day3: day("Day 3-4: DSA & Coding", day3),
        day5: day("Day 5: Projects & Resume", day5),
        day6: day("Day 6: Mock Interviews", day6),
        day7: day("Day 7: Revision & Polish", day7),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Interview questions
// ────────────────────────────────────────────────────────────────────────────

const CORE_CS_QUESTIONS: &[&str] = &[
    "Explain the difference between stack and queue with real-world examples.",
    "What is a hash table and when would you use it over an array?",
    "Explain database normalization and why it matters.",
    "What is the difference between process and thread?",
    "How does virtual memory work in operating systems?",
];

/// (label fragment, question), checked in this order against detected language labels.
const LANGUAGE_QUESTIONS: &[(&str, &str)] = &[
    (
        "java",
        "Explain the difference between abstract class and interface in Java.",
    ),
    (
        "python",
        "What are Python decorators and when would you use them?",
    ),
    (
        "javascript",
        "Explain closures and how they work in JavaScript.",
    ),
];

const WEB_QUESTIONS: &[&str] = &[
    "Explain the difference between REST and GraphQL APIs.",
    "How would you optimize the performance of a web application?",
    "What is state management and why is it important in frontend frameworks?",
];

const REACT_QUESTION: &str = "Explain the React component lifecycle and hooks.";

const DATA_QUESTIONS: &[&str] = &[
    "Explain database indexing and when it helps performance.",
    "What is the difference between SQL and NoSQL databases?",
    "How would you design a database schema for an e-commerce application?",
];

const CLOUD_QUESTIONS: &[&str] = &[
    "Explain containerization and its benefits over virtual machines.",
    "What is CI/CD and why is it important in modern development?",
];

const TESTING_QUESTIONS: &[&str] = &["Explain the testing pyramid and different types of testing."];

const GENERAL_QUESTIONS: &[&str] = &[
    "How would you approach debugging a production issue?",
    "Explain a time when you optimized code or improved performance.",
    "Describe your approach to learning a new technology or framework.",
    "How do you ensure code quality in your projects?",
];

fn any_label_contains(labels: &[String], fragment: &str) -> bool {
    labels.iter().any(|l| l.to_lowercase().contains(fragment))
}

/// Collects likely interview questions in category order and keeps the first ten.
///
/// When fewer than ten category questions were collected the four general
/// questions are appended. The result is never padded beyond that, so sparse
/// extractions yield fewer than ten.
pub fn generate_questions(extracted: &ExtractedSkills) -> Vec<String> {
    let mut questions: Vec<&str> = Vec::new();

    if extracted.has(SkillCategory::CoreCs) {
        questions.extend(CORE_CS_QUESTIONS);
    }

    let languages = extracted.labels(SkillCategory::Languages);
    questions.extend(
        LANGUAGE_QUESTIONS
            .iter()
            .filter(|(fragment, _)| any_label_contains(languages, fragment))
            .map(|(_, question)| *question),
    );

    if extracted.has(SkillCategory::Web) {
        questions.extend(WEB_QUESTIONS);
        if any_label_contains(extracted.labels(SkillCategory::Web), "react") {
            questions.push(REACT_QUESTION);
        }
    }

    if extracted.has(SkillCategory::Data) {
        questions.extend(DATA_QUESTIONS);
    }
    if extracted.has(SkillCategory::CloudDevOps) {
        questions.extend(CLOUD_QUESTIONS);
    }
    if extracted.has(SkillCategory::Testing) {
        questions.extend(TESTING_QUESTIONS);
    }

    if questions.len() < QUESTION_LIMIT {
        questions.extend(GENERAL_QUESTIONS);
    }

    questions.truncate(QUESTION_LIMIT);
    owned(&questions)
}
