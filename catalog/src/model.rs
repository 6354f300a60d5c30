use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Exam qualification tiers, in presentation order.
pub const LEVELS: [LevelInfo; 3] = [
    LevelInfo { id: "N5", name: "National 5" },
    LevelInfo { id: "higher", name: "Higher" },
    LevelInfo { id: "AH", name: "Advanced Higher" },
];

/// Exam years scanned per level, newest first. A level need not have data
/// for every year.
pub const YEARS: [&str; 5] = ["2025", "2024", "2023", "2022", "specimen"];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelInfo {
    pub id: &'static str,
    pub name: &'static str,
}

pub fn year_display_name(year: &str) -> &str {
    if year == "specimen" {
        "Specimen Paper"
    } else {
        year
    }
}

/// One sub-part of an exam question, classified under the two-level
/// curriculum taxonomy. The four named fields are required; anything else
/// (marks, notes) is carried opaquely so shards reproduce it verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subquestion {
    pub id: String,
    pub description: String,
    pub course_section: String,
    pub course_subsection: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub question: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub subquestions: Vec<Subquestion>,
}

/// A level+year paper: its ordered questions plus opaque paper metadata
/// (title, date, ...) the core never interprets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionPaper {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(default)]
    pub question_map: Vec<Question>,
}

/// A monolithic per-level dataset keyed by composite `{level}_{year}` keys,
/// in source file key order.
pub type LevelDataset = IndexMap<String, QuestionPaper>;
