use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Synonym,
    Definition,
    Usage,
    Antonym,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synonym => "synonym",
            Self::Definition => "definition",
            Self::Usage => "usage",
            Self::Antonym => "antonym",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

/// Placeholder practice question; options are not yet generated per word.
pub fn custom_exercise(word: &str, exercise_type: ExerciseType) -> Exercise {
    Exercise {
        question: format!("What is the best {} for '{word}'?", exercise_type.as_str()),
        options: ["Option A", "Option B", "Option C", "Option D"]
            .into_iter()
            .map(String::from)
            .collect(),
        correct_answer: 0,
    }
}
