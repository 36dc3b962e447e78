//! The question bank.

use std::collections::HashSet;
use std::path::Path;

use crate::category::CategoryFold;
use crate::error::ConfigError;
use crate::normalize::normalize;
use crate::parser;
use crate::types::Question;

const BUILTIN_QUESTIONS: &[(&str, &str, &str)] = &[
    ("What is the capital of France?", "Paris", "Geography"),
    (
        "Mount Everest is on the border of which two countries?",
        "Nepal and China",
        "Geography",
    ),
    (
        "Which U.S. state is nicknamed the Sunshine State?",
        "Florida",
        "Geography",
    ),
    (
        "In what year did the United States declare independence?",
        "1776",
        "History",
    ),
    (
        "Who was the first President of the United States?",
        "George Washington",
        "History",
    ),
    ("What is H2O commonly known as?", "Water", "Science"),
    ("How many bones are in the adult human body?", "206", "Science"),
    (
        "What 1997 film stars Will Smith and Tommy Lee Jones as agents who police aliens?",
        "Men in Black",
        "Movies & TV",
    ),
    (
        "What\u{2019}s the name of the wizarding school in Harry Potter?",
        "Hogwarts",
        "Movies & TV",
    ),
    (
        "How many players are on the field for one soccer team?",
        "11",
        "Sports",
    ),
    (
        "How many holes are played in a standard round of golf?",
        "18",
        "Sports",
    ),
    (
        "What is the largest organ of the human body by weight?",
        "Skin",
        "General",
    ),
    ("What does URL stand for?", "Uniform Resource Locator", "General"),
];

/// Something odd about a bank that does not stop it from loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankWarning {
    /// Index of the offending question.
    pub index: usize,
    pub message: String,
}

/// A static collection of questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The bank shipped with the quiz.
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_QUESTIONS
                .iter()
                .map(|&(text, answer, category)| Question::new(text, answer, category))
                .collect(),
        )
    }

    /// Parse a deck (see [`crate::parser`] for the format).
    pub fn from_deck_str(content: &str) -> Result<Self, ConfigError> {
        let questions = parser::parse(content)?
            .into_iter()
            .map(|raw| raw.question)
            .collect();
        Ok(Self::new(questions))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let bank = Self::from_deck_str(&content)?;
        tracing::debug!(path = %path.display(), questions = bank.len(), "loaded question bank");
        Ok(bank)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Sorted canonical categories present in the bank.
    pub fn categories(&self, fold: &CategoryFold) -> Vec<String> {
        fold.counts(&self.questions).into_keys().collect()
    }

    /// Flag questions that can never be answered correctly or are repeated.
    pub fn validate(&self) -> Vec<BankWarning> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        if self.questions.is_empty() {
            warnings.push(BankWarning {
                index: 0,
                message: "bank has no questions".to_string(),
            });
        }

        for (index, question) in self.questions.iter().enumerate() {
            let text = normalize(&question.text);
            if text.is_empty() {
                warnings.push(BankWarning {
                    index,
                    message: format!("question {:?} has no text", question.text),
                });
            }
            if normalize(&question.answer).is_empty() {
                warnings.push(BankWarning {
                    index,
                    message: format!(
                        "answer {:?} normalizes to nothing and can never be matched",
                        question.answer
                    ),
                });
            }
            if !text.is_empty() && !seen.insert(text) {
                warnings.push(BankWarning {
                    index,
                    message: format!("duplicate question {:?}", question.text),
                });
            }
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_bank() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 13);
        assert!(bank.validate().is_empty());
        assert_eq!(
            bank.categories(&CategoryFold::builtin()),
            vec!["General", "Geography", "History", "Movies & TV", "Science", "Sports"]
        );
    }

    #[test]
    fn builtin_answers_match_themselves() {
        let engine = crate::matching::MatchEngine::default();
        for question in QuestionBank::builtin().questions() {
            assert!(
                engine.is_correct(&question.answer, &question.answer),
                "{}",
                question.answer
            );
        }
    }

    #[test]
    fn bank_from_deck() {
        let deck = "Category: Music\nQ: Fab four?\nA: The Beatles";
        let bank = QuestionBank::from_deck_str(deck).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.categories(&CategoryFold::builtin()), vec!["Pop Culture"]);
    }

    #[test]
    fn bank_from_invalid_deck() {
        let result = QuestionBank::from_deck_str("A: orphan answer");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validate_flags_unmatchable_and_duplicate() {
        let bank = QuestionBank::new(vec![
            Question::new("Symbol?", "?!", "General"),
            Question::new("Capital of France?", "Paris", "Geography"),
            Question::new("capital of france", "Paris", "Geography"),
        ]);
        let warnings = bank.validate();
        let indices: Vec<usize> = warnings.iter().map(|w| w.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn validate_flags_blank_question_text() {
        let bank = QuestionBank::new(vec![
            Question::new("", "Paris", "Geography"),
            Question::new("  ?? ", "Rome", "Geography"),
            Question::new("Capital of Spain?", "Madrid", "Geography"),
        ]);
        let warnings = bank.validate();
        let indices: Vec<usize> = warnings.iter().map(|w| w.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert!(warnings[0].message.contains("has no text"));
    }

    #[test]
    fn validate_empty_bank() {
        assert_eq!(QuestionBank::default().validate().len(), 1);
    }

    #[test]
    fn load_missing_file() {
        let result = QuestionBank::load(Path::new("/nonexistent/deck.md"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
