//! Folding raw category labels onto a smaller canonical set.
//!
//! Used to build question pools; answer matching never looks at categories.

use std::collections::{BTreeMap, HashMap};

use crate::types::Question;

/// Pseudo-category selecting every question in the bank.
pub const MIX_LABEL: &str = "All Categories (Mix)";

const POP_CULTURE: &str = "Pop Culture";

const BUILTIN_FOLDS: &[(&str, &str)] = &[
    ("Celebrities", POP_CULTURE),
    ("Fashion and Trends", POP_CULTURE),
    ("Tech", POP_CULTURE),
    ("Sports and Athletes", POP_CULTURE),
    ("Video Games", POP_CULTURE),
    ("Literature and Books", POP_CULTURE),
    ("Comics and Superheroes", POP_CULTURE),
    ("Movies", POP_CULTURE),
    ("Film", POP_CULTURE),
    ("Television", POP_CULTURE),
    ("TV", POP_CULTURE),
    ("TV Shows", POP_CULTURE),
    ("Anime", POP_CULTURE),
    ("K-Pop and Dramas", POP_CULTURE),
    ("K-Pop", POP_CULTURE),
    ("Korean Dramas", POP_CULTURE),
    ("Social Media", POP_CULTURE),
    ("Music", POP_CULTURE),
    ("Pop culture trivia questions and answers", POP_CULTURE),
];

/// Raw label -> canonical label, matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct CategoryFold {
    folds: HashMap<String, String>,
}

impl CategoryFold {
    /// A fold that leaves every label as it is (apart from trimming).
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_FOLDS.iter().copied())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let folds = pairs
            .into_iter()
            .map(|(raw, canonical)| (raw.as_ref().trim().to_lowercase(), canonical.into()))
            .collect();
        Self { folds }
    }

    /// Canonical label for `label`, or the trimmed label when no fold applies.
    pub fn fold(&self, label: &str) -> String {
        let key = label.trim();
        self.folds
            .get(&key.to_lowercase())
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Questions to play for a category. [`MIX_LABEL`] selects everything.
    pub fn pool<'a>(&self, questions: &'a [Question], category: &str) -> Vec<&'a Question> {
        let wanted = self.fold(category);
        if wanted == MIX_LABEL {
            return questions.iter().collect();
        }
        questions
            .iter()
            .filter(|q| self.fold(&q.category) == wanted)
            .collect()
    }

    /// Canonical categories present in `questions` with their question
    /// counts, sorted by name.
    pub fn counts(&self, questions: &[Question]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for question in questions {
            *counts.entry(self.fold(&question.category)).or_insert(0) += 1;
        }
        counts
    }

    /// [`MIX_LABEL`] followed by the sorted canonical categories.
    pub fn choices(&self, questions: &[Question]) -> Vec<String> {
        std::iter::once(MIX_LABEL.to_string())
            .chain(self.counts(questions).into_keys())
            .collect()
    }
}
