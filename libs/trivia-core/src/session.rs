//! Quiz session: question order, turn history and scoring.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::error::SessionError;
use crate::matching::MatchEngine;
use crate::types::{Question, QuizSettings, ScoreSummary, TurnRecord};

/// A single play-through of a question pool.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    category: String,
    order: Vec<Question>,
    index: usize,
    history: Vec<TurnRecord>,
    pass_threshold: f64,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Valid question counts for a pool, or `None` when the pool is empty.
    pub fn count_range(
        pool_len: usize,
        allow_repeats: bool,
        settings: &QuizSettings,
    ) -> Option<RangeInclusive<usize>> {
        if pool_len == 0 {
            return None;
        }
        let max = if allow_repeats {
            settings.max_questions
        } else {
            settings.max_questions.min(pool_len)
        };
        let min = settings.min_questions.min(max);
        Some(min..=max)
    }

    /// Suggested question count for a pool.
    pub fn default_count(pool_len: usize, allow_repeats: bool, settings: &QuizSettings) -> usize {
        Self::count_range(pool_len, allow_repeats, settings)
            .map_or(0, |range| settings.default_questions.clamp(*range.start(), *range.end()))
    }

    /// Draw `count` questions from `pool`, with replacement when
    /// `allow_repeats` is set.
    pub fn start<R: Rng + ?Sized>(
        category: &str,
        pool: &[&Question],
        count: usize,
        allow_repeats: bool,
        settings: &QuizSettings,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let range = Self::count_range(pool.len(), allow_repeats, settings).ok_or_else(|| {
            SessionError::EmptyPool {
                category: category.to_string(),
            }
        })?;
        if !range.contains(&count) {
            return Err(SessionError::InvalidQuestionCount {
                requested: count,
                min: *range.start(),
                max: *range.end(),
            });
        }

        let order: Vec<Question> = if allow_repeats {
            (0..count)
                .filter_map(|_| pool.choose(rng))
                .map(|q| (*q).clone())
                .collect()
        } else {
            let mut drawn: Vec<Question> = pool
                .choose_multiple(rng, count)
                .map(|q| (*q).clone())
                .collect();
            drawn.shuffle(rng);
            drawn
        };

        let session = Self {
            id: Uuid::new_v4(),
            category: category.to_string(),
            order,
            index: 0,
            history: Vec::new(),
            pass_threshold: settings.pass_threshold,
            started_at: Utc::now(),
        };
        tracing::info!(
            session = %session.id,
            category,
            questions = count,
            allow_repeats,
            "quiz started"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The question waiting for an answer, `None` once every question has
    /// been answered.
    pub fn current(&self) -> Option<&Question> {
        self.order.get(self.index)
    }

    /// 1-based number of the current question and the total.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.order.len())
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Fraction of questions answered so far.
    pub fn progress(&self) -> f64 {
        if self.order.is_empty() {
            0.0
        } else {
            self.index as f64 / self.order.len() as f64
        }
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.order.len()
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Judge an answer to the current question and move on.
    ///
    /// A blank answer is refused without using up the question.
    pub fn submit(
        &mut self,
        answer: &str,
        engine: &MatchEngine,
    ) -> Result<&TurnRecord, SessionError> {
        let question = self.order.get(self.index).ok_or(SessionError::Finished)?;
        if answer.trim().is_empty() {
            return Err(SessionError::BlankAnswer);
        }

        let decision = engine.evaluate(answer, &question.answer);
        let record = TurnRecord {
            question: question.text.clone(),
            category: question.category.clone(),
            user_answer: answer.to_string(),
            correct_answer: question.answer.clone(),
            is_correct: decision.is_correct,
            path: decision.path,
            answered_at: Utc::now(),
        };
        tracing::debug!(
            session = %self.id,
            turn = self.index + 1,
            correct = record.is_correct,
            "answer recorded"
        );

        self.index += 1;
        self.history.push(record);
        if self.is_finished() {
            let summary = self.summary();
            tracing::info!(
                session = %self.id,
                right = summary.right,
                total = summary.total,
                passed = summary.passed,
                "quiz finished"
            );
        }
        Ok(&self.history[self.history.len() - 1])
    }

    /// Score over the questions answered so far against the full length of
    /// the quiz.
    pub fn summary(&self) -> ScoreSummary {
        let right = self.history.iter().filter(|turn| turn.is_correct).count();
        ScoreSummary::compute(right, self.order.len(), self.pass_threshold)
    }
}
