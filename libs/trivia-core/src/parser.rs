//! Parser for question deck files.
//!
//! # Format
//! ```text
//! Category: Geography
//! Q: What is the capital of France?
//! A: Paris
//!
//! Q: Mount Everest is on the border of which two countries?
//! A: Nepal and China
//! Image: images/everest.jpg
//! ```
//!
//! `Category:` applies to every following question until the next one.
//! Continuation lines extend the open question or answer. `Image:` closes
//! the entry, so only a new `Q:` or `Category:` may follow it. Lines
//! starting with `#` are comments.

use crate::error::{ParseError, Result};
use crate::types::{Question, RawQuestion, DEFAULT_CATEGORY};

/// Parse deck content into questions.
pub fn parse(content: &str) -> Result<Vec<RawQuestion>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::new();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finalize()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Question,
    Answer,
}

struct QuestionBuilder {
    category: String,
    question: Option<String>,
    answer: Option<String>,
    image: Option<String>,
    start_line: usize,
    answer_line: usize,
}

impl QuestionBuilder {
    fn new(category: String, start_line: usize) -> Self {
        Self {
            category,
            question: None,
            answer: None,
            image: None,
            start_line,
            answer_line: start_line,
        }
    }

    fn build(self) -> Result<RawQuestion> {
        let text = self.question.ok_or(ParseError::MissingQuestion {
            line: self.start_line,
        })?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyQuestion {
                line: self.start_line,
            });
        }
        let answer = self.answer.ok_or(ParseError::MissingAnswer {
            line: self.start_line,
        })?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ParseError::EmptyAnswer {
                line: self.answer_line,
            });
        }

        Ok(RawQuestion {
            question: Question {
                text: text.to_string(),
                answer: answer.to_string(),
                category: self.category,
                image: self.image,
            },
            line_number: self.start_line,
        })
    }
}

struct Parser {
    category: String,
    current: Option<QuestionBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
    questions: Vec<RawQuestion>,
}

impl Parser {
    fn new() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            current: None,
            current_field: None,
            buffer: Vec::new(),
            questions: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Category(name) => self.handle_category(name)?,
            LineType::Question(text) => self.handle_question(text, line_num)?,
            LineType::Answer(text) => self.handle_answer(text, line_num)?,
            LineType::Image(path) => self.handle_image(path, line_num)?,
            LineType::Comment => {}
            LineType::Text(text) => self.handle_text(text, line_num)?,
            LineType::Empty => self.buffer.push(String::new()),
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("Category:") {
            LineType::Category(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Question(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Image:") {
            LineType::Image(rest.trim())
        } else if trimmed.starts_with('#') {
            LineType::Comment
        } else if trimmed.is_empty() {
            LineType::Empty
        } else {
            LineType::Text(trimmed)
        }
    }

    fn handle_category(&mut self, name: &str) -> Result<()> {
        self.finish_current()?;
        self.category = if name.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            name.to_string()
        };
        Ok(())
    }

    fn handle_question(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.finish_current()?;
        self.current = Some(QuestionBuilder::new(self.category.clone(), line_num));
        self.current_field = Some(Field::Question);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_answer(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();
        let card = self
            .current
            .as_mut()
            .ok_or(ParseError::MissingQuestion { line: line_num })?;
        card.answer_line = line_num;
        self.current_field = Some(Field::Answer);
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn handle_image(&mut self, path: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();
        let card = self
            .current
            .as_mut()
            .ok_or(ParseError::MissingQuestion { line: line_num })?;
        if !path.is_empty() {
            card.image = Some(path.to_string());
        }
        self.current_field = None;
        Ok(())
    }

    fn handle_text(&mut self, text: &str, line_num: usize) -> Result<()> {
        if self.current.is_some() && self.current_field.is_none() {
            return Err(ParseError::TextAfterImage { line: line_num });
        }
        self.buffer.push(text.to_string());
        Ok(())
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        // Blank lines only separate entries; they never end up in a field.
        let content = self
            .buffer
            .iter()
            .map(String::as_str)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.buffer.clear();

        if let Some(ref mut card) = self.current {
            match self.current_field {
                Some(Field::Question) => card.question = Some(content),
                Some(Field::Answer) => card.answer = Some(content),
                None => {}
            }
        }
    }

    fn finish_current(&mut self) -> Result<()> {
        self.flush_buffer();
        self.current_field = None;
        if let Some(card) = self.current.take() {
            self.questions.push(card.build()?);
        }
        Ok(())
    }

    fn finalize(mut self) -> Result<Vec<RawQuestion>> {
        self.finish_current()?;
        Ok(self.questions)
    }
}

enum LineType<'a> {
    Category(&'a str),
    Question(&'a str),
    Answer(&'a str),
    Image(&'a str),
    Comment,
    Text(&'a str),
    Empty,
}
