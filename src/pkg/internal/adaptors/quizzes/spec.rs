use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

use crate::prelude::{ApiError, Result};

pub const OPTIONS_PER_QUESTION: usize = 4;

pub const QUIZ_COLUMNS: &str = "id, title, description, creator, questions, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "questionText", default)]
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(alias = "correctOptionIndex")]
    pub correct_option_index: i32,
}

impl Question {
    pub fn validate(&self, position: usize) -> Result<()> {
        let n = position + 1;
        if self.question_text.trim().is_empty() {
            return Err(ApiError::validation(format!("Question {} has no text", n)));
        }
        if self.options.len() != OPTIONS_PER_QUESTION
            || self.options.iter().any(|o| o.trim().is_empty())
        {
            return Err(ApiError::validation(format!(
                "Question {} must have exactly {} non-empty options",
                n, OPTIONS_PER_QUESTION
            )));
        }
        if !(0..self.options.len() as i32).contains(&self.correct_option_index) {
            return Err(ApiError::validation(format!(
                "Question {} has no valid correct option",
                n
            )));
        }
        Ok(())
    }
}

pub fn validate_questions(questions: &[Question]) -> Result<()> {
    if questions.is_empty() {
        return Err(ApiError::validation("Quiz must have at least one question"));
    }
    questions
        .iter()
        .enumerate()
        .try_for_each(|(i, q)| q.validate(i))
}

/// What a quiz taker sees of a question.
#[derive(Debug, Clone, Serialize)]
pub struct PublicQuestion {
    pub question_text: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct QuizEntry {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub creator: Uuid,
    pub questions: Json<Vec<Question>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub creator_name: Option<String>,
}

impl QuizEntry {
    pub fn correct_answers(&self) -> Vec<i32> {
        self.questions.iter().map(|q| q.correct_option_index).collect()
    }

    pub fn public(&self) -> QuizView {
        QuizView {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            creator: self.creator,
            creator_name: self.creator_name.clone(),
            question_count: self.questions.len() as i32,
            questions: self
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    question_text: q.question_text.clone(),
                    options: q.options.clone(),
                })
                .collect(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub creator: Uuid,
    pub creator_name: Option<String>,
    pub question_count: i32,
    pub questions: Vec<PublicQuestion>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct QuizSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub creator: Uuid,
    pub creator_name: Option<String>,
    pub question_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuizInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl CreateQuizInput {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation("Quiz title is required"));
        }
        validate_questions(&self.questions)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PatchQuizInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<Question>>,
}

impl PatchQuizInput {
    pub fn validate(&self) -> Result<()> {
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ApiError::validation("Quiz title is required"));
        }
        match &self.questions {
            Some(questions) => validate_questions(questions),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmissionInput {
    #[serde(default)]
    pub answers: Vec<Option<i32>>,
}
