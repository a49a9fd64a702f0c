// src/models/exam.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// A single multiple-choice question, owned exclusively by its exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the owning exam. Never reused, so answers referencing a
    /// removed question stay unresolvable.
    pub id: i64,

    pub text: String,

    /// Free-text topic label. May be blank; aggregation falls back to the
    /// exam subject.
    pub topic: String,

    /// Exactly 2 or 4 options, enforced at construction.
    pub options: Vec<String>,

    /// Zero-based index into `options`.
    pub correct_option: i32,

    /// Mark value in 1..=100.
    pub marks: i64,
}

/// A named, timed collection of questions authored by an administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub duration_minutes: i64,

    /// Sum of the question marks. Recomputed on every question mutation.
    pub total_marks: i64,

    pub is_published: bool,
    pub questions: Vec<Question>,

    /// Monotonic question id counter.
    next_question_id: i64,

    pub created_at: DateTime<Utc>,
}

/// DTO for creating or updating an exam.
#[derive(Debug, Deserialize, Validate)]
pub struct ExamDraft {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 80))]
    pub subject: String,
    #[validate(range(min = 1, max = 240))]
    pub duration_minutes: i64,
}

/// DTO for adding a question to an exam.
#[derive(Debug, Deserialize, Validate)]
pub struct QuestionDraft {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[serde(default)]
    pub topic: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    pub correct_option: i32,
    #[validate(range(min = 1, max = 100))]
    pub marks: i64,
}

fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.len() != 2 && options.len() != 4 {
        return Err(ValidationError::new("options_must_be_2_or_4"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(ValidationError::new("option_length_out_of_range"));
        }
    }
    Ok(())
}

impl Exam {
    pub fn new(id: i64, draft: ExamDraft) -> Result<Self, AppError> {
        draft.validate()?;

        Ok(Self {
            id,
            title: draft.title.trim().to_string(),
            subject: draft.subject.trim().to_string(),
            duration_minutes: draft.duration_minutes,
            total_marks: 0,
            is_published: false,
            questions: Vec::new(),
            next_question_id: 1,
            created_at: Utc::now(),
        })
    }

    /// Adds a question and returns its assigned id.
    /// The draft is rejected as a whole on any validation failure.
    pub fn add_question(&mut self, draft: QuestionDraft) -> Result<i64, AppError> {
        draft.validate()?;

        let option_count = draft.options.len() as i32;
        if draft.correct_option < 0 || draft.correct_option >= option_count {
            return Err(AppError::InvalidInput(
                "correct_option out of range".to_string(),
            ));
        }

        let id = self.next_question_id;
        self.next_question_id += 1;

        self.questions.push(Question {
            id,
            text: draft.text.trim().to_string(),
            topic: draft.topic.trim().to_string(),
            options: draft.options,
            correct_option: draft.correct_option,
            marks: draft.marks,
        });
        self.recalculate_total_marks();

        Ok(id)
    }

    /// Removes a question by id.
    pub fn remove_question(&mut self, question_id: i64) -> Result<(), AppError> {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != question_id);
        if self.questions.len() == before {
            return Err(AppError::NotFound("Question not found".to_string()));
        }
        self.recalculate_total_marks();
        Ok(())
    }

    /// Updates title, subject and duration.
    pub fn update_details(&mut self, draft: ExamDraft) -> Result<(), AppError> {
        draft.validate()?;
        self.title = draft.title.trim().to_string();
        self.subject = draft.subject.trim().to_string();
        self.duration_minutes = draft.duration_minutes;
        self.recalculate_total_marks();
        Ok(())
    }

    pub fn set_published(&mut self, published: bool) {
        self.is_published = published;
    }

    /// Resolves a question by id.
    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    fn recalculate_total_marks(&mut self) {
        self.total_marks = self.questions.iter().map(|q| q.marks).sum();
    }

    /// Projection for the taking party. The answer key is not included.
    pub fn student_view(&self) -> StudentExam {
        StudentExam {
            id: self.id,
            title: self.title.clone(),
            subject: self.subject.clone(),
            duration_minutes: self.duration_minutes,
            total_marks: self.total_marks,
            questions: self
                .questions
                .iter()
                .map(|q| StudentQuestion {
                    id: q.id,
                    text: q.text.clone(),
                    topic: q.topic.clone(),
                    options: q.options.clone(),
                    marks: q.marks,
                })
                .collect(),
        }
    }
}

/// Exam as shown to a student about to take it.
#[derive(Debug, Serialize)]
pub struct StudentExam {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub duration_minutes: i64,
    pub total_marks: i64,
    pub questions: Vec<StudentQuestion>,
}

/// Question projection without the correct option.
#[derive(Debug, Serialize)]
pub struct StudentQuestion {
    pub id: i64,
    pub text: String,
    pub topic: String,
    pub options: Vec<String>,
    pub marks: i64,
}
