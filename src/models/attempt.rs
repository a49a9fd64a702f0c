// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Selected-option sentinel meaning "unanswered".
pub const UNANSWERED: i32 = -1;

/// One normalized answer inside a graded attempt.
/// References its question by id only; the question may since have been
/// removed from the exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: i64,

    /// Valid option index, or `UNANSWERED`.
    pub selected_option: i32,
}

/// A raw submitted answer pair. Untrusted: may be sparse, duplicated, or
/// reference questions outside the exam.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub selected_option: i32,
}

/// One student's single graded submission for one exam.
/// Immutable once created; grading-time facts are snapshotted and stay valid
/// even if the exam is edited later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    /// Assigned by the attempt store on creation.
    pub id: i64,

    pub student_id: i64,
    pub exam_id: i64,

    /// Sum of the marks of correctly answered questions.
    pub score: i64,

    /// correct / total questions, as a percentage with two decimals.
    pub accuracy: f64,

    pub correct_count: usize,

    /// Question count at grading time.
    pub total_questions: usize,

    /// Exactly one entry per exam question at grading time, in exam order.
    pub answers: Vec<Answer>,

    pub time_taken_seconds: i64,
    pub created_at: DateTime<Utc>,
}
