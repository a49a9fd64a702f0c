// src/store/mod.rs

pub mod memory;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::attempt::Attempt;
use crate::models::exam::Exam;

/// Read access to exam definitions.
#[async_trait]
pub trait ExamStore: Send + Sync {
    async fn get_exam(&self, exam_id: i64) -> Result<Option<Exam>, AppError>;

    /// Published exams, newest first.
    async fn list_published_exams(&self) -> Result<Vec<Exam>, AppError>;

    /// All exams regardless of publication state, newest first.
    async fn list_exams(&self) -> Result<Vec<Exam>, AppError>;
}

/// Access to graded attempts.
///
/// `create_attempt` must enforce the one-attempt-per-(student, exam)
/// invariant atomically with respect to concurrent submissions.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn find_attempt(
        &self,
        student_id: i64,
        exam_id: i64,
    ) -> Result<Option<Attempt>, AppError>;

    async fn list_attempts_by_exam(&self, exam_id: i64) -> Result<Vec<Attempt>, AppError>;

    async fn list_attempts_by_student(&self, student_id: i64) -> Result<Vec<Attempt>, AppError>;

    /// Assigns the attempt id and persists the attempt.
    /// Fails with `AlreadyGraded` when the (student, exam) pair exists.
    async fn create_attempt(&self, attempt: Attempt) -> Result<Attempt, AppError>;
}
