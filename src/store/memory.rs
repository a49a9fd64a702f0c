// src/store/memory.rs

use std::sync::RwLock;

use async_trait::async_trait;

use super::{AttemptStore, ExamStore};
use crate::error::AppError;
use crate::models::attempt::Attempt;
use crate::models::exam::Exam;

/// In-memory exam store. Reference implementation for tests and small
/// single-process deployments.
#[derive(Default)]
pub struct InMemoryExamStore {
    exams: RwLock<Vec<Exam>>,
}

impl InMemoryExamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an exam definition.
    pub fn upsert_exam(&self, exam: Exam) {
        let mut exams = self.exams.write().expect("exam store lock poisoned");
        match exams.iter().position(|e| e.id == exam.id) {
            Some(idx) => exams[idx] = exam,
            None => exams.push(exam),
        }
    }

    /// Removes an exam definition. Attempts referencing it are untouched.
    pub fn remove_exam(&self, exam_id: i64) {
        let mut exams = self.exams.write().expect("exam store lock poisoned");
        exams.retain(|e| e.id != exam_id);
    }
}

#[async_trait]
impl ExamStore for InMemoryExamStore {
    async fn get_exam(&self, exam_id: i64) -> Result<Option<Exam>, AppError> {
        let exams = self.exams.read().expect("exam store lock poisoned");
        Ok(exams.iter().find(|e| e.id == exam_id).cloned())
    }

    async fn list_published_exams(&self) -> Result<Vec<Exam>, AppError> {
        let exams = self.exams.read().expect("exam store lock poisoned");
        let mut published: Vec<Exam> = exams.iter().filter(|e| e.is_published).cloned().collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(published)
    }

    async fn list_exams(&self) -> Result<Vec<Exam>, AppError> {
        let exams = self.exams.read().expect("exam store lock poisoned");
        let mut all = exams.clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}

/// In-memory attempt store.
///
/// The write lock is held across the duplicate check and the insert, which
/// makes `create_attempt` atomic with respect to concurrent submissions.
#[derive(Default)]
pub struct InMemoryAttemptStore {
    attempts: RwLock<Vec<Attempt>>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn find_attempt(
        &self,
        student_id: i64,
        exam_id: i64,
    ) -> Result<Option<Attempt>, AppError> {
        let attempts = self.attempts.read().expect("attempt store lock poisoned");
        Ok(attempts
            .iter()
            .find(|a| a.student_id == student_id && a.exam_id == exam_id)
            .cloned())
    }

    async fn list_attempts_by_exam(&self, exam_id: i64) -> Result<Vec<Attempt>, AppError> {
        let attempts = self.attempts.read().expect("attempt store lock poisoned");
        Ok(attempts
            .iter()
            .filter(|a| a.exam_id == exam_id)
            .cloned()
            .collect())
    }

    async fn list_attempts_by_student(&self, student_id: i64) -> Result<Vec<Attempt>, AppError> {
        let attempts = self.attempts.read().expect("attempt store lock poisoned");
        Ok(attempts
            .iter()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn create_attempt(&self, attempt: Attempt) -> Result<Attempt, AppError> {
        let mut attempts = self.attempts.write().expect("attempt store lock poisoned");

        if attempts
            .iter()
            .any(|a| a.student_id == attempt.student_id && a.exam_id == attempt.exam_id)
        {
            return Err(AppError::AlreadyGraded(format!(
                "Student {} already attempted exam {}",
                attempt.student_id, attempt.exam_id
            )));
        }

        // Attempts are never removed, so the next dense id is unique.
        let mut stored = attempt;
        stored.id = attempts.len() as i64 + 1;
        attempts.push(stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn attempt(student_id: i64, exam_id: i64) -> Attempt {
        Attempt {
            id: 0,
            student_id,
            exam_id,
            score: 5,
            accuracy: 50.0,
            correct_count: 1,
            total_questions: 2,
            answers: Vec::new(),
            time_taken_seconds: 60,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_attempt_assigns_ids() {
        let store = InMemoryAttemptStore::new();

        let first = store.create_attempt(attempt(1, 10)).await.unwrap();
        let second = store.create_attempt(attempt(2, 10)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn create_attempt_rejects_duplicate_pair() {
        let store = InMemoryAttemptStore::new();
        store.create_attempt(attempt(1, 10)).await.unwrap();

        let err = store.create_attempt(attempt(1, 10)).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyGraded(_)));

        // The store is unchanged: same student on another exam still works.
        let ok = store.create_attempt(attempt(1, 11)).await.unwrap();
        assert_eq!(ok.id, 2);
    }
}
