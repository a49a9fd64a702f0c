// src/services/submission.rs

use std::collections::HashSet;

use crate::error::AppError;
use crate::grading::grade;
use crate::models::attempt::{Attempt, SubmittedAnswer};
use crate::models::exam::StudentExam;
use crate::models::report::OpenExamRow;
use crate::store::{AttemptStore, ExamStore};

/// Grades and records a student's submission.
///
/// * Rejects a second submission for the same exam with `AlreadyGraded`.
/// * A missing or unpublished exam is `NotFound`.
/// * The store re-checks the one-attempt invariant atomically, so a racing
///   duplicate submission loses there.
pub async fn submit_exam(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
    student_id: i64,
    exam_id: i64,
    answers: &[SubmittedAnswer],
    time_taken_seconds: i64,
) -> Result<Attempt, AppError> {
    if attempts.find_attempt(student_id, exam_id).await?.is_some() {
        return Err(AppError::AlreadyGraded(
            "Exam already submitted".to_string(),
        ));
    }

    let exam = exams
        .get_exam(exam_id)
        .await?
        .filter(|e| e.is_published)
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let graded = grade(&exam, student_id, answers, time_taken_seconds);
    let stored = attempts.create_attempt(graded).await?;

    tracing::info!(
        "Graded exam {} for student {}: score {}/{}",
        exam_id,
        student_id,
        stored.score,
        exam.total_marks
    );

    Ok(stored)
}

/// Published exams as seen by one student, newest first, flagging those
/// already attempted.
pub async fn list_open_exams(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
    student_id: i64,
) -> Result<Vec<OpenExamRow>, AppError> {
    let published = exams.list_published_exams().await?;
    let mine = attempts.list_attempts_by_student(student_id).await?;
    let attempted: HashSet<i64> = mine.iter().map(|a| a.exam_id).collect();

    Ok(published
        .into_iter()
        .map(|exam| OpenExamRow {
            id: exam.id,
            title: exam.title,
            subject: exam.subject,
            duration_minutes: exam.duration_minutes,
            total_marks: exam.total_marks,
            question_count: exam.questions.len(),
            has_attempted: attempted.contains(&exam.id),
        })
        .collect())
}

/// Loads a published exam for a student about to take it.
///
/// The returned projection hides the answer key. A prior attempt is a
/// conflict: the exam can be taken exactly once.
pub async fn exam_for_taking(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
    student_id: i64,
    exam_id: i64,
) -> Result<StudentExam, AppError> {
    let exam = exams
        .get_exam(exam_id)
        .await?
        .filter(|e| e.is_published)
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    if attempts.find_attempt(student_id, exam_id).await?.is_some() {
        return Err(AppError::AlreadyGraded(
            "Exam already submitted".to_string(),
        ));
    }

    Ok(exam.student_view())
}
