// src/services/analytics.rs
//
// Read-path orchestration: fetch from the stores at the boundary, then run
// the pure aggregation passes.

use std::collections::HashMap;

use crate::analytics::{analyze_exam, analyze_student, performance_trend};
use crate::config::Config;
use crate::error::AppError;
use crate::models::report::{
    AttemptSummary, ExamOverviewRow, ExamReport, StudentReport, TrendPoint,
};
use crate::store::{AttemptStore, ExamStore};
use crate::utils::percent::round2;

/// One summary row per exam, published or not, newest first.
pub async fn admin_overview(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
) -> Result<Vec<ExamOverviewRow>, AppError> {
    let all = exams.list_exams().await?;

    let mut rows = Vec::with_capacity(all.len());
    for exam in all {
        let graded = attempts.list_attempts_by_exam(exam.id).await?;
        let attempted = graded.len();
        let avg_score = if attempted == 0 {
            0.0
        } else {
            round2(graded.iter().map(|a| a.score).sum::<i64>() as f64 / attempted as f64)
        };

        rows.push(ExamOverviewRow {
            id: exam.id,
            title: exam.title,
            subject: exam.subject,
            total_marks: exam.total_marks,
            is_published: exam.is_published,
            attempted,
            avg_score,
        });
    }
    Ok(rows)
}

/// Full analytics report for one exam.
pub async fn exam_analytics(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
    exam_id: i64,
) -> Result<ExamReport, AppError> {
    let exam = exams
        .get_exam(exam_id)
        .await?
        .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let graded = attempts.list_attempts_by_exam(exam_id).await?;
    Ok(analyze_exam(&exam, &graded))
}

/// Daily performance trend for one exam.
pub async fn exam_trend(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
    exam_id: i64,
) -> Result<Vec<TrendPoint>, AppError> {
    if exams.get_exam(exam_id).await?.is_none() {
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    let graded = attempts.list_attempts_by_exam(exam_id).await?;
    Ok(performance_trend(&graded))
}

/// Full analytics report for one student.
///
/// Assembles the pure aggregator's inputs: the student's attempts sorted by
/// creation time ascending, the current snapshot of every attempted exam,
/// and the full cohort of attempts per exam. Exams that no longer exist are
/// logged and left out of the snapshot map; their attempts degrade as
/// described in `analyze_student`.
pub async fn student_overview(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
    student_id: i64,
) -> Result<StudentReport, AppError> {
    let mut mine = attempts.list_attempts_by_student(student_id).await?;
    mine.sort_by_key(|a| a.created_at);

    let mut exam_map = HashMap::new();
    let mut cohorts = HashMap::new();
    for attempt in &mine {
        if cohorts.contains_key(&attempt.exam_id) {
            continue;
        }
        cohorts.insert(
            attempt.exam_id,
            attempts.list_attempts_by_exam(attempt.exam_id).await?,
        );
        match exams.get_exam(attempt.exam_id).await? {
            Some(exam) => {
                exam_map.insert(attempt.exam_id, exam);
            }
            None => {
                tracing::warn!(
                    "Exam {} attempted by student {} no longer exists",
                    attempt.exam_id,
                    student_id
                );
            }
        }
    }

    Ok(analyze_student(student_id, &mine, &exam_map, &cohorts))
}

/// Recent attempts for one exam, newest first, capped by configuration.
pub async fn list_exam_attempts(
    exams: &dyn ExamStore,
    attempts: &dyn AttemptStore,
    config: &Config,
    exam_id: i64,
) -> Result<Vec<AttemptSummary>, AppError> {
    if exams.get_exam(exam_id).await?.is_none() {
        return Err(AppError::NotFound("Exam not found".to_string()));
    }

    let mut graded = attempts.list_attempts_by_exam(exam_id).await?;
    graded.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    graded.truncate(config.attempt_list_limit);

    Ok(graded
        .into_iter()
        .map(|a| AttemptSummary {
            id: a.id,
            student_id: a.student_id,
            score: a.score,
            accuracy: a.accuracy,
            time_taken_seconds: a.time_taken_seconds,
            submitted_at: a.created_at,
        })
        .collect())
}
