// src/models/report.rs
//
// Derived structures, computed on demand from attempts plus the current exam
// snapshot. Never persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Exam identity block of an exam report.
#[derive(Debug, Clone, Serialize)]
pub struct ExamHeader {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub total_marks: i64,

    /// Minimum passing score derived from the total marks.
    pub pass_score: i64,
}

/// Aggregate metrics for one exam.
#[derive(Debug, Clone, Serialize)]
pub struct ExamMetrics {
    pub attempted: usize,
    pub avg_score: f64,
    pub pass_count: usize,
    pub fail_count: usize,
    pub pass_rate: f64,
}

/// One leaderboard row. Higher score first; faster submission wins ties.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub student_id: i64,
    pub score: i64,
    pub accuracy: f64,
    pub time_taken_seconds: i64,
    pub submitted_at: DateTime<Utc>,
}

/// Accuracy statistics for a single question across all attempts.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionStat {
    pub question_id: i64,
    pub text: String,
    pub topic: String,
    pub correct_option: i32,
    pub attempts: usize,
    pub correct: usize,
    pub accuracy: f64,
}

/// Full analytics report for one exam.
#[derive(Debug, Clone, Serialize)]
pub struct ExamReport {
    pub exam: ExamHeader,
    pub metrics: ExamMetrics,
    pub top_performers: Vec<LeaderboardEntry>,
    pub question_wise: Vec<QuestionStat>,
    pub weakest_questions: Vec<QuestionStat>,
}

/// One day of aggregated performance.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub avg_score: f64,
    pub attempted: usize,
}

/// One row of a student's attempt history, enriched with the exam's current
/// title and subject.
#[derive(Debug, Clone, Serialize)]
pub struct ExamHistoryRow {
    pub attempt_id: i64,
    pub exam_id: i64,
    pub exam_title: String,
    pub subject: String,
    pub score: i64,
    pub accuracy: f64,
    pub time_taken_seconds: i64,
    pub submitted_at: DateTime<Utc>,
}

/// Accuracy accumulated over every answer a student gave in one topic.
#[derive(Debug, Clone, Serialize)]
pub struct TopicStat {
    pub topic: String,
    pub attempts: usize,
    pub correct: usize,
    pub accuracy: f64,
}

/// A student's standing within one exam's cohort.
#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    pub exam_id: i64,

    /// 1-based position, `None` when the student is absent from the cohort.
    pub rank: Option<usize>,

    /// Cohort size.
    pub total: usize,

    /// Mean score of the cohort, for comparison.
    pub avg_score: f64,
}

/// Full analytics report for one student.
#[derive(Debug, Clone, Serialize)]
pub struct StudentReport {
    pub history: Vec<ExamHistoryRow>,
    pub topics: Vec<TopicStat>,
    pub strengths: Vec<TopicStat>,
    pub weaknesses: Vec<TopicStat>,
    pub ranks: Vec<RankEntry>,
}

/// Per-exam row of the administrator overview.
#[derive(Debug, Clone, Serialize)]
pub struct ExamOverviewRow {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub total_marks: i64,
    pub is_published: bool,
    pub attempted: usize,
    pub avg_score: f64,
}

/// Published exam as listed to a student, flagging prior attempts.
#[derive(Debug, Clone, Serialize)]
pub struct OpenExamRow {
    pub id: i64,
    pub title: String,
    pub subject: String,
    pub duration_minutes: i64,
    pub total_marks: i64,
    pub question_count: usize,
    pub has_attempted: bool,
}

/// Compact attempt row for the per-exam attempt listing.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptSummary {
    pub id: i64,
    pub student_id: i64,
    pub score: i64,
    pub accuracy: f64,
    pub time_taken_seconds: i64,
    pub submitted_at: DateTime<Utc>,
}
