// src/analytics/exam.rs

use std::collections::HashMap;

use crate::config::{LEADERBOARD_SIZE, WEAKEST_QUESTION_LIMIT};
use crate::models::attempt::Attempt;
use crate::models::exam::Exam;
use crate::models::report::{
    ExamHeader, ExamMetrics, ExamReport, LeaderboardEntry, QuestionStat,
};
use crate::utils::percent::{pass_threshold, ratio_percent, round2};

/// Computes the full analytics report for one exam from all of its graded
/// attempts.
///
/// Total over empty input: zero-valued metrics, an empty leaderboard and
/// zero-attempt question rows. Answers referencing questions the exam no
/// longer has are skipped; attempts may predate an edit.
pub fn analyze_exam(exam: &Exam, attempts: &[Attempt]) -> ExamReport {
    let attempted = attempts.len();
    let threshold = pass_threshold(exam.total_marks);

    let avg_score = if attempted == 0 {
        0.0
    } else {
        round2(attempts.iter().map(|a| a.score).sum::<i64>() as f64 / attempted as f64)
    };

    let pass_count = attempts.iter().filter(|a| a.score >= threshold).count();
    let fail_count = attempted - pass_count;
    let pass_rate = ratio_percent(pass_count, attempted);

    let mut ranked: Vec<&Attempt> = attempts.iter().collect();
    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.time_taken_seconds.cmp(&b.time_taken_seconds))
    });
    let top_performers = ranked
        .iter()
        .take(LEADERBOARD_SIZE)
        .map(|a| LeaderboardEntry {
            student_id: a.student_id,
            score: a.score,
            accuracy: a.accuracy,
            time_taken_seconds: a.time_taken_seconds,
            submitted_at: a.created_at,
        })
        .collect();

    // One tally slot per current question, in exam order. Questions nobody
    // attempted keep a zero row.
    let index_by_id: HashMap<i64, usize> = exam
        .questions
        .iter()
        .enumerate()
        .map(|(idx, q)| (q.id, idx))
        .collect();
    let mut tallies = vec![(0usize, 0usize); exam.questions.len()];

    for attempt in attempts {
        for answer in &attempt.answers {
            let Some(&idx) = index_by_id.get(&answer.question_id) else {
                continue;
            };
            tallies[idx].0 += 1;
            if answer.selected_option == exam.questions[idx].correct_option {
                tallies[idx].1 += 1;
            }
        }
    }

    let question_wise: Vec<QuestionStat> = exam
        .questions
        .iter()
        .zip(&tallies)
        .map(|(q, &(times_answered, correct))| QuestionStat {
            question_id: q.id,
            text: q.text.clone(),
            topic: if q.topic.trim().is_empty() {
                exam.subject.clone()
            } else {
                q.topic.clone()
            },
            correct_option: q.correct_option,
            attempts: times_answered,
            correct,
            accuracy: ratio_percent(correct, times_answered),
        })
        .collect();

    let mut weakest_questions: Vec<QuestionStat> = question_wise
        .iter()
        .filter(|q| q.attempts > 0)
        .cloned()
        .collect();
    weakest_questions.sort_by(|a, b| a.accuracy.total_cmp(&b.accuracy));
    weakest_questions.truncate(WEAKEST_QUESTION_LIMIT);

    ExamReport {
        exam: ExamHeader {
            id: exam.id,
            title: exam.title.clone(),
            subject: exam.subject.clone(),
            total_marks: exam.total_marks,
            pass_score: threshold,
        },
        metrics: ExamMetrics {
            attempted,
            avg_score,
            pass_count,
            fail_count,
            pass_rate,
        },
        top_performers,
        question_wise,
        weakest_questions,
    }
}
