// src/analytics/student.rs

use std::collections::HashMap;

use crate::config::{FALLBACK_TOPIC, TOPIC_HIGHLIGHT_COUNT};
use crate::models::attempt::Attempt;
use crate::models::exam::Exam;
use crate::models::report::{ExamHistoryRow, RankEntry, StudentReport, TopicStat};
use crate::utils::percent::{ratio_percent, round2};

/// Computes the full analytics report for one student.
///
/// `attempts` holds every attempt of the student, sorted by creation time
/// ascending. `exams` maps exam id to the current (possibly edited) exam
/// snapshot; `cohorts` maps exam id to all attempts for that exam. Both maps
/// are assembled by the caller before this pure pass runs.
///
/// Attempts whose exam no longer resolves lose their history row and topic
/// contribution but keep their rank entry, which only needs the cohort.
pub fn analyze_student(
    student_id: i64,
    attempts: &[Attempt],
    exams: &HashMap<i64, Exam>,
    cohorts: &HashMap<i64, Vec<Attempt>>,
) -> StudentReport {
    let mut history = Vec::with_capacity(attempts.len());
    for attempt in attempts {
        let Some(exam) = exams.get(&attempt.exam_id) else {
            continue;
        };
        history.push(ExamHistoryRow {
            attempt_id: attempt.id,
            exam_id: attempt.exam_id,
            exam_title: exam.title.clone(),
            subject: exam.subject.clone(),
            score: attempt.score,
            accuracy: attempt.accuracy,
            time_taken_seconds: attempt.time_taken_seconds,
            submitted_at: attempt.created_at,
        });
    }

    // One rank entry per distinct exam, in order of first attempt.
    let mut ranks: Vec<RankEntry> = Vec::new();
    for attempt in attempts {
        if ranks.iter().any(|r| r.exam_id == attempt.exam_id) {
            continue;
        }
        let cohort = cohorts
            .get(&attempt.exam_id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut ordered: Vec<&Attempt> = cohort.iter().collect();
        ordered.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.time_taken_seconds.cmp(&b.time_taken_seconds))
        });

        let rank = ordered
            .iter()
            .position(|a| a.student_id == student_id)
            .map(|idx| idx + 1);
        let avg_score = if ordered.is_empty() {
            0.0
        } else {
            round2(ordered.iter().map(|a| a.score).sum::<i64>() as f64 / ordered.len() as f64)
        };

        ranks.push(RankEntry {
            exam_id: attempt.exam_id,
            rank,
            total: ordered.len(),
            avg_score,
        });
    }

    // Topic accumulators are local to this pass and insertion ordered, so
    // equal-accuracy topics keep the order they were first seen in.
    let mut topic_index: HashMap<String, usize> = HashMap::new();
    let mut topics: Vec<TopicStat> = Vec::new();

    for attempt in attempts {
        let Some(exam) = exams.get(&attempt.exam_id) else {
            continue;
        };
        for answer in &attempt.answers {
            let Some(question) = exam.question(answer.question_id) else {
                continue;
            };
            let topic = effective_topic(&question.topic, &exam.subject);

            let idx = match topic_index.get(&topic) {
                Some(&idx) => idx,
                None => {
                    topics.push(TopicStat {
                        topic: topic.clone(),
                        attempts: 0,
                        correct: 0,
                        accuracy: 0.0,
                    });
                    topic_index.insert(topic, topics.len() - 1);
                    topics.len() - 1
                }
            };

            let stat = &mut topics[idx];
            stat.attempts += 1;
            if answer.selected_option == question.correct_option {
                stat.correct += 1;
            }
        }
    }

    for stat in &mut topics {
        stat.accuracy = ratio_percent(stat.correct, stat.attempts);
    }
    topics.sort_by(|a, b| b.accuracy.total_cmp(&a.accuracy));

    let strengths: Vec<TopicStat> = topics.iter().take(TOPIC_HIGHLIGHT_COUNT).cloned().collect();

    // With fewer than six topics a topic can appear in both lists.
    let mut reversed = topics.clone();
    reversed.reverse();
    let weaknesses: Vec<TopicStat> = reversed.into_iter().take(TOPIC_HIGHLIGHT_COUNT).collect();

    StudentReport {
        history,
        topics,
        strengths,
        weaknesses,
        ranks,
    }
}

/// Topic label fallback chain: question topic, then exam subject, then the
/// catch-all bucket. Blank means empty after trimming.
fn effective_topic(topic: &str, subject: &str) -> String {
    let topic = topic.trim();
    if !topic.is_empty() {
        return topic.to_string();
    }
    let subject = subject.trim();
    if !subject.is_empty() {
        return subject.to_string();
    }
    FALLBACK_TOPIC.to_string()
}
