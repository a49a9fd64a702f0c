// src/grading.rs

use std::collections::HashMap;

use chrono::Utc;

use crate::models::attempt::{Answer, Attempt, SubmittedAnswer, UNANSWERED};
use crate::models::exam::Exam;
use crate::utils::percent::ratio_percent;

/// Grades one submission against a published exam.
///
/// Submitted answers may be sparse, contain duplicates (last write wins) or
/// reference questions outside the exam (ignored). The returned attempt
/// carries exactly one normalized answer per exam question, in exam order,
/// so question-level aggregation can index by question id without misses.
///
/// Deterministic apart from the creation timestamp. Performs no
/// duplicate-attempt check; that is the submission service's and the attempt
/// store's responsibility. The attempt id is assigned by the store.
pub fn grade(
    exam: &Exam,
    student_id: i64,
    submitted: &[SubmittedAnswer],
    time_taken_seconds: i64,
) -> Attempt {
    let mut selections: HashMap<i64, i32> = HashMap::new();
    for answer in submitted {
        selections.insert(answer.question_id, answer.selected_option);
    }

    let mut score = 0;
    let mut correct_count = 0;
    let mut answers = Vec::with_capacity(exam.questions.len());

    for question in &exam.questions {
        let mut selected = selections
            .get(&question.id)
            .copied()
            .unwrap_or(UNANSWERED);

        // An index outside the option list can never be correct; record it
        // as unanswered so every stored answer is -1 or a valid index.
        if selected < UNANSWERED || selected >= question.options.len() as i32 {
            selected = UNANSWERED;
        }

        if selected == question.correct_option {
            score += question.marks;
            correct_count += 1;
        }

        answers.push(Answer {
            question_id: question.id,
            selected_option: selected,
        });
    }

    let total_questions = exam.questions.len();

    Attempt {
        id: 0,
        student_id,
        exam_id: exam.id,
        score,
        accuracy: ratio_percent(correct_count, total_questions),
        correct_count,
        total_questions,
        answers,
        time_taken_seconds: time_taken_seconds.max(0),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::{ExamDraft, QuestionDraft};

    fn options4() -> Vec<String> {
        vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
            "D".to_string(),
        ]
    }

    /// 5 questions worth 2 marks each, correct option always 0.
    fn exam_fixture() -> Exam {
        let mut exam = Exam::new(
            7,
            ExamDraft {
                title: "Algebra Basics".to_string(),
                subject: "Math".to_string(),
                duration_minutes: 30,
            },
        )
        .unwrap();

        for i in 0..5 {
            exam.add_question(QuestionDraft {
                text: format!("Question {}", i + 1),
                topic: String::new(),
                options: options4(),
                correct_option: 0,
                marks: 2,
            })
            .unwrap();
        }
        exam.set_published(true);
        exam
    }

    fn answer(question_id: i64, selected_option: i32) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            selected_option,
        }
    }

    #[test]
    fn three_correct_one_blank_one_wrong() {
        let exam = exam_fixture();
        // q4 left blank, q5 wrong
        let submitted = vec![answer(1, 0), answer(2, 0), answer(3, 0), answer(5, 2)];

        let attempt = grade(&exam, 42, &submitted, 120);

        assert_eq!(attempt.score, 6);
        assert_eq!(attempt.correct_count, 3);
        assert_eq!(attempt.accuracy, 60.0);
        assert_eq!(attempt.total_questions, 5);
        assert_eq!(attempt.answers.len(), 5);
        assert_eq!(attempt.answers[3].selected_option, UNANSWERED);
    }

    #[test]
    fn answers_are_normalized_in_exam_order() {
        let exam = exam_fixture();
        // Sparse, out of order, plus a question id the exam does not have.
        let submitted = vec![answer(3, 1), answer(99, 0), answer(1, 0)];

        let attempt = grade(&exam, 42, &submitted, 10);

        let ids: Vec<i64> = attempt.answers.iter().map(|a| a.question_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(attempt.answers[0].selected_option, 0);
        assert_eq!(attempt.answers[1].selected_option, UNANSWERED);
        assert_eq!(attempt.answers[2].selected_option, 1);
    }

    #[test]
    fn duplicate_submissions_last_write_wins() {
        let exam = exam_fixture();
        let submitted = vec![answer(1, 2), answer(1, 0)];

        let attempt = grade(&exam, 42, &submitted, 10);

        assert_eq!(attempt.answers[0].selected_option, 0);
        assert_eq!(attempt.score, 2);
    }

    #[test]
    fn out_of_range_selection_counts_as_unanswered() {
        let exam = exam_fixture();
        let submitted = vec![answer(1, 7), answer(2, -3)];

        let attempt = grade(&exam, 42, &submitted, 10);

        assert_eq!(attempt.answers[0].selected_option, UNANSWERED);
        assert_eq!(attempt.answers[1].selected_option, UNANSWERED);
        assert_eq!(attempt.score, 0);
    }

    #[test]
    fn grading_is_deterministic() {
        let exam = exam_fixture();
        let submitted = vec![answer(1, 0), answer(2, 3)];

        let first = grade(&exam, 42, &submitted, 55);
        let second = grade(&exam, 42, &submitted, 55);

        assert_eq!(first.score, second.score);
        assert_eq!(first.correct_count, second.correct_count);
        assert_eq!(first.accuracy, second.accuracy);
    }

    #[test]
    fn negative_time_is_clamped() {
        let exam = exam_fixture();
        let attempt = grade(&exam, 42, &[], -30);
        assert_eq!(attempt.time_taken_seconds, 0);
    }

    #[test]
    fn empty_exam_grades_to_zero() {
        let exam = Exam::new(
            1,
            ExamDraft {
                title: "Empty".to_string(),
                subject: "None".to_string(),
                duration_minutes: 10,
            },
        )
        .unwrap();

        let attempt = grade(&exam, 42, &[], 10);

        assert_eq!(attempt.score, 0);
        assert_eq!(attempt.accuracy, 0.0);
        assert!(attempt.answers.is_empty());
    }
}
