use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ActionError,
    models::{
        question::{Question, QuestionSet},
        snapshot::{Grade, QuizReview, QuizSnapshot, ReviewItem},
    },
};

pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// A committed answer. `Unanswered` is never equal to any option index.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    Selected(usize),
    Unanswered,
}

impl Answer {
    pub fn is_correct_for(&self, question: &Question) -> bool {
        match self {
            Answer::Selected(index) => *index == question.correct_answer,
            Answer::Unanswered => false,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            Answer::Selected(index) => Some(*index),
            Answer::Unanswered => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerState {
    Running,
    Paused,
    Expired,
}

/// Mutable state of one run through a `QuestionSet`.
///
/// Mutation goes through `dispatch` (see `handlers::quiz_handler`); everything
/// public here is read-only.
#[derive(Debug, Clone)]
pub struct QuizSession {
    pub(crate) id: Uuid,
    pub(crate) questions: QuestionSet,
    pub(crate) time_limit: u32,
    pub(crate) current_index: usize,
    pub(crate) answers: BTreeMap<usize, Answer>,
    pub(crate) selection: Option<usize>,
    pub(crate) remaining_time: u32,
    pub(crate) timer: TimerState,
    // bumped whenever the countdown is armed or disarmed
    pub(crate) epoch: u64,
    pub(crate) completed: bool,
    pub(crate) score: Option<usize>,
}

impl QuizSession {
    pub fn new(questions: QuestionSet, time_limit: u32) -> Self {
        let time_limit = time_limit.max(1);
        QuizSession {
            id: Uuid::new_v4(),
            questions,
            time_limit,
            current_index: 0,
            answers: BTreeMap::new(),
            selection: None,
            remaining_time: time_limit,
            timer: TimerState::Running,
            epoch: 0,
            completed: false,
            score: None,
        }
    }

    pub fn with_default_time_limit(questions: QuestionSet) -> Self {
        Self::new(questions, DEFAULT_TIME_LIMIT_SECS)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn current_selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn answers(&self) -> &BTreeMap<usize, Answer> {
        &self.answers
    }

    pub fn remaining_time(&self) -> u32 {
        self.remaining_time
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer
    }

    pub fn timer_running(&self) -> bool {
        !self.completed && self.timer == TimerState::Running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn score(&self) -> Option<usize> {
        self.score
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            session_id: self.id,
            current_index: self.current_index,
            total_questions: self.questions.len(),
            current_question: self.current_question().clone(),
            current_selection: self.selection,
            remaining_time: self.remaining_time,
            timer_state: self.timer,
            timer_running: self.timer_running(),
            epoch: self.epoch,
            completed: self.completed,
            score: self.score,
            answers_so_far: self.answers.clone(),
        }
    }

    /// Per-question breakdown of a finished quiz.
    pub fn review(&self) -> Result<QuizReview, ActionError> {
        let score = match (self.completed, self.score) {
            (true, Some(score)) => score,
            _ => return Err(ActionError::QuizNotCompleted),
        };

        let items = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let user_answer = self
                    .answers
                    .get(&index)
                    .copied()
                    .unwrap_or(Answer::Unanswered);
                ReviewItem {
                    index,
                    question: question.clone(),
                    user_answer,
                    is_correct: user_answer.is_correct_for(question),
                    was_answered: user_answer != Answer::Unanswered,
                }
            })
            .collect();

        let total = self.questions.len();
        let ratio = score as f64 / total as f64 * 100.0;
        Ok(QuizReview {
            score,
            total,
            percentage: ratio.round() as u32,
            grade: Grade::from_percentage(ratio),
            items,
        })
    }

    pub(crate) fn compute_score(&self) -> usize {
        self.questions
            .iter()
            .enumerate()
            .filter(|(index, question)| {
                self.answers
                    .get(index)
                    .map_or(false, |answer| answer.is_correct_for(question))
            })
            .count()
    }
}
