use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    question::Question,
    session::{Answer, TimerState},
};

/// Read-only view of a session, produced after every transition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSnapshot {
    pub session_id: Uuid,
    pub current_index: usize,
    pub total_questions: usize,
    pub current_question: Question,
    pub current_selection: Option<usize>,
    pub remaining_time: u32,
    pub timer_state: TimerState,
    pub timer_running: bool,
    pub epoch: u64,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<usize>,
    pub answers_so_far: BTreeMap<usize, Answer>,
}

impl QuizSnapshot {
    pub fn progress_percent(&self) -> f64 {
        (self.current_index + 1) as f64 / self.total_questions as f64 * 100.0
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.total_questions
    }

    pub fn urgency(&self) -> TimerUrgency {
        TimerUrgency::from_remaining(self.remaining_time)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerUrgency {
    Relaxed,
    Hurry,
    Critical,
}

impl TimerUrgency {
    pub fn from_remaining(remaining: u32) -> Self {
        if remaining > 10 {
            TimerUrgency::Relaxed
        } else if remaining > 5 {
            TimerUrgency::Hurry
        } else {
            TimerUrgency::Critical
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Grade {
    Excellent,
    GoodJob,
    KeepTrying,
    PracticeMore,
}

impl Grade {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Grade::Excellent
        } else if percentage >= 60.0 {
            Grade::GoodJob
        } else if percentage >= 40.0 {
            Grade::KeepTrying
        } else {
            Grade::PracticeMore
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent!",
            Grade::GoodJob => "Good Job!",
            Grade::KeepTrying => "Keep Trying!",
            Grade::PracticeMore => "Practice More!",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    pub index: usize,
    pub question: Question,
    pub user_answer: Answer,
    pub is_correct: bool,
    pub was_answered: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizReview {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
    pub items: Vec<ReviewItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_thresholds() {
        assert_eq!(Grade::from_percentage(100.0), Grade::Excellent);
        assert_eq!(Grade::from_percentage(80.0), Grade::Excellent);
        assert_eq!(Grade::from_percentage(79.9), Grade::GoodJob);
        assert_eq!(Grade::from_percentage(60.0), Grade::GoodJob);
        assert_eq!(Grade::from_percentage(40.0), Grade::KeepTrying);
        assert_eq!(Grade::from_percentage(33.3), Grade::PracticeMore);
        assert_eq!(Grade::from_percentage(0.0), Grade::PracticeMore);
    }

    #[test]
    fn urgency_follows_remaining_time() {
        assert_eq!(TimerUrgency::from_remaining(30), TimerUrgency::Relaxed);
        assert_eq!(TimerUrgency::from_remaining(11), TimerUrgency::Relaxed);
        assert_eq!(TimerUrgency::from_remaining(10), TimerUrgency::Hurry);
        assert_eq!(TimerUrgency::from_remaining(6), TimerUrgency::Hurry);
        assert_eq!(TimerUrgency::from_remaining(5), TimerUrgency::Critical);
        assert_eq!(TimerUrgency::from_remaining(0), TimerUrgency::Critical);
    }
}
