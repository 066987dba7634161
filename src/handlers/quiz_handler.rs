use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::ActionError,
    models::{
        session::{Answer, QuizSession, TimerState},
        snapshot::QuizSnapshot,
    },
};

/// Every way a session can change. `Tick` comes from the countdown driver and
/// must carry the epoch it was armed for.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectAnswer(usize),
    GoNext,
    GoPrevious,
    Restart,
    Tick { epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    Timeout,
}

impl QuizSession {
    /// Applies one action. On error nothing has been modified.
    pub fn dispatch(&mut self, action: Action) -> Result<QuizSnapshot, ActionError> {
        let result = match action {
            Action::SelectAnswer(index) => self.apply_select(index),
            Action::GoNext => self.apply_next(Origin::User),
            Action::GoPrevious => self.apply_previous(),
            Action::Restart => {
                self.apply_restart();
                Ok(())
            }
            Action::Tick { epoch } => self.apply_tick(epoch),
        };

        match result {
            Ok(()) => Ok(self.snapshot()),
            Err(error) => {
                debug!("[{}] Rejected {:?}: {}", self.id, action, error);
                Err(error)
            }
        }
    }

    pub fn select_answer(&mut self, index: usize) -> Result<QuizSnapshot, ActionError> {
        self.dispatch(Action::SelectAnswer(index))
    }

    pub fn go_next(&mut self) -> Result<QuizSnapshot, ActionError> {
        self.dispatch(Action::GoNext)
    }

    pub fn go_previous(&mut self) -> Result<QuizSnapshot, ActionError> {
        self.dispatch(Action::GoPrevious)
    }

    pub fn restart(&mut self) -> QuizSnapshot {
        self.apply_restart();
        self.snapshot()
    }

    pub fn tick(&mut self, epoch: u64) -> Result<QuizSnapshot, ActionError> {
        self.dispatch(Action::Tick { epoch })
    }

    fn apply_select(&mut self, index: usize) -> Result<(), ActionError> {
        if self.completed {
            return Err(ActionError::QuizCompleted);
        }
        let options = self.current_question().option_count();
        if index >= options {
            return Err(ActionError::OptionOutOfRange { index, options });
        }

        self.selection = Some(index);
        if self.timer == TimerState::Running {
            self.pause_timer();
        }
        Ok(())
    }

    fn apply_next(&mut self, origin: Origin) -> Result<(), ActionError> {
        if self.completed {
            return Err(ActionError::QuizCompleted);
        }

        let index = self.current_index;
        let answer = match (self.selection, self.answers.get(&index)) {
            (Some(selected), _) => Answer::Selected(selected),
            (None, Some(Answer::Selected(recorded))) => Answer::Selected(*recorded),
            (None, _) if origin == Origin::Timeout => Answer::Unanswered,
            (None, _) => return Err(ActionError::NoSelection { index }),
        };
        self.answers.insert(index, answer);
        debug!("[{}] Committed {:?} for question {}", self.id, answer, index);

        if index + 1 == self.questions.len() {
            let score = self.compute_score();
            self.score = Some(score);
            self.completed = true;
            self.timer = match origin {
                Origin::User => TimerState::Paused,
                Origin::Timeout => TimerState::Expired,
            };
            self.epoch += 1;
            info!(
                "[{}] Quiz completed with score {}/{}",
                self.id,
                score,
                self.questions.len()
            );
        } else {
            self.current_index += 1;
            self.selection = None;
            self.start_timer();
        }
        Ok(())
    }

    fn apply_previous(&mut self) -> Result<(), ActionError> {
        if self.completed {
            return Err(ActionError::QuizCompleted);
        }
        if self.current_index == 0 {
            return Err(ActionError::NoPreviousQuestion);
        }

        self.current_index -= 1;
        self.selection = self
            .answers
            .get(&self.current_index)
            .and_then(Answer::selected);
        // a revisited question never counts down again
        self.pause_timer();
        Ok(())
    }

    fn apply_restart(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.selection = None;
        self.completed = false;
        self.score = None;
        self.start_timer();
        info!("[{}] Quiz restarted", self.id);
    }

    fn apply_tick(&mut self, epoch: u64) -> Result<(), ActionError> {
        if epoch != self.epoch || !self.timer_running() {
            return Err(ActionError::StaleTick {
                tick: epoch,
                current: self.epoch,
            });
        }

        self.remaining_time = self.remaining_time.saturating_sub(1);
        if self.remaining_time == 0 {
            info!(
                "[{}] Time is up on question {}",
                self.id, self.current_index
            );
            self.timer = TimerState::Expired;
            self.apply_next(Origin::Timeout)?;
        }
        Ok(())
    }

    fn start_timer(&mut self) {
        self.remaining_time = self.time_limit;
        self.timer = TimerState::Running;
        self.epoch += 1;
    }

    fn pause_timer(&mut self) {
        self.timer = TimerState::Paused;
        self.epoch += 1;
    }
}
