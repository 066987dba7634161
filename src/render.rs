use std::io::{self, Write};

use crate::models::{
    communication::Response,
    question::option_label,
    session::Answer,
    snapshot::{QuizReview, QuizSnapshot, TimerUrgency},
};

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Terminal view of a session. Only reads responses, never touches the
/// session itself.
#[derive(Default)]
pub struct Renderer {
    last: Option<QuizSnapshot>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render<W: Write>(&mut self, response: &Response, out: &mut W) -> io::Result<()> {
        match response {
            Response::Snapshot(snapshot) => {
                if snapshot.completed {
                    // the review that follows shows the result
                } else if self.only_clock_changed(snapshot) {
                    render_clock(snapshot, out)?;
                } else {
                    render_question(snapshot, out)?;
                }
                self.last = Some(snapshot.clone());
            }
            Response::ActionRejected { reason, .. } => {
                writeln!(out, "{}! {}{}", YELLOW, reason, RESET)?;
            }
            Response::QuizFinished(review) => render_review(review, out)?,
        }
        out.flush()
    }

    fn only_clock_changed(&self, snapshot: &QuizSnapshot) -> bool {
        match &self.last {
            Some(last) => {
                !last.completed
                    && last.current_index == snapshot.current_index
                    && last.current_selection == snapshot.current_selection
                    && last.epoch == snapshot.epoch
            }
            None => false,
        }
    }
}

fn urgency_colour(urgency: TimerUrgency) -> &'static str {
    match urgency {
        TimerUrgency::Relaxed => GREEN,
        TimerUrgency::Hurry => YELLOW,
        TimerUrgency::Critical => RED,
    }
}

fn render_clock<W: Write>(snapshot: &QuizSnapshot, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{}{}s left{}",
        urgency_colour(snapshot.urgency()),
        snapshot.remaining_time,
        RESET
    )
}

pub fn render_question<W: Write>(snapshot: &QuizSnapshot, out: &mut W) -> io::Result<()> {
    let timer = if snapshot.timer_running {
        format!("{}s", snapshot.remaining_time)
    } else {
        format!("{}s (paused)", snapshot.remaining_time)
    };

    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {} ({:.0}% complete)   {}{}{}",
        snapshot.current_index + 1,
        snapshot.total_questions,
        snapshot.progress_percent(),
        urgency_colour(snapshot.urgency()),
        timer,
        RESET
    )?;
    writeln!(out, "{}", snapshot.current_question.question)?;

    for (index, option) in snapshot.current_question.options.iter().enumerate() {
        let marker = if snapshot.current_selection == Some(index) {
            ">"
        } else {
            " "
        };
        writeln!(out, "{} {}. {}", marker, option_label(index), option)?;
    }

    let next_label = if snapshot.is_last_question() {
        "finish quiz"
    } else {
        "next question"
    };
    if snapshot.current_selection.is_none() {
        writeln!(out, "Please select an answer to continue")?;
    }
    writeln!(
        out,
        "[letter] select  [n] {}  [p] previous  [r] restart  [q] quit",
        next_label
    )
}

pub fn render_review<W: Write>(review: &QuizReview, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Quiz Complete!")?;
    writeln!(
        out,
        "{}/{} - {}% Score - {}",
        review.score,
        review.total,
        review.percentage,
        review.grade.message()
    )?;
    writeln!(out)?;
    writeln!(out, "Answer Review")?;

    for item in &review.items {
        let (colour, mark) = if item.is_correct {
            (GREEN, "correct")
        } else {
            (RED, "wrong")
        };
        writeln!(
            out,
            "{}[{}]{} Q{}: {}",
            colour,
            mark,
            RESET,
            item.index + 1,
            item.question.question
        )?;

        for (index, option) in item.question.options.iter().enumerate() {
            let suffix = if index == item.question.correct_answer {
                " (correct answer)"
            } else if item.user_answer == Answer::Selected(index) {
                " (your answer)"
            } else {
                ""
            };
            writeln!(out, "    {}. {}{}", option_label(index), option, suffix)?;
        }
        if !item.was_answered {
            writeln!(out, "    No answer selected")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "[r] take quiz again  [q] quit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{question::default_question_set, session::QuizSession};

    fn rendered(renderer: &mut Renderer, response: &Response) -> String {
        let mut out = Vec::new();
        renderer.render(response, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_question_then_clock_only() {
        let mut session = QuizSession::new(default_question_set(), 30);
        let mut renderer = Renderer::new();

        let first = rendered(&mut renderer, &Response::Snapshot(session.snapshot()));
        assert!(first.contains("Question 1 of 5 (20% complete)"));
        assert!(first.contains("What is the capital of France?"));
        assert!(first.contains("  C. Paris"));

        let epoch = session.epoch();
        let ticked = session.tick(epoch).unwrap();
        let clock = rendered(&mut renderer, &Response::Snapshot(ticked));
        assert!(clock.contains("29s left"));
        assert!(!clock.contains("Question"));

        let selected = session.select_answer(2).unwrap();
        let text = rendered(&mut renderer, &Response::Snapshot(selected));
        assert!(text.contains("> C. Paris"));
        assert!(text.contains("(paused)"));
    }

    #[test]
    fn renders_review() {
        let mut session = QuizSession::new(default_question_set(), 30);
        for answer in [2, 1, 3, 1, 0] {
            session.select_answer(answer).unwrap();
            session.go_next().unwrap();
        }
        let review = session.review().unwrap();
        let text = rendered(&mut Renderer::new(), &Response::QuizFinished(review));
        assert!(text.contains("3/5 - 60% Score - Good Job!"));
        assert!(text.contains("B. Charles Dickens (your answer)"));
        assert!(text.contains("C. Au"));
    }
}
