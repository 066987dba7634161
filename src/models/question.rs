use std::{collections::HashSet, ops::Deref, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A question as it arrives from a loader, before any checks.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl Question {
    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

impl TryFrom<QuestionInput> for Question {
    type Error = ValidationError;

    fn try_from(input: QuestionInput) -> Result<Self, Self::Error> {
        if input.options.len() < 2 {
            return Err(ValidationError::TooFewOptions {
                id: input.id,
                count: input.options.len(),
            });
        }

        let correct_answer = usize::try_from(input.correct_answer)
            .ok()
            .filter(|index| *index < input.options.len())
            .ok_or(ValidationError::CorrectAnswerOutOfRange {
                id: input.id,
                correct_answer: input.correct_answer,
                options: input.options.len(),
            })?;

        Ok(Question {
            id: input.id,
            question: input.question,
            options: input.options,
            correct_answer,
        })
    }
}

/// Ordered, non-empty list of questions with unique ids.
///
/// Cloning is cheap: every clone shares the same backing slice, so a session
/// and its renderer can both hold one without copying the questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Arc<[Question]>,
}

impl QuestionSet {
    pub fn new(inputs: Vec<QuestionInput>) -> Result<Self, ValidationError> {
        if inputs.is_empty() {
            return Err(ValidationError::Empty);
        }

        let mut seen_ids = HashSet::with_capacity(inputs.len());
        let mut questions = Vec::with_capacity(inputs.len());
        for input in inputs {
            if !seen_ids.insert(input.id) {
                return Err(ValidationError::DuplicateId { id: input.id });
            }
            questions.push(Question::try_from(input)?);
        }

        Ok(QuestionSet {
            questions: questions.into(),
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

impl Deref for QuestionSet {
    type Target = [Question];

    fn deref(&self) -> &Self::Target {
        &self.questions
    }
}

fn built_in(id: u64, question: &str, options: [&str; 4], correct_answer: usize) -> Question {
    Question {
        id,
        question: question.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct_answer,
    }
}

/// Built-in questions used when no external list could be loaded.
pub fn default_question_set() -> QuestionSet {
    let questions = vec![
        built_in(
            1,
            "What is the capital of France?",
            ["London", "Berlin", "Paris", "Madrid"],
            2,
        ),
        built_in(
            2,
            "Which planet is known as the Red Planet?",
            ["Venus", "Mars", "Jupiter", "Saturn"],
            1,
        ),
        built_in(
            3,
            "What is the largest ocean on Earth?",
            ["Atlantic", "Indian", "Arctic", "Pacific"],
            3,
        ),
        built_in(
            4,
            "Who wrote \"Romeo and Juliet\"?",
            [
                "William Shakespeare",
                "Charles Dickens",
                "Jane Austen",
                "Mark Twain",
            ],
            0,
        ),
        built_in(
            5,
            "What is the chemical symbol for gold?",
            ["Go", "Gd", "Au", "Ag"],
            2,
        ),
    ];

    QuestionSet {
        questions: questions.into(),
    }
}

/// `0 -> "A"`, `1 -> "B"`, ... past `Z` the 1-based number is used instead.
pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => char::from(b'A' + offset).to_string(),
        _ => (index + 1).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_options(id: u64, correct_answer: i64) -> QuestionInput {
        QuestionInput {
            id,
            question: format!("Question {}", id),
            options: vec!["yes".to_string(), "no".to_string()],
            correct_answer,
        }
    }

    #[test]
    fn accepts_valid_list() {
        let set = QuestionSet::new(vec![two_options(1, 0), two_options(2, 1)]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set[1].correct_answer, 1);
    }

    #[test]
    fn rejects_empty_list() {
        assert_eq!(QuestionSet::new(vec![]), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_single_option() {
        let mut question = two_options(7, 0);
        question.options.pop();
        assert_eq!(
            QuestionSet::new(vec![question]),
            Err(ValidationError::TooFewOptions { id: 7, count: 1 })
        );
    }

    #[test]
    fn rejects_out_of_range_correct_answer() {
        assert_eq!(
            QuestionSet::new(vec![two_options(3, 2)]),
            Err(ValidationError::CorrectAnswerOutOfRange {
                id: 3,
                correct_answer: 2,
                options: 2
            })
        );
        assert!(matches!(
            QuestionSet::new(vec![two_options(3, -1)]),
            Err(ValidationError::CorrectAnswerOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        assert_eq!(
            QuestionSet::new(vec![two_options(1, 0), two_options(1, 1)]),
            Err(ValidationError::DuplicateId { id: 1 })
        );
    }

    #[test]
    fn parses_camel_case_records() {
        let data = r#"[{"id": 9, "question": "2 + 2?", "options": ["3", "4"], "correctAnswer": 1}]"#;
        let inputs: Vec<QuestionInput> = serde_json::from_str(data).unwrap();
        let set = QuestionSet::new(inputs).unwrap();
        assert_eq!(set[0].id, 9);
        assert_eq!(set[0].options[set[0].correct_answer], "4");
    }

    #[test]
    fn default_set_passes_validation() {
        let defaults = default_question_set();
        let inputs = defaults
            .iter()
            .map(|question| QuestionInput {
                id: question.id,
                question: question.question.clone(),
                options: question.options.clone(),
                correct_answer: question.correct_answer as i64,
            })
            .collect();
        assert_eq!(QuestionSet::new(inputs).unwrap(), defaults);
        assert_eq!(defaults.len(), 5);
    }

    #[test]
    fn labels_options_with_letters() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(26), "27");
    }
}
