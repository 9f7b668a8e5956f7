// Quiz content behind a repository seam
//

use interfacing::domain::TileKind;
use interfacing::quiz::{Category, QuestionPrompt};
use rand::seq::SliceRandom;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub description: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub answer: i32,
    pub category: Category,
    pub tile_kind: TileKind,
}

impl Question {
    pub fn prompt(&self) -> QuestionPrompt {
        QuestionPrompt {
            id: self.id.clone(),
            description: self.description.clone(),
            options: self.options.clone(),
            category: self.category.clone(),
            tile_kind: self.tile_kind,
        }
    }

    pub fn is_correct(&self, answer: i32) -> bool {
        self.answer == answer
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("question bank is empty")]
    Empty,
}

pub trait QuestionRepository: Send + Sync {
    fn get_question(&self) -> Result<Question, RepositoryError>;

    /// Unknown question ids are never answered correctly
    fn answer_question(&self, question_id: &str, answer: i32) -> bool;
}

pub type Questions = Arc<dyn QuestionRepository>;

#[derive(Default)]
pub struct InMemoryQuestions {
    questions: Vec<Question>,
}

impl InMemoryQuestions {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// One question per tile kind
    pub fn seeded() -> Self {
        fn question(
            id: &str,
            description: &str,
            options: &[&str],
            answer: i32,
            (category_id, category_name): (&str, &str),
            kind: u8,
        ) -> Option<Question> {
            Some(Question {
                id: id.into(),
                description: description.into(),
                options: options.iter().map(|o| o.to_string()).collect(),
                answer,
                category: Category {
                    id: category_id.into(),
                    name: category_name.into(),
                },
                tile_kind: TileKind::new(kind)?,
            })
        }

        let questions = [
            question(
                "1",
                "How many sides does a hexagon have?",
                &["5", "6", "8"],
                1,
                ("math", "Mathematics"),
                1,
            ),
            question(
                "2",
                "Which planet is closest to the sun?",
                &["Venus", "Mars", "Mercury"],
                2,
                ("science", "Science"),
                2,
            ),
            question(
                "3",
                "Is the Atlantic the largest ocean on Earth?",
                &["True", "False"],
                1,
                ("geography", "Geography"),
                3,
            ),
        ];

        Self::new(questions.into_iter().flatten().collect())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl QuestionRepository for InMemoryQuestions {
    fn get_question(&self) -> Result<Question, RepositoryError> {
        self.questions
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or(RepositoryError::Empty)
    }

    fn answer_question(&self, question_id: &str, answer: i32) -> bool {
        self.questions
            .iter()
            .find(|q| q.id == question_id)
            .map(|q| q.is_correct(answer))
            .unwrap_or(false)
    }
}
