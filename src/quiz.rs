//! Random quiz question selection.
//!
//! Candidates are resolved against the store first, then a question is drawn uniformly from
//! whatever is left after removing the ids the player has already seen. Drawing is kept
//! synchronous so a thread-local rng never lives across an `.await`.

use rand::Rng;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db::queries::{categories, questions};
use crate::db::Question;

/// Category filter of a quiz round. The id `0` stands for every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    Any,
    Only(i64),
}

impl From<i64> for QuizCategory {
    fn from(id: i64) -> Self {
        match id {
            0 => QuizCategory::Any,
            id => QuizCategory::Only(id),
        }
    }
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("category {0} does not exist")]
    UnknownCategory(i64),
    #[error("no questions left to ask")]
    Exhausted,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizPick {
    pub question: Question,
    /// Number of questions the pick was drawn from.
    pub remaining: usize,
}

/// Questions of `category` that are not in `previous`, ordered by id.
pub async fn remaining_questions(
    pool: &SqlitePool,
    category: QuizCategory,
    previous: &[i64],
) -> Result<Vec<Question>, QuizError> {
    let filter = match category {
        QuizCategory::Any => None,
        QuizCategory::Only(id) => {
            let category = categories::get_category(pool, id)
                .await?
                .ok_or(QuizError::UnknownCategory(id))?;
            Some(category.id)
        }
    };
    Ok(questions::get_questions_excluding(pool, filter, previous).await?)
}

pub fn draw<R: Rng + ?Sized>(
    mut candidates: Vec<Question>,
    rng: &mut R,
) -> Result<QuizPick, QuizError> {
    if candidates.is_empty() {
        return Err(QuizError::Exhausted);
    }
    let remaining = candidates.len();
    let index = rng.gen_range(0..remaining);
    Ok(QuizPick {
        question: candidates.swap_remove(index),
        remaining,
    })
}
