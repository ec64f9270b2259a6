mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use serde::{Deserialize, Serialize};

use crate::db::queries::categories::CategoryMap;
use crate::db::Question;
use crate::pagination::{paginate, DEFAULT_PAGE};

use super::deserializers::deserialize_lenient_page;
pub use super::error::{ApiError, ApiResponse};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }
}

/// One page of questions, shared by every route that lists them.
#[derive(Debug, Serialize)]
pub struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<CategoryMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<i64>,
}

impl QuestionsPage {
    /// `total_questions` counts all of `questions`, not just the page. An empty page is
    /// reported as not found.
    fn paginated(questions: &[Question], page: u32) -> ApiResponse<Self> {
        let current = paginate(questions, page);
        if current.is_empty() {
            return Err(ApiError::NotFound);
        }
        Ok(Self {
            success: true,
            questions: current.to_vec(),
            total_questions: questions.len(),
            categories: None,
            current_category: None,
            created: None,
        })
    }
}
