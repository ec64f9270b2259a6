use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::Question,
    quiz::{self, QuizCategory},
    server::{app::AppState, extractors::ApiJson},
    telemetry::QUIZ_QUESTIONS_CNTR,
};

use super::{ApiError, ApiResponse};

#[derive(Deserialize)]
struct QuizBody {
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
    quiz_category: Option<QuizCategoryBody>,
}

// the frontend sends `{type, id}`; only the id matters
#[derive(Deserialize)]
struct QuizCategoryBody {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Question,
    total_questions: usize,
}

async fn next_quiz_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizBody>,
) -> ApiResponse<Json<QuizResponse>> {
    let category = body
        .quiz_category
        .map(|c| QuizCategory::from(c.id))
        .ok_or_else(|| ApiError::BadRequest("quiz_category is required".to_owned()))?;
    let previous = body.previous_questions.unwrap_or_default();

    let candidates = quiz::remaining_questions(&pool, category, &previous).await?;
    let pick = {
        let mut rng = rand::thread_rng();
        quiz::draw(candidates, &mut rng)?
    };

    let label = match category {
        QuizCategory::Any => "all".to_owned(),
        QuizCategory::Only(id) => id.to_string(),
    };
    QUIZ_QUESTIONS_CNTR.with_label_values(&[label.as_str()]).inc();
    tracing::debug!(
        id = pick.question.id,
        remaining = pick.remaining,
        "Drew quiz question"
    );

    Ok(Json(QuizResponse {
        success: true,
        question: pick.question,
        total_questions: pick.remaining,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question))
        .with_state(state)
}
