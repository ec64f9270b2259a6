use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        NewQuestion,
    },
    pagination::DEFAULT_PAGE,
    server::{
        app::AppState,
        deserializers::deserialize_non_empty_string,
        extractors::{ApiJson, ApiPath},
    },
    telemetry::CREATED_QUESTIONS_CNTR,
};

use super::{ApiError, ApiResponse, PageQuery, QuestionsPage};

/// `POST /questions` either searches (when `searchTerm` is present) or creates a question.
#[derive(Deserialize)]
struct QuestionsBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    question: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty_string")]
    answer: Option<String>,
    // `<select>` values arrive as strings
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
}

impl QuestionsBody {
    fn into_new_question(self) -> ApiResponse<NewQuestion> {
        match (self.question, self.answer, self.difficulty, self.category) {
            (Some(question), Some(answer), Some(difficulty), Some(category)) => Ok(NewQuestion {
                question,
                answer,
                category,
                difficulty,
            }),
            (question, answer, difficulty, category) => {
                let missing: Vec<&str> = [
                    ("question", question.is_none()),
                    ("answer", answer.is_none()),
                    ("difficulty", difficulty.is_none()),
                    ("category", category.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, missing)| missing.then_some(field))
                .collect();
                Err(ApiError::Unprocessable(format!(
                    "missing fields: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let questions = questions::get_all_questions(&pool).await?;
    let mut page = QuestionsPage::paginated(&questions, query.page())?;
    page.categories = Some(categories::to_map(
        categories::get_all_categories(&pool).await?,
    ));
    Ok(Json(page))
}

async fn post_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
    ApiJson(body): ApiJson<QuestionsBody>,
) -> ApiResponse<Json<QuestionsPage>> {
    if let Some(term) = body.search_term.as_deref() {
        return search(&pool, term, query.page()).await.map(Json);
    }
    create(&pool, body).await.map(Json)
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<QuestionsPage>> {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::BadRequest("searchTerm is required".to_owned()))?;
    search(&pool, &term, query.page()).await.map(Json)
}

async fn search(pool: &SqlitePool, term: &str, page: u32) -> ApiResponse<QuestionsPage> {
    let matches = questions::search_questions(pool, term).await?;
    tracing::debug!(term, matches = matches.len(), "Searched questions");
    QuestionsPage::paginated(&matches, page)
}

async fn create(pool: &SqlitePool, body: QuestionsBody) -> ApiResponse<QuestionsPage> {
    let new_question = body.into_new_question()?;

    // dropping `tx` on an early return rolls the insert back
    let mut tx = pool.begin().await?;
    let id = questions::create_question(&mut tx, &new_question).await?;
    tx.commit().await?;

    CREATED_QUESTIONS_CNTR.inc();
    tracing::info!(id, category = new_question.category, "Created question");

    let questions = questions::get_all_questions(pool).await?;
    let mut page = QuestionsPage::paginated(&questions, DEFAULT_PAGE)?;
    page.created = Some(id);
    Ok(page)
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    let question = questions::get_question(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut tx = pool.begin().await?;
    if questions::delete_question(&mut tx, question.id).await? == 0 {
        // removed by someone else since the lookup
        return Err(ApiError::NotFound);
    }
    tx.commit().await?;

    tracing::info!(id, "Deleted question");
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(post_questions))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
