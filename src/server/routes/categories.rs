use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::queries::{
        categories::{self, get_all_categories, CategoryMap},
        questions,
    },
    server::{app::AppState, extractors::ApiPath},
};

use super::{ApiError, ApiResponse, PageQuery, QuestionsPage};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: CategoryMap,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories: categories::to_map(categories),
    }))
}

async fn get_category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let questions = questions::get_questions_for_category(&pool, category.id).await?;

    let mut page = QuestionsPage::paginated(&questions, query.page())?;
    page.current_category = Some(category.kind);
    Ok(Json(page))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(get_category_questions))
        .with_state(state)
}
