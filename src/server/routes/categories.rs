use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Category, Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResult},
        extract::ApiPath,
        pagination::{page_slice, parse_page},
    },
};

#[derive(Deserialize)]
struct PageQuery {
    page: Option<String>,
}

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Category,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = categories::get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

async fn questions_by_category(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<CategoryQuestionsResponse>> {
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let selection = questions::get_questions_for_category(&pool, category.id).await?;
    let page = parse_page(query.page.as_deref());
    // No empty-page 404 here: a page past the end of a category is an empty
    // list, unlike the /questions listing.
    let current = page_slice(&selection, page).to_vec();

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: current,
        total_questions: selection.len(),
        current_category: category,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_by_category))
        .with_state(state)
}
