use axum::{
    extract::{Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Category, Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResult},
        extract::{ApiJson, ApiPath},
        pagination::{page_slice, parse_page},
    },
};

#[derive(Deserialize)]
struct QuestionsQuery {
    page: Option<String>,
    search: Option<String>,
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<String>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default, rename = "searchTerm")]
    search_term: Option<String>,
}

// All four fields ride in as raw JSON values so the handler can tell apart
// "empty string" (422), "absent or null" (400) and "present but the wrong
// type" (400 when the row is staged for insert), in that order.
#[derive(Deserialize)]
struct NewQuestion {
    question: Option<Value>,
    answer: Option<Value>,
    difficulty: Option<Value>,
    category: Option<Value>,
}

#[derive(Serialize)]
struct QuestionListResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: Vec<Category>,
    current_category: Category,
}

#[derive(Serialize)]
struct SearchResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Category,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<QuestionsQuery>,
) -> ApiResult<Json<QuestionListResponse>> {
    let selection = match query.search.as_deref() {
        Some(term) => questions::search_questions(&pool, term).await?,
        None => questions::get_all_questions(&pool).await?,
    };

    let page = parse_page(query.page.as_deref());
    let current = page_slice(&selection, page);
    if current.is_empty() {
        // A page past the end and a search with no matches both land here.
        return Err(ApiError::NotFound);
    }
    let current = current.to_vec();

    let all_categories = categories::get_all_categories(&pool).await?;
    let current_category = categories::first_category(&pool).await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: current,
        total_questions: selection.len(),
        categories: all_categories,
        current_category,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    Query(query): Query<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResult<Json<SearchResponse>> {
    let selection = match body.search_term.as_deref() {
        Some(term) => questions::search_questions(&pool, term).await?,
        None => questions::get_all_questions(&pool).await?,
    };

    let page = parse_page(query.page.as_deref());
    let current = page_slice(&selection, page).to_vec();
    let current_category = categories::first_category(&pool).await?;

    Ok(Json(SearchResponse {
        success: true,
        questions: current,
        total_questions: selection.len(),
        current_category,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<NewQuestion>,
) -> ApiResult<Json<CreatedResponse>> {
    // Runs ahead of the presence check: a lone empty string answers 422,
    // not 400.
    for field in [&body.question, &body.answer] {
        if let Some(Value::String(text)) = field {
            if text.is_empty() {
                return Err(ApiError::UnprocessableEntity);
            }
        }
    }

    let (question, answer, difficulty, category) = match (
        &body.question,
        &body.answer,
        &body.difficulty,
        &body.category,
    ) {
        (Some(question), Some(answer), Some(difficulty), Some(category)) => {
            (question, answer, difficulty, category)
        }
        _ => return Err(ApiError::BadRequest),
    };

    // Wrong-typed values answer 400 here, the same status a rejected insert
    // maps to below.
    let question = question.as_str().ok_or(ApiError::BadRequest)?;
    let answer = answer.as_str().ok_or(ApiError::BadRequest)?;
    let difficulty = difficulty.as_i64().ok_or(ApiError::BadRequest)?;
    let category = category.as_i64().ok_or(ApiError::BadRequest)?;

    let id = questions::create_question(&pool, question, answer, difficulty, category)
        .await
        .map_err(|_| ApiError::BadRequest)?;

    Ok(Json(CreatedResponse {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<DeletedResponse>> {
    let question = questions::get_question(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    questions::delete_question(&pool, question.id)
        .await
        .map_err(|_| ApiError::BadRequest)?;

    Ok(Json(DeletedResponse {
        success: true,
        deleted: question.id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
