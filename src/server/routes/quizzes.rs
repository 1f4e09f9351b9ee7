use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Question,
    },
    server::{
        app::AppState,
        error::{ApiError, ApiResult},
        extract::ApiJson,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

/// Reserved category id the players send for "all categories".
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize)]
struct QuizBody {
    quiz_category: QuizCategory,
    // Raw value so a non-list answers 400 only after the category lookup
    // has had its chance to 404.
    #[serde(default)]
    previous_questions: Value,
}

#[derive(Deserialize)]
struct QuizCategory {
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizBody>,
) -> ApiResult<Json<QuizResponse>> {
    let category = match body.quiz_category.id {
        ALL_CATEGORIES => None,
        id => {
            let category = categories::get_category(&pool, id)
                .await?
                .ok_or(ApiError::NotFound)?;
            Some(category.id)
        }
    };

    let previous: Vec<i64> = match &body.previous_questions {
        Value::Array(seen) => seen.iter().filter_map(Value::as_i64).collect(),
        _ => return Err(ApiError::BadRequest),
    };

    let candidates = questions::get_quiz_candidates(&pool, category, &previous).await?;
    let question = pick_random(candidates);

    if question.is_some() {
        QUIZ_QUESTIONS_SERVED
            .with_label_values(&[body.quiz_category.id.to_string().as_str()])
            .inc();
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

fn pick_random(mut candidates: Vec<Question>) -> Option<Question> {
    if candidates.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
