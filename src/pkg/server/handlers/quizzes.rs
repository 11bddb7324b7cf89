use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::pkg::server::extract::{JsonBody, PathParam};
use crate::{
    pkg::{
        internal::{
            adaptors::{
                quizzes::{
                    mutators::QuizMutator,
                    selectors::QuizSelector,
                    spec::{CreateQuizInput, PatchQuizInput, QuizSummary, QuizView, SubmissionInput},
                },
                results::{
                    mutators::ResultMutator,
                    selectors::ResultSelector,
                    spec::{GradedSubmission, MyResult},
                },
            },
            auth::User,
            grading,
        },
        server::state::{AppState, GetTxn},
    },
    prelude::{ApiError, Result},
};

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    JsonBody(input): JsonBody<CreateQuizInput>,
) -> Result<(StatusCode, Json<QuizView>)> {
    input.validate()?;
    tracing::info!(
        "creating quiz {:?} with {} questions for {}",
        &input.title,
        input.questions.len(),
        &user.email
    );
    let mut conn = state.db_pool.acquire().await?;
    let mut quiz = QuizMutator::new(&mut conn).create(input, user.id).await?;
    quiz.creator_name = Some(user.name.clone());
    Ok((StatusCode::CREATED, Json(quiz.public())))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<QuizSummary>>> {
    let mut conn = state.db_pool.acquire().await?;
    Ok(Json(QuizSelector::new(&mut conn).get_all().await?))
}

pub async fn detail(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<QuizView>> {
    let mut conn = state.db_pool.acquire().await?;
    let quiz = QuizSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quiz not found"))?;
    Ok(Json(quiz.public()))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(input): JsonBody<PatchQuizInput>,
) -> Result<Json<QuizView>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let quiz = QuizSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quiz not found"))?;
    user.ensure_owns(quiz.creator, "Not authorized to update this quiz")?;
    input.validate()?;
    let mut updated = QuizMutator::new(&mut tx)
        .update(id, input)
        .await?
        .ok_or_else(|| ApiError::not_found("Quiz not found"))?;
    tx.commit().await?;
    updated.creator_name = quiz.creator_name;
    Ok(Json(updated.public()))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Value>> {
    let mut tx = state.db_pool.begin_txn().await?;
    let quiz = QuizSelector::new(&mut tx)
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quiz not found"))?;
    user.ensure_owns(quiz.creator, "Not authorized to delete this quiz")?;
    QuizMutator::new(&mut tx).delete(id).await?;
    tx.commit().await?;
    Ok(Json(json!({ "message": "Quiz deleted successfully" })))
}

pub async fn submit(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(input): JsonBody<SubmissionInput>,
) -> Result<Json<GradedSubmission>> {
    let mut conn = state.db_pool.acquire().await?;
    let quiz = QuizSelector::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Quiz not found"))?;
    let correct_answers = quiz.correct_answers();
    let score = grading::tally(&correct_answers, &input.answers);
    let result = ResultMutator::new(&mut conn)
        .create(user.id, quiz.id, score, correct_answers.len() as i32)
        .await?;
    tracing::info!(
        "{} scored {}/{} on {:?}",
        &user.email,
        score,
        correct_answers.len(),
        &quiz.title
    );
    Ok(Json(GradedSubmission {
        result,
        correct_answers,
    }))
}

pub async fn my_results(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
) -> Result<Json<Vec<MyResult>>> {
    let mut conn = state.db_pool.acquire().await?;
    Ok(Json(ResultSelector::new(&mut conn).for_user(user.id).await?))
}
