use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::post::{AnalysisResponse, AttachAnalysisRequest, CreatePostRequest, PostResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, middleware::session::Caller};

use super::services;

#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only athletes can post clips")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn create_post(
    State(db): State<Database>,
    Caller(session): Caller,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let post = services::create_post(db.pool(), &session, &payload).await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/posts/me",
    responses(
        (status = 200, description = "The caller's posts, newest first", body = Vec<PostResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only athletes have posts")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn list_own_posts(
    State(db): State<Database>,
    Caller(session): Caller,
) -> Result<Response, WebError> {
    let posts = services::list_own_posts(db.pool(), &session).await?;

    let response: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    put,
    path = "/api/posts/{post_id}/analysis",
    params(
        ("post_id" = Uuid, Path, description = "Post identifier")
    ),
    request_body = AttachAnalysisRequest,
    responses(
        (status = 200, description = "Analysis stored and owner rescored", body = AnalysisResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn attach_analysis(
    State(db): State<Database>,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<AttachAnalysisRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let (post, score) = services::attach_analysis(db.pool(), post_id, &payload).await?;

    Ok(Json(AnalysisResponse {
        post: PostResponse::from(post),
        score,
    })
    .into_response())
}
