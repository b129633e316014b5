use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::domain::post::{Author, CreatePostRequest, Post, UpdatePostRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::extract::ApiJson;

/// Author as sent by clients. Both parts are required together.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorDto {
    pub(crate) first_name: Option<String>,
    pub(crate) last_name: Option<String>,
}

impl AuthorDto {
    fn into_domain(self) -> Result<Author, DomainError> {
        match (self.first_name, self.last_name) {
            (Some(first_name), Some(last_name)) => Author::new(first_name, last_name),
            (None, _) => Err(DomainError::Validation {
                field: "author.firstName",
                message: "is required when author is supplied",
            }),
            (_, None) => Err(DomainError::Validation {
                field: "author.lastName",
                message: "is required when author is supplied",
            }),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(required(message = "title is required"))]
    pub(crate) title: Option<String>,
    #[validate(required(message = "content is required"))]
    pub(crate) content: Option<String>,
    pub(crate) author: Option<AuthorDto>,
}

/// Any subset of the writable fields. An `id` in the body is ignored; the
/// path id selects the post.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1))]
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<AuthorDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) content: String,
    /// `"<firstName> <lastName>"`, empty when the post has no author.
    pub(crate) author: String,
    pub(crate) created: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ListPostsResponseDto {
    pub(crate) posts: Vec<PostDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        let author = post.author_name();
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author,
            created: post.created,
        }
    }
}

impl TryFrom<CreatePostDto> for CreatePostRequest {
    type Error = AppError;

    fn try_from(dto: CreatePostDto) -> Result<Self, Self::Error> {
        dto.validate()?;
        let (Some(title), Some(content)) = (dto.title, dto.content) else {
            return Err(AppError::BadRequest(
                "title and content are required".to_string(),
            ));
        };

        Ok(Self {
            title,
            content,
            author: dto.author.map(AuthorDto::into_domain).transpose()?,
        })
    }
}

impl TryFrom<UpdatePostDto> for UpdatePostRequest {
    type Error = AppError;

    fn try_from(dto: UpdatePostDto) -> Result<Self, Self::Error> {
        dto.validate()?;
        Ok(Self {
            title: dto.title,
            content: dto.content,
            author: dto.author.map(AuthorDto::into_domain).transpose()?,
        })
    }
}

fn parse_post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid post id: {raw}")))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    responses(
        (status = 200, description = "All posts", body = ListPostsResponseDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ListPostsResponseDto>)> {
    let posts = state.blog_service.list_posts().await?;

    Ok((
        StatusCode::OK,
        Json(ListPostsResponseDto {
            posts: posts.into_iter().map(PostDto::from).collect(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let id = parse_post_id(&id)?;
    let post = state.blog_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let req = CreatePostRequest::try_from(dto)?;

    let post = state.blog_service.create_post(req).await?;
    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

/// PUT with partial semantics: only the fields present in the body change.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 204, description = "Post updated"),
        (status = 400, description = "Validation error or malformed id"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(dto): ApiJson<UpdatePostDto>,
) -> AppResult<StatusCode> {
    let id = parse_post_id(&id)?;
    let req = UpdatePostRequest::try_from(dto)?;

    state.blog_service.update_post(id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = String, Path, description = "Post id (UUID)")
    ),
    responses(
        (status = 204, description = "Post deleted, or there was nothing to delete"),
        (status = 400, description = "Malformed id"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_post_id(&id)?;

    state.blog_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
