use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post};

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    author_first_name: Option<String>,
    author_last_name: Option<String>,
    created: DateTime<Utc>,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
        let (first_name, last_name) = split_author(input.author);

        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, author_first_name, author_last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author_first_name, author_last_name, created
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                content,
                author_first_name,
                author_last_name,
                created
            FROM posts
            ORDER BY created ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                id,
                title,
                content,
                author_first_name,
                author_last_name,
                created
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<bool, DomainError> {
        let (first_name, last_name) = split_author(patch.author);

        // id and created are never part of the SET list.
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                author_first_name = COALESCE($4, author_first_name),
                author_last_name = COALESCE($5, author_last_name)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(first_name)
        .bind(last_name)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM posts
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(count)
    }
}

fn split_author(author: Option<Author>) -> (Option<String>, Option<String>) {
    match author {
        Some(author) => (Some(author.first_name), Some(author.last_name)),
        None => (None, None),
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    let author = match (row.author_first_name, row.author_last_name) {
        (Some(first_name), Some(last_name)) => Some(Author::new(first_name, last_name)),
        (None, None) => None,
        _ => {
            return Err(DomainError::Unexpected(format!(
                "post {} has a partial author",
                row.id
            )));
        }
    }
    .transpose()
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Post::new(row.id, row.title, row.content, author, row.created)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
