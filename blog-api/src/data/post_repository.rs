use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::{Author, Post};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Option<Author>,
}

/// Fields to overwrite on an existing post. `None` means "keep stored value".
#[derive(Debug, Clone, Default)]
pub(crate) struct PostPatch {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<Author>,
}

/// Persistence collaborator for posts.
///
/// Implementations assign `id` and `created` on insert and must never change
/// them afterwards.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    /// Returns `false` when no post with `id` exists.
    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<bool, DomainError>;
    /// Returns `false` when there was nothing to delete.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}

pub(crate) type DynPostRepository = Arc<dyn PostRepository>;

#[async_trait]
impl<R> PostRepository for Arc<R>
where
    R: PostRepository + ?Sized,
{
    async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
        (**self).insert(input).await
    }

    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        (**self).find_all().await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<bool, DomainError> {
        (**self).update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        (**self).delete_by_id(id).await
    }

    async fn count(&self) -> Result<i64, DomainError> {
        (**self).count().await
    }
}
