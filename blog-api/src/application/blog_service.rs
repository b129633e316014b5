use tracing::{debug, info};
use uuid::Uuid;

use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, Post, UpdatePostRequest};

pub(crate) struct BlogService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self.repo.find_all().await?;
        debug!(count = posts.len(), "posts listed");
        Ok(posts)
    }

    pub(crate) async fn get_post(&self, id: Uuid) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            title: req.title,
            content: req.content,
            author: req.author,
        };
        let post = self.repo.insert(new_post).await?;
        info!(post_id = %post.id, "post created");
        Ok(post)
    }

    /// Applies only the supplied fields. The verb on the wire is PUT, but
    /// omitted fields keep their stored values.
    pub(crate) async fn update_post(
        &self,
        post_id: Uuid,
        req: UpdatePostRequest,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        if req.is_empty() {
            self.get_post(post_id).await?;
            debug!(post_id = %post_id, "update without fields, nothing written");
            return Ok(());
        }
        let patch = PostPatch {
            title: req.title,
            content: req.content,
            author: req.author,
        };

        let matched = self.repo.update_by_id(post_id, patch).await?;
        if !matched {
            return Err(DomainError::NotFound(format!("post id: {post_id}")));
        }
        info!(post_id = %post_id, "post updated");
        Ok(())
    }

    /// Deleting an unknown id succeeds; only persistence faults are errors.
    pub(crate) async fn delete_post(&self, post_id: Uuid) -> Result<(), DomainError> {
        let deleted = self.repo.delete_by_id(post_id).await?;
        if deleted {
            info!(post_id = %post_id, "post deleted");
        } else {
            debug!(post_id = %post_id, "delete of absent post ignored");
        }
        Ok(())
    }

    pub(crate) async fn count_posts(&self) -> Result<i64, DomainError> {
        self.repo.count().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use super::BlogService;
    use crate::data::post_repository::{NewPost, PostPatch, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{Author, CreatePostRequest, Post, UpdatePostRequest};

    #[derive(Clone)]
    struct FakePostRepo {
        created_input: Arc<Mutex<Option<NewPost>>>,
        post_for_get: Arc<Mutex<Option<Post>>>,
        update_result: Arc<Mutex<bool>>,
        update_call: Arc<Mutex<Option<(Uuid, PostPatch)>>>,
        delete_result: Arc<Mutex<Result<bool, String>>>,
        list_result: Arc<Mutex<Result<Vec<Post>, String>>>,
    }

    impl FakePostRepo {
        fn new() -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                post_for_get: Arc::new(Mutex::new(None)),
                update_result: Arc::new(Mutex::new(true)),
                update_call: Arc::new(Mutex::new(None)),
                delete_result: Arc::new(Mutex::new(Ok(true))),
                list_result: Arc::new(Mutex::new(Ok(Vec::new()))),
            }
        }
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn insert(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(sample_post(&input.title, &input.content, input.author))
        }

        async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
            self.list_result
                .lock()
                .expect("list_result mutex poisoned")
                .clone()
                .map_err(DomainError::Unexpected)
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, DomainError> {
            Ok(self
                .post_for_get
                .lock()
                .expect("post_for_get mutex poisoned")
                .clone())
        }

        async fn update_by_id(&self, id: Uuid, patch: PostPatch) -> Result<bool, DomainError> {
            *self
                .update_call
                .lock()
                .expect("update_call mutex poisoned") = Some((id, patch));
            Ok(*self
                .update_result
                .lock()
                .expect("update_result mutex poisoned"))
        }

        async fn delete_by_id(&self, _id: Uuid) -> Result<bool, DomainError> {
            self.delete_result
                .lock()
                .expect("delete_result mutex poisoned")
                .clone()
                .map_err(DomainError::Unexpected)
        }

        async fn count(&self) -> Result<i64, DomainError> {
            Ok(0)
        }
    }

    #[tokio::test]
    async fn create_post_passes_fields_to_repo_as_supplied() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo.clone());

        let req = CreatePostRequest {
            title: "  title  ".to_string(),
            content: "content".to_string(),
            author: Some(Author {
                first_name: " Ada".to_string(),
                last_name: "Lovelace ".to_string(),
            }),
        };

        let created = service
            .create_post(req)
            .await
            .expect("create_post must succeed");
        assert_eq!(created.title, "  title  ");
        assert_eq!(created.author_name(), " Ada Lovelace ");

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.title, "  title  ");
        assert_eq!(input.content, "content");
        let author = input.author.expect("author must be passed through");
        assert_eq!(author.first_name, " Ada");
        assert_eq!(author.last_name, "Lovelace ");
    }

    #[tokio::test]
    async fn create_post_with_blank_title_never_reaches_repo() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo.clone());

        let req = CreatePostRequest {
            title: " ".to_string(),
            content: "x".to_string(),
            author: None,
        };

        let err = service
            .create_post(req)
            .await
            .expect_err("blank title must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
        assert!(
            repo.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn get_post_returns_not_found_when_missing() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo);

        let err = service
            .get_post(Uuid::new_v4())
            .await
            .expect_err("post must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_passes_path_id_and_partial_patch() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo.clone());
        let id = Uuid::new_v4();

        let req = UpdatePostRequest {
            title: Some("  t2  ".to_string()),
            ..UpdatePostRequest::default()
        };
        service
            .update_post(id, req)
            .await
            .expect("update must succeed");

        let (called_id, patch) = repo
            .update_call
            .lock()
            .expect("update_call mutex poisoned")
            .clone()
            .expect("update call must be captured");
        assert_eq!(called_id, id);
        assert_eq!(patch.title.as_deref(), Some("  t2  "));
        assert!(patch.content.is_none());
        assert!(patch.author.is_none());
    }

    #[tokio::test]
    async fn update_post_returns_not_found_when_nothing_matched() {
        let repo = FakePostRepo::new();
        *repo
            .update_result
            .lock()
            .expect("update_result mutex poisoned") = false;

        let service = BlogService::new(repo);
        let req = UpdatePostRequest {
            content: Some("body".to_string()),
            ..UpdatePostRequest::default()
        };
        let err = service
            .update_post(Uuid::new_v4(), req)
            .await
            .expect_err("must be not found");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn empty_update_checks_existence_without_writing() {
        let repo = FakePostRepo::new();
        *repo
            .post_for_get
            .lock()
            .expect("post_for_get mutex poisoned") = Some(sample_post("title", "body", None));

        let service = BlogService::new(repo.clone());
        service
            .update_post(Uuid::new_v4(), UpdatePostRequest::default())
            .await
            .expect("empty update of an existing post must succeed");
        assert!(
            repo.update_call
                .lock()
                .expect("update_call mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn empty_update_of_missing_post_is_not_found() {
        let repo = FakePostRepo::new();
        let service = BlogService::new(repo.clone());

        let err = service
            .update_post(Uuid::new_v4(), UpdatePostRequest::default())
            .await
            .expect_err("must be not found");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(
            repo.update_call
                .lock()
                .expect("update_call mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_post_is_idempotent_for_absent_posts() {
        let repo = FakePostRepo::new();
        *repo
            .delete_result
            .lock()
            .expect("delete_result mutex poisoned") = Ok(false);

        let service = BlogService::new(repo);
        service
            .delete_post(Uuid::new_v4())
            .await
            .expect("deleting an absent post must succeed");
    }

    #[tokio::test]
    async fn delete_post_surfaces_persistence_faults() {
        let repo = FakePostRepo::new();
        *repo
            .delete_result
            .lock()
            .expect("delete_result mutex poisoned") = Err("connection reset".to_string());

        let service = BlogService::new(repo);
        let err = service
            .delete_post(Uuid::new_v4())
            .await
            .expect_err("fault must surface");
        assert!(matches!(err, DomainError::Unexpected(_)));
    }

    #[tokio::test]
    async fn list_posts_fails_as_a_whole_on_persistence_fault() {
        let repo = FakePostRepo::new();
        *repo.list_result.lock().expect("list_result mutex poisoned") =
            Err("store unavailable".to_string());

        let service = BlogService::new(repo);
        let err = service.list_posts().await.expect_err("list must fail");
        assert!(matches!(err, DomainError::Unexpected(_)));
    }

    fn sample_post(title: &str, content: &str, author: Option<Author>) -> Post {
        Post::new(Uuid::new_v4(), title, content, author, Utc::now())
            .expect("sample post must be valid")
    }
}
