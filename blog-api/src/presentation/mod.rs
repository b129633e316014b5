use std::sync::Arc;

use crate::application::blog_service::BlogService;
use crate::data::post_repository::DynPostRepository;

pub(crate) mod http;

pub(crate) type PostService = BlogService<DynPostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) blog_service: Arc<PostService>,
}

impl AppState {
    pub(crate) fn new(blog_service: Arc<PostService>) -> Self {
        Self { blog_service }
    }
}
