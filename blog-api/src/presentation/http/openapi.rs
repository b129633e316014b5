use utoipa::OpenApi;

use crate::presentation::http::handlers::posts::{
    AuthorDto, CreatePostDto, ListPostsResponseDto, PostDto, UpdatePostDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            AuthorDto,
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            ListPostsResponseDto
        )
    ),
    tags(
        (name = "posts", description = "Blog post endpoints")
    )
)]
pub(crate) struct ApiDoc;
