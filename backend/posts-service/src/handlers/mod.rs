/// HTTP handlers for posts-service
///
/// - Posts: paginated listing, search, CRUD, likes and comments
/// - Users: sign-up and sign-in issuing bearer tokens
/// - Health: greeting and database round-trip check
pub mod health;
pub mod posts;
pub mod users;

use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

pub use health::{health_summary, index};
pub use posts::{
    comment_post, create_post, delete_post, get_post, get_posts, get_posts_by_search, like_post,
    update_post,
};
pub use users::{sign_in, sign_up};

/// Route table shared by the binary and the integration tests.
///
/// Expects `web::Data<PostService>`, `web::Data<UserService>` and
/// `web::Data<TokenKeys>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_summary))
        .service(
            web::scope("/posts")
                .wrap(JwtAuthMiddleware)
                .service(
                    web::resource("")
                        .route(web::get().to(get_posts))
                        .route(web::post().to(create_post)),
                )
                // before /{post_id} so "search" is not taken for an id
                .route("/search", web::get().to(get_posts_by_search))
                .service(
                    web::resource("/{post_id}")
                        .route(web::get().to(get_post))
                        .route(web::patch().to(update_post))
                        .route(web::delete().to(delete_post)),
                )
                .route("/{post_id}/likePost", web::patch().to(like_post))
                .route("/{post_id}/commentPost", web::post().to(comment_post)),
        )
        .service(
            web::scope("/user")
                .route("/signup", web::post().to(sign_up))
                .route("/signin", web::post().to(sign_in)),
        );
}
