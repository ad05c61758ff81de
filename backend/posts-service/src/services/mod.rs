/// Business logic layer
///
/// Services own a repository handle and are shared with handlers through
/// `web::Data`.
pub mod posts;
pub mod users;

pub use posts::{LikeOutcome, PostPage, PostService, MAX_WRITE_ATTEMPTS};
pub use users::{AuthResponse, SignInRequest, SignUpRequest, UserService};
