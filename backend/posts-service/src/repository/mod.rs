pub mod posts;
pub mod users;

pub use posts::{PgPostRepository, PostRepository};
pub use users::{PgUserRepository, UserRepository};
