/// Pure domain logic for posts-service
///
/// - `document_id`: identifier generation and format validation
/// - `pagination`: page -> (skip, limit) and page counts
/// - `search`: title/tag search predicate
/// - `engagement`: like toggling and comment appending
/// - `models`: stored entities
pub mod document_id;
pub mod engagement;
pub mod models;
pub mod pagination;
pub mod search;

pub use document_id::DocumentId;
pub use engagement::{append_comment, toggle_like};
pub use models::{NewPost, NewUser, Post, PostPatch, User, WriteOutcome};
pub use pagination::{number_of_pages, PageWindow, PAGE_SIZE};
pub use search::SearchPredicate;
