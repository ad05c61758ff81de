pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenKeys};
pub use password::{hash_password, verify_password};
