//! Token signing, password hashing and the validating JSON extractor.

pub mod jwt;
pub mod password;
pub mod validate;

pub use jwt::{Claims, sign_token, verify_token};
pub use password::{hash_password, verify_password};
pub use validate::ValidatedJson;
