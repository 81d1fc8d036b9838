//! Request extractors and small helpers shared by the handlers.

pub mod password;
mod path;
mod validate;

pub use path::UserId;
pub use validate::ValidatedJson;
