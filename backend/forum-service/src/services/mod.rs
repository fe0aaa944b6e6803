/// Business logic layer
///
/// Each operation validates input, checks ownership and issues one primary
/// repository call.
pub mod comments;
pub mod posts;

pub use comments::CommentService;
pub use posts::PostService;
