//! Comment persistence and activity reporting
//!
//! Two components over the one `comments` collection:
//!
//! - **CommentStore**: per-request CRUD with ownership-scoped mutation
//! - **ActivityReporter**: top-20 commenter ranking under majority reads

pub mod report;
pub mod store;

pub use report::{ActivityReporter, Critic, REPORT_LIMIT};
pub use store::CommentStore;
