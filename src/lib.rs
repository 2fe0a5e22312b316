//! Marquee - comment persistence for a movie-review service
//!
//! A thin layer over one MongoDB collection of user comments:
//!
//! - **CommentStore**: create/read/update/delete with ownership-scoped
//!   mutation (id + owner email must both match), inserts under relaxed
//!   w:1 acknowledgment
//! - **ActivityReporter**: top-20 commenter ranking computed by a
//!   group/sort/limit aggregation under majority read concern
//!
//! The web layer, auth, and the movie catalog live elsewhere; this crate
//! owns only the comment collection and its derived activity report.

pub mod comments;
pub mod config;
pub mod db;
pub mod types;

pub use comments::{ActivityReporter, CommentStore, Critic};
pub use config::Args;
pub use db::schemas::Comment;
pub use db::MongoClient;
pub use types::{MarqueeError, Result};
