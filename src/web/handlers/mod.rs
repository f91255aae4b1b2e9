//! # Web Handlers
//!
//! One module per route group: the public news surface, comment
//! mutations, the private notes app, account management, and liveness.

pub mod accounts;
pub mod comments;
pub mod health;
pub mod news;
pub mod notes;
