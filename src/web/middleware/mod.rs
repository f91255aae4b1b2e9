//! # Web Middleware
//!
//! Request-scoped plumbing applied to the whole router.

pub mod session;
