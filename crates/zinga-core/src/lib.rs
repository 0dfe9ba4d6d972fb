//! Zinga Linga Core: domain models, repository traits, and error
//! types shared by every crate in the workspace.

pub mod api;
pub mod error;
pub mod models;
pub mod repository;
