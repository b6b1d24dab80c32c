//! lessonquiz-core: Quiz sessions, scoring, and module selection.
//!
//! This crate defines the data model, the per-quiz state machine, and the
//! collaborator traits that the rest of lessonquiz builds on.

pub mod chat;
pub mod controller;
pub mod error;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod session;
pub mod traits;
