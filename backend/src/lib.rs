//! Lesson Lab Backend
//!
//! HTTP service for the classroom lab:
//! - Lesson catalogue and per-lesson exercises
//! - Student submissions (in memory, process lifetime)
//! - Instructor export of the capstone career plan, with rubric grading

pub mod api;
pub mod config;

pub use api::*;
pub use config::ServerConfig;
