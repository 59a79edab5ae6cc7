// Persisted skill-match analyses: resume × role → match, feedback, courses.

pub mod handlers;
pub mod queries;
pub mod service;
