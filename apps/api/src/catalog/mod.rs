// Read-only role and course catalog.

pub mod handlers;
pub mod queries;
