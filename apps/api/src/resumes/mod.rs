// Resume ingestion: blob storage, skill extraction, resume records.

pub mod handlers;
pub mod parser_client;
pub mod queries;
pub mod service;
