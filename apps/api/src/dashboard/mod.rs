// Dashboard: cached per-user stats and ad-hoc skill-gap views.

pub mod cache;
pub mod handlers;
pub mod service;
pub mod stats;
