pub mod analysis;
pub mod course;
pub mod resume;
pub mod role;
