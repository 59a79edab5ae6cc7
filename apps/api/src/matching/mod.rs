// Skill-match scoring engine.
// Pure functions only: no I/O, no clocks, no shared state. Handlers fetch
// resumes, roles and courses and pass them in.

pub mod courses;
pub mod feedback;
pub mod matcher;
pub mod skill;
