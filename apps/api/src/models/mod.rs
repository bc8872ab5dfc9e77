// Request/response contracts shared by the HTTP handlers and the UI script.

pub mod evaluation;
pub mod job;
pub mod resume;
