//! The course generation pipeline: design, lectures, slides, report.

pub mod batch;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod outcome;
pub mod stages;
pub mod types;

pub use batch::regenerate_slides;
pub use context::CourseInputs;
pub use orchestrator::{CourseCrews, CoursePipeline};
pub use outcome::{CourseOutcome, CourseReport};

#[cfg(test)]
mod tests;
