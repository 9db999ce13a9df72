//! Course outline model and the text-to-outline extraction chain.

pub mod extract;
pub mod model;
pub mod parser;

pub use extract::{Extraction, extract};
pub use model::{Curriculum, Lecture, Section};
