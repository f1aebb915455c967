mod builder;
mod engine;

pub use builder::{ANALYSIS_INSTRUCTION, CLASSIFICATION_INSTRUCTION, build_styling_instruction};
pub use engine::TeraEngine;
