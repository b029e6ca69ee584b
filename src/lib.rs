pub mod backend;
pub mod classifier;
pub mod config;
pub mod emotion;
pub mod huggingface;

pub use classifier::Classifier;
pub use emotion::{ClassificationResult, Emotion};
