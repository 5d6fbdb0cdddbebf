//! Input processing module
//! Handles format detection, text extraction, and file input management

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use file_detector::DocumentFormat;
pub use manager::InputManager;
pub use text_extractor::extract;
