//! Bounded History Window
//!
//! Fixed-capacity FIFO over sensor readings. Lets the feature pipeline
//! reproduce trailing rolling statistics one cycle at a time, with the
//! oldest reading evicted once capacity is exceeded.

mod window;

pub use window::{HistoryWindow, DEFAULT_CAPACITY};
