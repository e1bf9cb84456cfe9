pub mod call;
pub mod presentation;
pub mod screen;

// Timing and geometry settings loaded from JSON
pub mod config;

// iced frontend, only built with the `ui` feature.
#[cfg(feature = "ui")]
pub mod ui;
