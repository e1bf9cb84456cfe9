mod handle;
mod listener;
mod service;
mod types;

pub use handle::*;
pub use listener::*;
pub use service::*;
pub use types::*;
