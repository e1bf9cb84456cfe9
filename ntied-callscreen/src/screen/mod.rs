mod controller;
mod effects;
mod event;
mod host;
mod timers;

pub use controller::*;
pub use effects::*;
pub use event::*;
pub use host::*;
pub use timers::*;
