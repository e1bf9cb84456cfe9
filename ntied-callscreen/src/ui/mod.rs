mod app;
mod simulation;
mod view;

pub use app::*;
pub use simulation::*;
pub use view::*;
