mod floating;
mod geometry;
mod state;
mod status;

pub use floating::*;
pub use geometry::*;
pub use state::*;
pub use status::*;
