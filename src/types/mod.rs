//! Value types for light state.

mod brightness;
mod power;

pub use brightness::Brightness;
pub use power::PowerMode;
