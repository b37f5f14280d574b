pub mod error;
pub mod tolerance;

pub use error::{KerfError, Result};
pub use tolerance::Tolerance;
