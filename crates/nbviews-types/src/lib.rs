pub mod domain;
pub mod error;
pub mod grid;
mod util;

pub use domain::*;
pub use error::{Error, Result};
pub use grid::*;
pub use util::*;
