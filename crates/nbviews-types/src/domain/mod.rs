pub mod ids;
pub mod notebook;
pub mod view;

pub use ids::*;
pub use notebook::*;
pub use view::*;
