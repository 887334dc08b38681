pub mod cell_view;
pub mod notebook;
pub mod view;
