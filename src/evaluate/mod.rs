pub mod completeness;
pub mod description;
pub mod display;
