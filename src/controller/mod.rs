pub mod controller;
pub mod error;
pub mod page;
pub mod toast;
