//! Controller/expansion sizing engine, license resolver, report generator, and export sinks.

pub mod catalog;
pub mod controller;
pub mod expansion;
pub mod fleet;
pub mod license;
pub mod lines;
pub mod reporter;
pub mod sink;

pub use catalog::Catalog;
pub use controller::select_controllers;
pub use expansion::select_expansion;
pub use fleet::{calculate, calculate_line};
pub use lines::LineBook;
pub use reporter::Report;
