pub mod cli;
pub mod clipboard;
pub mod io;
pub mod model;
pub mod ops;
pub mod tui;
