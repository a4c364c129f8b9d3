pub mod app;
pub mod history;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
