// Terminal front end: event loop, pages and rendering
mod app;
mod page;
mod tasks;
mod ui;
mod views;

pub use app::run;
