//! View state for every screen, independent of how it is drawn.

pub mod chat;
pub mod expand;
pub mod insights;
pub mod layout;
pub mod login;
pub mod message;
pub mod notification;
pub mod questions;
pub mod route;
pub mod selection;
pub mod theme;
pub mod upload;

pub use notification::{Notification, Notifications};
pub use route::Route;
pub use theme::{ThemeHandle, ThemePreference, ThemeReader};
