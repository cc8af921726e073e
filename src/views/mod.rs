pub mod app;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod home;
pub mod issue_detail;
pub mod issues;
pub mod layout;
pub mod map_widgets;
pub mod notifications;
pub mod report;

pub use app::{render_app, Page};
