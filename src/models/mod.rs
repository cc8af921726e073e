pub mod user;
pub mod issue;
pub mod notification;
pub mod session;
pub mod stats;

pub use user::{User, UserRole, LoginRequest, RegisterRequest, TokenResponse, LoginOutcome};
pub use issue::{
    Issue, IssueCategory, IssueStatus, IssueFilters, IssueQuery, IssueUpdate, NewIssue,
    ImageUpload, Coordinates,
};
pub use notification::{Notification, NotificationQuery, UnreadCount};
pub use session::Session;
pub use stats::DashboardStats;
