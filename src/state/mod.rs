// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod notice;
pub mod request_tracker;
pub mod app_state;

pub use notice::{Notice, NoticeKind};
pub use request_tracker::RequestTracker;
pub use app_state::AppState;
