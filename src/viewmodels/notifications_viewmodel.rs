// ============================================================================
// NOTIFICATIONS VIEWMODEL - Listado, marcar leídas, badge
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Notification, NotificationQuery};
use crate::router::{enforce_guard, Route};
use crate::state::{AppState, RequestTracker};

#[derive(Clone)]
pub struct NotificationsViewModel {
    state: AppState,
    tracker: RequestTracker,
    pub notifications: Rc<RefCell<Vec<Notification>>>,
    pub unread_only: Rc<RefCell<bool>>,
    pub loading: Rc<RefCell<bool>>,
}

impl NotificationsViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            tracker: RequestTracker::new(),
            notifications: Rc::new(RefCell::new(Vec::new())),
            unread_only: Rc::new(RefCell::new(false)),
            loading: Rc::new(RefCell::new(true)),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn unread_only(&self) -> bool {
        *self.unread_only.borrow()
    }

    pub async fn mount(&self) {
        if !enforce_guard(&Route::Notifications, &self.state.session, self.state.navigator.as_ref()) {
            return;
        }
        self.refresh().await;
    }

    pub fn unmount(&self) {
        self.tracker.cancel();
    }

    pub async fn refresh(&self) {
        let query = NotificationQuery {
            unread_only: self.unread_only().then_some(true),
            ..NotificationQuery::default()
        };
        *self.loading.borrow_mut() = true;
        self.state.notify_subscribers();

        let Some(result) = self.tracker.run(self.state.api.notifications.list(&query)).await else {
            return;
        };
        *self.loading.borrow_mut() = false;

        match result {
            Ok(items) => {
                *self.notifications.borrow_mut() = items;
                self.state.notify_subscribers();
            }
            Err(e) => {
                log::error!("❌ [NOTIFICATIONS] Error cargando: {}", e);
                self.state.show_error("Failed to load notifications");
            }
        }
    }

    pub async fn set_unread_only(&self, unread_only: bool) {
        *self.unread_only.borrow_mut() = unread_only;
        self.refresh().await;
    }

    /// Optimista: la marca local se aplica antes de la respuesta y se revierte si falla
    pub async fn mark_as_read(&self, id: i64) {
        if !self.set_read_flag(id, true) {
            return;
        }
        // Se restaura este valor exacto si falla (el decremento satura en 0)
        let badge_before = self.state.unread_count();
        self.decrement_badge(1);

        if let Err(e) = self.state.api.notifications.mark_as_read(id).await {
            log::warn!("⚠️ [NOTIFICATIONS] Revirtiendo marca de {}: {}", id, e);
            self.set_read_flag(id, false);
            self.state.set_unread_count(badge_before);
            self.state.show_error(e.user_message("Failed to mark notification as read"));
        }
    }

    pub async fn mark_all_as_read(&self) {
        match self.state.api.notifications.mark_all_as_read().await {
            Ok(()) => {
                for notification in self.notifications.borrow_mut().iter_mut() {
                    notification.is_read = true;
                }
                if self.unread_only() {
                    self.notifications.borrow_mut().clear();
                }
                self.state.set_unread_count(0);
                self.state.show_success("All notifications marked as read");
            }
            Err(e) => {
                self.state.show_error(e.user_message("Failed to mark notifications as read"));
            }
        }
    }

    /// `true` si el flag cambió
    fn set_read_flag(&self, id: i64, is_read: bool) -> bool {
        let changed = {
            let mut items = self.notifications.borrow_mut();
            match items.iter_mut().find(|n| n.id == id) {
                Some(n) if n.is_read != is_read => {
                    n.is_read = is_read;
                    true
                }
                _ => false,
            }
        };
        if changed {
            self.state.notify_subscribers();
        }
        changed
    }

    fn decrement_badge(&self, by: u64) {
        let count = self.state.unread_count().saturating_sub(by);
        self.state.set_unread_count(count);
    }
}
