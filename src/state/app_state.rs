// ============================================================================
// APP STATE - Estado global compartido por view models y vistas
// ============================================================================
// Rc<RefCell<_>> + lista de subscribers. Las vistas se suscriben y
// re-renderizan; los view models solo mutan y notifican.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::router::{Navigator, Route};
use crate::services::{ApiClient, SessionStore};
use crate::state::notice::{Notice, NoticeKind};

#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub api: ApiClient,
    pub navigator: Rc<dyn Navigator>,

    // UI State
    pub notice: Rc<RefCell<Option<Notice>>>,
    notice_seq: Rc<RefCell<u64>>,
    pub unread_count: Rc<RefCell<u64>>,

    // Reactivity
    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new(api: ApiClient, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            session: api.session().clone(),
            api,
            navigator,
            notice: Rc::new(RefCell::new(None)),
            notice_seq: Rc::new(RefCell::new(0)),
            unread_count: Rc::new(RefCell::new(0)),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Estado del navegador: localStorage + fetch + history
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use crate::config::CONFIG;
        use crate::router::BrowserNavigator;
        use crate::services::http_client::GlooTransport;
        use crate::services::HttpClient;

        let session = SessionStore::browser();
        let navigator: Rc<dyn Navigator> = Rc::new(BrowserNavigator);
        let http = HttpClient::new(
            CONFIG.backend_url(),
            Rc::new(GlooTransport),
            session,
            navigator.clone(),
        );
        Self::new(ApiClient::new(http), navigator)
    }

    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar cambios. Se clona la lista para que un callback pueda suscribir.
    pub fn notify_subscribers(&self) {
        let subscribers: Vec<Rc<dyn Fn()>> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback();
        }
    }

    pub fn navigate(&self, route: &Route) {
        log::info!("🧭 [APP] Navegando a {}", route.path());
        self.navigator.navigate(route);
    }

    // ========================================================================
    // Avisos
    // ========================================================================

    /// Muestra un aviso y devuelve su id (para descartarlo solo si sigue visible)
    pub fn show_notice(&self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let id = {
            let mut seq = self.notice_seq.borrow_mut();
            *seq += 1;
            *seq
        };
        let message = message.into();
        match kind {
            NoticeKind::Error => log::warn!("⚠️ [NOTICE] {}", message),
            _ => log::info!("💬 [NOTICE] {}", message),
        }
        *self.notice.borrow_mut() = Some(Notice { id, kind, message });
        self.notify_subscribers();
        id
    }

    pub fn show_success(&self, message: impl Into<String>) -> u64 {
        self.show_notice(NoticeKind::Success, message)
    }

    pub fn show_error(&self, message: impl Into<String>) -> u64 {
        self.show_notice(NoticeKind::Error, message)
    }

    pub fn current_notice(&self) -> Option<Notice> {
        self.notice.borrow().clone()
    }

    /// Quita el aviso `id` si no fue reemplazado por otro
    pub fn dismiss_notice(&self, id: u64) {
        let dismissed = {
            let mut notice = self.notice.borrow_mut();
            if notice.as_ref().map(|n| n.id) == Some(id) {
                *notice = None;
                true
            } else {
                false
            }
        };
        if dismissed {
            self.notify_subscribers();
        }
    }

    // ========================================================================
    // Badge de notificaciones
    // ========================================================================

    pub fn unread_count(&self) -> u64 {
        *self.unread_count.borrow()
    }

    pub fn set_unread_count(&self, count: u64) {
        *self.unread_count.borrow_mut() = count;
        self.notify_subscribers();
    }

    /// Refresca el contador de la barra de navegación. Un fallo no genera aviso.
    pub async fn refresh_unread_count(&self) {
        if !self.session.is_authenticated() {
            self.set_unread_count(0);
            return;
        }
        match self.api.notifications.unread_count().await {
            Ok(count) => self.set_unread_count(count),
            Err(e) => log::warn!("⚠️ [APP] No se pudo leer el contador de no leídas: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::services::HttpResponse;
    use crate::test_support::{api_with, signed_in_store, MockTransport, RecordingNavigator};
    use crate::utils::storage::MemoryStorage;

    fn state_with(transport: &MockTransport, session: SessionStore) -> AppState {
        let navigator: Rc<dyn Navigator> = Rc::new(RecordingNavigator::default());
        AppState::new(api_with(transport, session, navigator.clone()), navigator)
    }

    #[test]
    fn newer_notice_survives_old_dismissal() {
        let transport = MockTransport::always(HttpResponse::new(200, "{}"));
        let state = state_with(&transport, SessionStore::new(Rc::new(MemoryStorage::new())));

        let first = state.show_error("Failed to load issues");
        let second = state.show_success("Issue reported successfully!");
        state.dismiss_notice(first);
        assert_eq!(state.current_notice().map(|n| n.id), Some(second));

        state.dismiss_notice(second);
        assert!(state.current_notice().is_none());
    }

    #[test]
    fn subscribers_run_on_every_change() {
        let transport = MockTransport::always(HttpResponse::new(200, "{}"));
        let state = state_with(&transport, SessionStore::new(Rc::new(MemoryStorage::new())));
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        state.subscribe_to_changes(move || counter.set(counter.get() + 1));

        state.show_success("ok");
        state.set_unread_count(4);
        assert_eq!(calls.get(), 2);
    }

    #[tokio::test]
    async fn unread_badge_is_fetched_only_when_signed_in() {
        let transport = MockTransport::always(HttpResponse::new(200, r#"{"unread_count": 2}"#));
        let anonymous = state_with(&transport, SessionStore::new(Rc::new(MemoryStorage::new())));
        anonymous.refresh_unread_count().await;
        assert_eq!(transport.request_count(), 0);

        let (store, _) = signed_in_store();
        let signed_in = state_with(&transport, store);
        signed_in.refresh_unread_count().await;
        assert_eq!(signed_in.unread_count(), 2);
    }
}
