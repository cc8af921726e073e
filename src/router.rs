// ============================================================================
// ROUTER - Rutas tipadas + guard + navegación
// ============================================================================

use crate::services::SessionStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Issues,
    IssueMap,
    ReportIssue,
    IssueDetail(i64),
    Notifications,
    NotFound,
}

impl Route {
    /// Parsear un pathname (`/issues/12`, `/auth/login`...)
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["auth", "login"] => Route::Login,
            ["auth", "register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["issues"] => Route::Issues,
            ["issues", "map"] => Route::IssueMap,
            ["issues", "report"] => Route::ReportIssue,
            ["issues", id] => id.parse().map(Route::IssueDetail).unwrap_or(Route::NotFound),
            ["notifications"] => Route::Notifications,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::Register => "/auth/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Issues => "/issues".to_string(),
            Route::IssueMap => "/issues/map".to_string(),
            Route::ReportIssue => "/issues/report".to_string(),
            Route::IssueDetail(id) => format!("/issues/{}", id),
            Route::Notifications => "/notifications".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Páginas que exigen token local
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard | Route::ReportIssue | Route::Notifications)
    }
}

/// Resultado del guard de ruta
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(Route),
}

/// Guard de cliente: solo orientativo, el backend decide el acceso real
pub fn guard(route: &Route, session: &SessionStore) -> GuardOutcome {
    if route.requires_auth() && !session.is_authenticated() {
        GuardOutcome::Redirect(Route::Login)
    } else {
        GuardOutcome::Allow
    }
}

/// Navegación del entorno interactivo
pub trait Navigator {
    fn navigate(&self, route: &Route);
}

/// Aplica el guard y redirige si hace falta. Devuelve `true` si se puede seguir.
pub fn enforce_guard(route: &Route, session: &SessionStore, navigator: &dyn Navigator) -> bool {
    match guard(route, session) {
        GuardOutcome::Allow => true,
        GuardOutcome::Redirect(target) => {
            log::info!("🔒 [ROUTER] {} requiere sesión, redirigiendo a {}", route.path(), target.path());
            navigator.navigate(&target);
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{current_path, BrowserNavigator};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{Navigator, Route};
    use crate::utils::constants::ROUTE_CHANGE_EVENT;
    use wasm_bindgen::JsValue;

    pub fn current_path() -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }

    /// pushState + evento `routechange` (lib.rs re-renderiza al recibirlo)
    #[derive(Clone, Copy, Default)]
    pub struct BrowserNavigator;

    impl Navigator for BrowserNavigator {
        fn navigate(&self, route: &Route) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let path = route.path();
            if current_path() != path {
                if let Ok(history) = window.history() {
                    if history.push_state_with_url(&JsValue::NULL, "", Some(&path)).is_err() {
                        // Sin History API: navegación completa
                        let _ = window.location().set_href(&path);
                        return;
                    }
                }
            }
            match web_sys::Event::new(ROUTE_CHANGE_EVENT) {
                Ok(event) => {
                    let _ = window.dispatch_event(&event);
                }
                Err(e) => log::error!("❌ [ROUTER] No se pudo crear evento de ruta: {:?}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_in_store, RecordingNavigator};
    use crate::services::SessionStore;
    use crate::utils::storage::MemoryStorage;
    use std::rc::Rc;

    #[test]
    fn parses_and_prints_every_route() {
        let routes = [
            Route::Home,
            Route::Login,
            Route::Register,
            Route::Dashboard,
            Route::Issues,
            Route::IssueMap,
            Route::ReportIssue,
            Route::IssueDetail(42),
            Route::Notifications,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/issues/abc"), Route::NotFound);
        assert_eq!(Route::parse("/admin"), Route::NotFound);
        assert_eq!(Route::parse("/issues/?category=health"), Route::Issues);
        assert_eq!(Route::parse("/issues/3#map"), Route::IssueDetail(3));
    }

    #[test]
    fn protected_route_without_token_redirects_to_login() {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let navigator = RecordingNavigator::default();

        assert!(!enforce_guard(&Route::Dashboard, &store, &navigator));
        assert_eq!(navigator.visited(), vec![Route::Login]);
    }

    #[test]
    fn public_and_signed_in_routes_pass() {
        let anonymous = SessionStore::new(Rc::new(MemoryStorage::new()));
        assert_eq!(guard(&Route::Issues, &anonymous), GuardOutcome::Allow);
        assert_eq!(guard(&Route::IssueDetail(1), &anonymous), GuardOutcome::Allow);

        let (store, _) = signed_in_store();
        assert_eq!(guard(&Route::ReportIssue, &store), GuardOutcome::Allow);
    }
}
