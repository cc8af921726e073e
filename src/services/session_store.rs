// ============================================================================
// SESSION STORE - Token + perfil cacheado en localStorage
// ============================================================================
// Lectura/escritura síncrona, sin round-trip al servidor.
// Se crea una vez al arrancar la app y se inyecta donde haga falta.
// ============================================================================

use std::rc::Rc;
use crate::models::{Session, User};
use crate::utils::constants::{TOKEN_KEY, USER_KEY};
use crate::utils::storage::StorageBackend;

#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store respaldado por `window.localStorage`
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(Rc::new(crate::utils::storage::BrowserStorage))
    }

    /// `false` mientras el medio no esté listo: las escrituras se pierden
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Sesión actual. Un `user` corrupto cuenta como ausente; sin token
    /// tampoco se devuelve el perfil.
    pub fn get(&self) -> Session {
        let token = self.token();
        let user = if token.is_some() { self.user() } else { None };
        Session { token, user }
    }

    pub fn token(&self) -> Option<String> {
        self.backend
            .get_item(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn user(&self) -> Option<User> {
        let raw = self.backend.get_item(USER_KEY)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("⚠️ [SESSION] Perfil guardado ilegible, se ignora: {}", e);
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) {
        self.backend.set_item(TOKEN_KEY, token);
    }

    pub fn set_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.backend.set_item(USER_KEY, &json),
            Err(e) => log::error!("❌ [SESSION] Error serializando perfil: {}", e),
        }
    }

    /// Escribe token y perfil juntos (login)
    pub fn establish(&self, token: &str, user: &User) {
        self.set_token(token);
        self.set_user(user);
        log::info!("🔐 [SESSION] Sesión iniciada para {}", user.email);
    }

    /// Borra token y perfil juntos (logout / 401)
    pub fn clear(&self) {
        self.backend.remove_item(TOKEN_KEY);
        self.backend.remove_item(USER_KEY);
        log::info!("🗑️ [SESSION] Sesión local limpiada");
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.get().is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::test_support::sample_user;
    use crate::utils::storage::MemoryStorage;

    fn store() -> (SessionStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (SessionStore::new(Rc::new(storage.clone())), storage)
    }

    #[test]
    fn establish_then_get_returns_both() {
        let (store, storage) = store();
        let user = sample_user(UserRole::User);
        store.establish("tok-1", &user);

        let session = store.get();
        assert_eq!(session.token.as_deref(), Some("tok-1"));
        assert_eq!(session.user, Some(user));
        assert_eq!(storage.get_item(TOKEN_KEY).as_deref(), Some("tok-1"));
    }

    #[test]
    fn corrupted_user_is_treated_as_absent() {
        let (store, storage) = store();
        storage.set_item(TOKEN_KEY, "tok-1");
        storage.set_item(USER_KEY, "{not json");

        let session = store.get();
        assert_eq!(session.token.as_deref(), Some("tok-1"));
        assert!(session.user.is_none());
        assert!(!store.is_admin());
    }

    #[test]
    fn user_without_token_is_not_returned() {
        let (store, _) = store();
        store.set_user(&sample_user(UserRole::Admin));
        assert_eq!(store.get(), Session::default());
    }

    #[test]
    fn clear_removes_both_entries() {
        let (store, storage) = store();
        store.establish("tok-1", &sample_user(UserRole::Admin));
        assert!(store.is_admin());

        store.clear();
        assert!(storage.is_empty());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn unavailable_medium_reads_absent_and_ignores_writes() {
        let store = SessionStore::new(Rc::new(MemoryStorage::unavailable()));
        store.establish("tok-1", &sample_user(UserRole::User));
        assert!(!store.is_available());
        assert_eq!(store.get(), Session::default());
    }
}
