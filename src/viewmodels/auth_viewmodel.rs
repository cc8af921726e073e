// ============================================================================
// AUTH VIEWMODEL - Login / registro / logout
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use crate::error::ApiError;
use crate::models::User;
use crate::router::Route;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Your browser storage is unavailable, the session could not be saved")]
    StorageUnavailable,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Clone)]
pub struct AuthViewModel {
    state: AppState,
    pub submitting: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl AuthViewModel {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            submitting: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Login: token + perfil se guardan juntos y se va al dashboard
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(self.fail(AuthError::MissingFields, "Login failed"));
        }

        // Un token viejo no debe viajar en la petición a /me
        self.state.session.clear();
        self.set_submitting(true);
        let result = self.state.api.auth.login(email.trim(), password).await;
        self.set_submitting(false);

        match result {
            Ok(outcome) => {
                self.state.session.establish(&outcome.token, &outcome.user);
                // Sin medio de almacenamiento la escritura se pierde: el guard nos devolvería a login
                if !self.state.session.is_available() || !self.state.session.is_authenticated() {
                    log::error!("❌ [AUTH] Sesión no persistida para {}", outcome.user.email);
                    return Err(self.fail(AuthError::StorageUnavailable, "Login failed"));
                }
                *self.error.borrow_mut() = None;
                self.state.show_success(format!("Welcome back, {}!", outcome.user.name));
                self.state.refresh_unread_count().await;
                self.state.navigate(&Route::Dashboard);
                Ok(outcome.user)
            }
            Err(e) => Err(self.fail(AuthError::Api(e), "Login failed")),
        }
    }

    /// Registro y login inmediato con las mismas credenciales
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(self.fail(AuthError::MissingFields, "Registration failed"));
        }

        self.set_submitting(true);
        let result = self.state.api.auth.register(name.trim(), email.trim(), password).await;
        self.set_submitting(false);

        match result {
            Ok(user) => {
                log::info!("✅ [AUTH] Usuario {} registrado", user.id);
                self.login(email, password).await
            }
            Err(e) => Err(self.fail(AuthError::Api(e), "Registration failed")),
        }
    }

    /// Logout: borra token y perfil, vuelve a la portada
    pub fn logout(&self) {
        self.state.session.clear();
        self.state.set_unread_count(0);
        self.state.show_success("You have been logged out");
        self.state.navigate(&Route::Home);
    }

    fn set_submitting(&self, value: bool) {
        *self.submitting.borrow_mut() = value;
        self.state.notify_subscribers();
    }

    fn fail(&self, error: AuthError, fallback: &str) -> AuthError {
        let message = match &error {
            AuthError::Api(api) => api.user_message(fallback),
            other => other.to_string(),
        };
        *self.error.borrow_mut() = Some(message.clone());
        self.state.show_error(message);
        error
    }
}
