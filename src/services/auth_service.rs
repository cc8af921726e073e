use crate::error::ApiError;
use crate::models::{LoginOutcome, LoginRequest, RegisterRequest, TokenResponse, User};
use crate::services::http_client::{HttpClient, HttpRequest};

/// Endpoints `/api/auth/*`
#[derive(Clone)]
pub struct AuthService {
    http: HttpClient,
}

impl AuthService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Crear cuenta
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("📝 [AUTH] Registrando usuario: {}", email);
        self.http
            .send_json(HttpRequest::post("/api/auth/register").with_json(&body)?)
            .await
    }

    /// Login JSON: pide el token y luego el perfil con ese token.
    ///
    /// No toca el SessionStore; el view model escribe token y perfil juntos.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        log::info!("🔐 [AUTH] Login para: {}", email);
        let token: TokenResponse = self
            .http
            .send_json(HttpRequest::post("/api/auth/login/json").with_json(&body)?)
            .await?;

        let mut me = HttpRequest::get("/api/auth/me");
        me.set_header("Authorization", format!("Bearer {}", token.access_token));
        let user: User = self.http.send_json(me).await?;

        Ok(LoginOutcome {
            token: token.access_token,
            user,
        })
    }

    /// Perfil del usuario del token actual
    pub async fn fetch_current_user(&self) -> Result<User, ApiError> {
        self.http.get_json("/api/auth/me", Vec::new()).await
    }
}
