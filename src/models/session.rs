use crate::models::User;

/// Sesión local: token + perfil cacheado
///
/// `user` solo tiene sentido si hay `token`; ambos se escriben y se
/// borran juntos (ver `SessionStore`).
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().map(|u| u.is_admin()).unwrap_or(false)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}
