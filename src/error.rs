// ============================================================================
// ERRORS - Taxonomía de fallos de red / backend / validación local
// ============================================================================

use thiserror::Error;

/// Fallo de una llamada al backend.
///
/// Ninguna capa reintenta: el error llega tal cual al view model, que
/// decide qué aviso mostrar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// La petición no llegó a tener respuesta (DNS, CORS, offline...)
    #[error("network error: {0}")]
    Network(String),

    /// 401: el SessionStore ya fue limpiado y se navegó a login
    #[error("unauthorized{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Unauthorized { detail: Option<String> },

    /// Cualquier otro status no-2xx
    #[error("HTTP {status}{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Backend { status: u16, detail: Option<String> },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Construye el error a partir de un status no-2xx y su cuerpo
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        if status == 401 {
            ApiError::Unauthorized { detail }
        } else {
            ApiError::Backend { status, detail }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Mensaje para el aviso: el `detail` del backend si existe, si no `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend { detail: Some(detail), .. }
            | ApiError::Unauthorized { detail: Some(detail) } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Extrae `detail` de un cuerpo de error FastAPI.
///
/// `{"detail": "msg"}` o `{"detail": [{"msg": "..."}, ...]}` (errores 422).
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
