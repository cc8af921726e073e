// ============================================================================
// HTTP CLIENT - Pipeline único de peticiones (interceptores de auth)
// ============================================================================
// - Salida: si hay token en el SessionStore, `Authorization: Bearer <token>`
// - Entrada: 401 => limpiar sesión + navegar a login + propagar el error
// - Resto de errores: pasan sin tocar
// ============================================================================

use std::rc::Rc;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use crate::error::ApiError;
use crate::router::{Navigator, Route};
use crate::services::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Parte de un formulario multipart
#[derive(Clone, Debug, PartialEq)]
pub enum FormPart {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<(String, FormPart)>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn with_multipart(mut self, parts: Vec<(String, FormPart)>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Reemplaza (no duplica) una cabecera, sin distinguir mayúsculas
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Envío real de la petición (gloo-net en el navegador)
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, base_url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Cliente HTTP con interceptores de entrada/salida
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
}

impl HttpClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        session: SessionStore,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Punto de entrada único: toda petición pasa por aquí
    pub async fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = self.session.token() {
            request.set_header("Authorization", format!("Bearer {}", token));
        }

        log::debug!("🌐 [HTTP] {} {}", request.method.as_str(), request.path);

        let response = match self.transport.send(&self.base_url, &request).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ [HTTP] {} {} falló: {}", request.method.as_str(), request.path, e);
                return Err(e);
            }
        };

        if response.is_success() {
            return Ok(response);
        }

        let error = ApiError::from_status(response.status, &response.body);
        if error.is_unauthorized() {
            log::warn!("🔒 [HTTP] 401 en {}: sesión expirada o inválida", request.path);
            self.session.clear();
            self.navigator.navigate(&Route::Login);
        } else {
            log::warn!("⚠️ [HTTP] {} {} -> {}", request.method.as_str(), request.path, error);
        }
        Err(error)
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        self.send(request).await?.json()
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, ApiError> {
        self.send_json(HttpRequest::get(path).with_query(query)).await
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::GlooTransport;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{FormPart, HttpRequest, HttpResponse, Method, RequestBody, Transport};
    use crate::error::ApiError;
    use async_trait::async_trait;
    use gloo_net::http::{Method as GlooMethod, RequestBuilder};
    use wasm_bindgen::JsValue;
    use web_sys::{Blob, BlobPropertyBag, FormData};

    /// Transporte fetch() vía gloo-net
    #[derive(Clone, Copy, Default)]
    pub struct GlooTransport;

    fn gloo_method(method: Method) -> GlooMethod {
        match method {
            Method::Get => GlooMethod::GET,
            Method::Post => GlooMethod::POST,
            Method::Put => GlooMethod::PUT,
            Method::Patch => GlooMethod::PATCH,
            Method::Delete => GlooMethod::DELETE,
        }
    }

    fn js_error(e: JsValue) -> ApiError {
        ApiError::Encode(format!("{:?}", e))
    }

    /// El navegador pone el boundary del multipart: no fijar Content-Type
    fn build_form_data(parts: &[(String, FormPart)]) -> Result<FormData, ApiError> {
        let form = FormData::new().map_err(js_error)?;
        for (name, part) in parts {
            match part {
                FormPart::Text(value) => form.append_with_str(name, value).map_err(js_error)?,
                FormPart::File { file_name, content_type, bytes } => {
                    let array = js_sys::Uint8Array::from(bytes.as_slice());
                    let blob_parts = js_sys::Array::of1(&array);
                    let options = BlobPropertyBag::new();
                    options.set_type(content_type);
                    let blob = Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
                        .map_err(js_error)?;
                    form.append_with_blob_and_filename(name, &blob, file_name)
                        .map_err(js_error)?;
                }
            }
        }
        Ok(form)
    }

    #[async_trait(?Send)]
    impl Transport for GlooTransport {
        async fn send(&self, base_url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            let url = format!("{}{}", base_url, request.path);
            let mut builder = RequestBuilder::new(&url)
                .method(gloo_method(request.method))
                .query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            let built = match &request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.json(value),
                RequestBody::Multipart(parts) => builder.body(build_form_data(parts)?),
            }
            .map_err(|e| ApiError::Encode(e.to_string()))?;

            let response = built
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;

            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use crate::test_support::{client_with, sample_user, signed_in_store, MockTransport, RecordingNavigator, Reply};
    use crate::utils::storage::MemoryStorage;

    #[tokio::test]
    async fn attaches_bearer_token_when_signed_in() {
        let (store, _) = signed_in_store();
        let transport = MockTransport::always(HttpResponse::new(200, "[]"));
        let client = client_with(&transport, store, Rc::new(RecordingNavigator::default()));

        client.send(HttpRequest::get("/api/issues/")).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].header("Authorization"), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn caller_cannot_override_the_token() {
        let (store, _) = signed_in_store();
        let transport = MockTransport::always(HttpResponse::new(200, "{}"));
        let client = client_with(&transport, store, Rc::new(RecordingNavigator::default()));

        let mut request = HttpRequest::get("/api/auth/me");
        request.set_header("authorization", "Bearer forged".to_string());
        client.send(request).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].headers.len(), 1);
        assert_eq!(sent[0].header("Authorization"), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_authorization() {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let transport = MockTransport::always(HttpResponse::new(200, "[]"));
        let client = client_with(&transport, store, Rc::new(RecordingNavigator::default()));

        client.send(HttpRequest::get("/api/issues/")).await.unwrap();
        assert_eq!(transport.requests()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn unauthorized_clears_session_redirects_and_still_fails() {
        let (store, storage) = signed_in_store();
        let navigator = Rc::new(RecordingNavigator::default());
        let transport = MockTransport::always(HttpResponse::new(401, r#"{"detail":"Token expired"}"#));
        let client = client_with(&transport, store.clone(), navigator.clone());

        let result = client.send(HttpRequest::get("/api/auth/me")).await;

        assert_eq!(result, Err(ApiError::Unauthorized { detail: Some("Token expired".into()) }));
        assert!(storage.is_empty());
        assert_eq!(store.get().user, None);
        assert_eq!(navigator.visited(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn unauthorized_from_anonymous_store_still_redirects() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(storage.clone()));
        let navigator = Rc::new(RecordingNavigator::default());
        let transport = MockTransport::always(HttpResponse::new(401, r#"{"detail":"Not authenticated"}"#));
        let client = client_with(&transport, store.clone(), navigator.clone());

        let result = client.send(HttpRequest::get("/api/notifications/")).await;

        assert_eq!(result, Err(ApiError::Unauthorized { detail: Some("Not authenticated".into()) }));
        assert!(storage.is_empty());
        assert_eq!(navigator.visited(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn unauthorized_clears_corrupt_cached_user() {
        use crate::utils::constants::{TOKEN_KEY, USER_KEY};
        use crate::utils::storage::StorageBackend;

        let storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, "tok-stale");
        storage.set_item(USER_KEY, "{not json");
        let store = SessionStore::new(Rc::new(storage.clone()));
        let navigator = Rc::new(RecordingNavigator::default());
        let transport = MockTransport::always(HttpResponse::new(401, ""));
        let client = client_with(&transport, store.clone(), navigator.clone());

        let result = client.send(HttpRequest::get("/api/auth/me")).await;

        assert_eq!(result, Err(ApiError::Unauthorized { detail: None }));
        assert!(storage.is_empty());
        assert!(!store.is_authenticated());
        assert_eq!(navigator.visited(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn other_errors_pass_through_without_touching_session() {
        let (store, _) = signed_in_store();
        let navigator = Rc::new(RecordingNavigator::default());
        let transport = MockTransport::new(|request: &HttpRequest| match request.path.as_str() {
            "/api/issues/9" => Reply::Now(HttpResponse::new(404, r#"{"detail":"Issue with id 9 not found"}"#)),
            _ => Reply::Fail("connection refused".into()),
        });
        let client = client_with(&transport, store.clone(), navigator.clone());

        let not_found = client.send(HttpRequest::get("/api/issues/9")).await.unwrap_err();
        assert!(not_found.is_not_found());

        let network = client.send(HttpRequest::get("/api/issues/")).await.unwrap_err();
        assert_eq!(network, ApiError::Network("connection refused".into()));

        assert!(store.is_authenticated());
        assert_eq!(store.user(), Some(sample_user(UserRole::User)));
        assert!(navigator.visited().is_empty());
    }

    #[tokio::test]
    async fn decode_errors_are_reported() {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let transport = MockTransport::always(HttpResponse::new(200, "not json"));
        let client = client_with(&transport, store, Rc::new(RecordingNavigator::default()));

        let result: Result<Vec<crate::models::Issue>, _> = client.get_json("/api/issues/", Vec::new()).await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let transport = MockTransport::always(HttpResponse::new(200, ""));
        let client = HttpClient::new(
            "http://localhost:8001/",
            Rc::new(transport),
            store,
            Rc::new(RecordingNavigator::default()),
        );
        assert_eq!(client.base_url(), "http://localhost:8001");
    }
}
