/// URL base del backend
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:8001 (por defecto)
/// - Producción: via BACKEND_URL env var (o .env, ver build.rs)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8001",
};

// Claves de localStorage (se escriben y se borran juntas)
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Evento DOM propio que se lanza tras navegar en el cliente
pub const ROUTE_CHANGE_EVENT: &str = "routechange";

/// Centro por defecto de los mapas (Nueva York)
pub const DEFAULT_CENTER_LAT: f64 = 40.7128;
pub const DEFAULT_CENTER_LNG: f64 = -74.0060;

pub const PICKER_ZOOM: f64 = 13.0;
pub const MAP_PAGE_ZOOM: f64 = 12.0;
pub const DETAIL_ZOOM: f64 = 15.0;

pub const RECENT_ISSUES_LIMIT: u32 = 5;
pub const STATS_BATCH_LIMIT: u32 = 100;
