use serde::{Deserialize, Serialize};
use crate::utils::constants::{
    BACKEND_URL, DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, RECENT_ISSUES_LIMIT, STATS_BATCH_LIMIT,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub map_config: MapConfig,
    pub dashboard_config: DashboardConfig,
    pub notice_duration_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            map_config: MapConfig::default(),
            dashboard_config: DashboardConfig::default(),
            notice_duration_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub default_center_lat: f64,
    pub default_center_lng: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center_lat: DEFAULT_CENTER_LAT,
            default_center_lng: DEFAULT_CENTER_LNG,
        }
    }
}

/// Límites de las consultas del dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub recent_limit: u32,
    /// Tamaño del lote usado para las estadísticas (no es un total real)
    pub stats_limit: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: RECENT_ISSUES_LIMIT,
            stats_limit: STATS_BATCH_LIMIT,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            backend_url: option_env!("BACKEND_URL")
                .unwrap_or(BACKEND_URL).trim_end_matches('/').to_string(),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map_config: MapConfig {
                default_center_lat: option_env!("DEFAULT_MAP_CENTER_LAT")
                    .unwrap_or("40.7128").parse().unwrap_or(DEFAULT_CENTER_LAT),
                default_center_lng: option_env!("DEFAULT_MAP_CENTER_LNG")
                    .unwrap_or("-74.0060").parse().unwrap_or(DEFAULT_CENTER_LNG),
            },
            dashboard_config: DashboardConfig {
                recent_limit: option_env!("DASHBOARD_RECENT_LIMIT")
                    .unwrap_or("5").parse().unwrap_or(RECENT_ISSUES_LIMIT),
                stats_limit: option_env!("DASHBOARD_STATS_LIMIT")
                    .unwrap_or("100").parse().unwrap_or(STATS_BATCH_LIMIT),
            },
            notice_duration_ms: option_env!("NOTICE_DURATION_MS")
                .unwrap_or("4000").parse().unwrap_or(4000),
        }
    }

    /// URL del backend sin barra final
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
