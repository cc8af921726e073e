// Utils compartidos

pub mod constants;
pub mod storage;
pub mod format;

#[cfg(target_arch = "wasm32")]
pub mod leaflet_ffi;

pub use constants::*;
pub use format::{format_date, format_datetime};
