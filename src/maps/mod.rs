// Mapas: lógica portable (picker / viewer) sobre el trait MapSurface

pub mod traits;
pub mod picker;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use traits::{MapError, MapMarker, MapSurface, MapViewConfig};
pub use picker::{default_center, MapPicker};
pub use viewer::{center_for_issues, markers_for_issues, MapViewer};

#[cfg(target_arch = "wasm32")]
pub use web::LeafletSurface;
