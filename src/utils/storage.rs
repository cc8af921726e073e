use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Medio de almacenamiento clave-valor (localStorage en el navegador).
///
/// Si el medio no está disponible, las lecturas devuelven `None` y las
/// escrituras no hacen nada.
pub trait StorageBackend {
    fn is_available(&self) -> bool;
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Almacenamiento en memoria (tests y contextos sin ventana)
#[derive(Clone)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    available: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: Rc::new(RefCell::new(HashMap::new())),
            available: true,
        }
    }

    /// Medio todavía no listo: todo se ignora
    pub fn unavailable() -> Self {
        Self {
            items: Rc::new(RefCell::new(HashMap::new())),
            available: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryStorage {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get_item(&self, key: &str) -> Option<String> {
        if !self.available {
            return None;
        }
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if self.available {
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    fn remove_item(&self, key: &str) {
        if self.available {
            self.items.borrow_mut().remove(key);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{get_local_storage, BrowserStorage};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::StorageBackend;
    use web_sys::{window, Storage};

    pub fn get_local_storage() -> Option<Storage> {
        window()?.local_storage().ok()?
    }

    /// `window.localStorage`, resuelto en cada llamada
    #[derive(Clone, Copy, Default)]
    pub struct BrowserStorage;

    impl StorageBackend for BrowserStorage {
        fn is_available(&self) -> bool {
            get_local_storage().is_some()
        }

        fn get_item(&self, key: &str) -> Option<String> {
            get_local_storage()?.get_item(key).ok()?
        }

        fn set_item(&self, key: &str, value: &str) {
            match get_local_storage() {
                Some(storage) => {
                    if storage.set_item(key, value).is_err() {
                        log::error!("❌ [STORAGE] Error guardando '{}' en localStorage", key);
                    }
                }
                None => log::warn!("⚠️ [STORAGE] localStorage no disponible, '{}' no se guardó", key),
            }
        }

        fn remove_item(&self, key: &str) {
            match get_local_storage() {
                Some(storage) => {
                    if storage.remove_item(key).is_err() {
                        log::error!("❌ [STORAGE] Error borrando '{}' de localStorage", key);
                    }
                }
                None => log::warn!("⚠️ [STORAGE] localStorage no disponible, '{}' no se borró", key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_storage_ignores_writes() {
        let storage = MemoryStorage::unavailable();
        storage.set_item("token", "abc");
        assert_eq!(storage.get_item("token"), None);
        assert!(!storage.is_available());
    }

    #[test]
    fn clones_share_items() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        clone.set_item("k", "v");
        assert_eq!(storage.get_item("k").as_deref(), Some("v"));
        clone.remove_item("k");
        assert!(storage.is_empty());
    }
}
