//! File-backed cart persistence.
//!
//! The cart lives in `<cart-dir>/golden-crumb-cart-v1.json` as a flat JSON
//! object of item id to quantity. Reading is best-effort: a missing or
//! corrupt file yields an empty cart. The file is rewritten after every
//! mutation.

use std::io;
use std::path::{Path, PathBuf};

use golden_crumb_core::cart::{CART_STORAGE_KEY, Cart};

/// Cart storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    /// Store the cart under `dir`.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{CART_STORAGE_KEY}.json")),
        }
    }

    /// Location of the cart file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted cart, or an empty one.
    #[must_use]
    pub fn load(&self) -> Cart {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Cart::from_persisted(Some(&raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Cart::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Unreadable cart file, starting empty");
                Cart::new()
            }
        }
    }

    /// Persist `cart`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory or file cannot be written.
    pub fn save(&self, cart: &Cart) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, cart.to_persisted())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> (CartStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("gc-cart-{}", uuid::Uuid::new_v4()));
        (CartStore::new(&dir), dir)
    }

    #[test]
    fn test_missing_file_is_empty_cart() {
        let (store, _) = temp_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (store, dir) = temp_store();
        let cart = Cart::new().increment("croissant").increment("croissant");
        store.save(&cart).unwrap();

        assert_eq!(store.load().quantity("croissant"), 2);
        assert!(store.path().ends_with("golden-crumb-cart-v1.json"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_corrupt_file_resets_to_empty() {
        let (store, dir) = temp_store();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().is_empty());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
