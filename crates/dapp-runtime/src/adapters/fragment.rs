//! URL-fragment locator: the id lives in `#0x…` of the page address.

use parking_lot::Mutex;
use shared_types::ObjectId;

use crate::ports::{parse_stored, LocatorError, ObjectLocator};

/// Keeps the object id in a `#0x…` fragment string.
#[derive(Debug, Default)]
pub struct FragmentLocator {
    fragment: Mutex<String>,
}

impl FragmentLocator {
    /// Start from an existing fragment (with or without the leading `#`).
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: Mutex::new(fragment.into()),
        }
    }

    /// Current fragment, including the `#` when set.
    pub fn fragment(&self) -> String {
        self.fragment.lock().clone()
    }
}

impl ObjectLocator for FragmentLocator {
    fn load(&self) -> Result<Option<ObjectId>, LocatorError> {
        let fragment = self.fragment.lock();
        parse_stored(fragment.strip_prefix('#').unwrap_or(&fragment))
    }

    fn save(&self, object_id: &ObjectId) -> Result<(), LocatorError> {
        *self.fragment.lock() = format!("#{}", object_id);
        Ok(())
    }

    fn clear(&self) -> Result<(), LocatorError> {
        self.fragment.lock().clear();
        Ok(())
    }
}
