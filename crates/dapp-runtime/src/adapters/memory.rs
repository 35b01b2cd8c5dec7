//! In-process locator for tests and the demo.

use parking_lot::Mutex;
use shared_types::ObjectId;

use crate::ports::{LocatorError, ObjectLocator};

/// Remembers the object id in memory only.
#[derive(Debug, Default)]
pub struct MemoryLocator {
    object_id: Mutex<Option<ObjectId>>,
}

impl MemoryLocator {
    /// Start with `object_id` remembered.
    pub fn with_object(object_id: ObjectId) -> Self {
        Self {
            object_id: Mutex::new(Some(object_id)),
        }
    }
}

impl ObjectLocator for MemoryLocator {
    fn load(&self) -> Result<Option<ObjectId>, LocatorError> {
        Ok(self.object_id.lock().clone())
    }

    fn save(&self, object_id: &ObjectId) -> Result<(), LocatorError> {
        *self.object_id.lock() = Some(object_id.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), LocatorError> {
        *self.object_id.lock() = None;
        Ok(())
    }
}
