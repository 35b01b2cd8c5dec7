//! # Object Locator Port
//!
//! Where a session remembers the object it is showing, so a reload lands on
//! the same business or pizza box.

use shared_types::{IdParseError, ObjectId};
use thiserror::Error;

/// Failure reading or writing the remembered object id.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The backing store failed.
    #[error("locator I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value is not an object id.
    #[error("stored locator {value:?} is not an object id: {source}")]
    Malformed {
        /// Raw stored value.
        value: String,
        /// Parse failure.
        #[source]
        source: IdParseError,
    },
}

impl LocatorError {
    pub(crate) fn malformed(value: &str, source: IdParseError) -> Self {
        LocatorError::Malformed {
            value: value.to_string(),
            source,
        }
    }
}

/// Object Locator - outbound port.
pub trait ObjectLocator: Send + Sync {
    /// Remembered object id, if any.
    fn load(&self) -> Result<Option<ObjectId>, LocatorError>;

    /// Remember `object_id`, replacing any previous value.
    fn save(&self, object_id: &ObjectId) -> Result<(), LocatorError>;

    /// Forget the remembered object.
    fn clear(&self) -> Result<(), LocatorError>;
}

/// Parse a stored id; blank means nothing stored.
pub(crate) fn parse_stored(raw: &str) -> Result<Option<ObjectId>, LocatorError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|e| LocatorError::malformed(value, e))
}
