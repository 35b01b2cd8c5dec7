//! Domain layer: lifecycle, errors and the observable snapshot.

pub mod errors;
pub mod lifecycle;
pub mod snapshot;

pub use errors::*;
pub use lifecycle::*;
pub use snapshot::*;
