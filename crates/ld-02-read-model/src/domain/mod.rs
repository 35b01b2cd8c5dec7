//! Domain layer: view models, projection, patches and errors.

pub mod errors;
pub mod history;
pub mod patches;
pub mod projection;
pub mod view_models;

pub use errors::*;
pub use history::*;
pub use patches::*;
pub use projection::Projection;
pub use view_models::*;
