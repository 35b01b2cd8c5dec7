//! # Object Locator Adapters
//!
//! | Adapter | Storage |
//! |---------|---------|
//! | `FragmentLocator` | `#0x…` page fragment |
//! | `FileLocator` | first line of a file |
//! | `MemoryLocator` | process memory |

pub mod file;
pub mod fragment;
pub mod memory;

pub use file::FileLocator;
pub use fragment::FragmentLocator;
pub use memory::MemoryLocator;
