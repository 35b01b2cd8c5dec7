//! # Contract Configuration
//!
//! Where the deployed contracts live. Module, function and struct names are
//! kept here and nowhere else.

use serde::{Deserialize, Serialize};
use shared_types::ObjectId;

/// Package id of the published demo contracts.
pub const DEMO_PACKAGE_ID: &str =
    "0x8f412472693c878a83e21547fa9c37f0a8db8df11be1db6e265809d4d56ffd8c";

/// Entry function names, one per action.
pub mod functions {
    /// `umkm_reputation::register(name, category)`.
    pub const REGISTER: &str = "register";
    /// `umkm_reputation::record_revenue(score, amount)`.
    pub const RECORD_REVENUE: &str = "record_revenue";
    /// `pizza::cook(pepperoni, sausage, cheese, onion, chives)`.
    pub const COOK: &str = "cook";
}

/// Contract configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Published package id. `None` until deployed.
    pub package_id: Option<ObjectId>,
    /// Module holding the reputation entry points.
    pub reputation_module: String,
    /// Struct minted by `register`.
    pub reputation_struct: String,
    /// Module holding the pizza entry points.
    pub pizza_module: String,
    /// Struct created by `cook`.
    pub pizza_struct: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            package_id: DEMO_PACKAGE_ID.parse().ok(),
            reputation_module: "umkm_reputation".to_string(),
            reputation_struct: "KredithScore".to_string(),
            pizza_module: "pizza".to_string(),
            pizza_struct: "PizzaBox".to_string(),
        }
    }
}

impl ContractConfig {
    /// Create a config for testing (package `0x1`).
    pub fn for_testing() -> Self {
        Self {
            package_id: "0x1".parse().ok(),
            ..Self::default()
        }
    }

    /// Fully qualified type of the reputation object, if a package is set.
    pub fn reputation_struct_type(&self) -> Option<String> {
        self.struct_type(&self.reputation_module, &self.reputation_struct)
    }

    /// Fully qualified type of the pizza box, if a package is set.
    pub fn pizza_struct_type(&self) -> Option<String> {
        self.struct_type(&self.pizza_module, &self.pizza_struct)
    }

    fn struct_type(&self, module: &str, name: &str) -> Option<String> {
        self.package_id
            .as_ref()
            .map(|package| format!("{}::{}::{}", package, module, name))
    }
}
