//! Shared builders for integration tests and benchmarks.

use std::sync::Arc;
use std::time::Duration;

use dapp_runtime::{DappContext, MemoryLocator, ObjectLocator, RuntimeConfig};
use serde_json::{json, Map, Value};
use shared_ledger::InMemoryLedger;
use shared_types::{Address, LedgerObject, ObjectContent, ObjectId, Owner};

/// Account the test wallet signs as.
pub fn signer() -> Address {
    Address::from_bytes([0x42; 32])
}

/// Fresh ledger signing as [`signer`].
pub fn ledger() -> Arc<InMemoryLedger> {
    Arc::new(InMemoryLedger::new(signer()))
}

/// Fresh ledger that delays every submission and confirmation.
pub fn slow_ledger(latency: Duration) -> Arc<InMemoryLedger> {
    Arc::new(InMemoryLedger::new(signer()).with_latency(latency))
}

/// Test config with polling off, so reads happen only when a test asks.
pub fn config() -> RuntimeConfig {
    let mut config = RuntimeConfig::for_testing();
    config.reconciler.poll_interval_ms = 0;
    config
}

/// Context over `ledger` with in-memory locators.
pub fn context(ledger: &Arc<InMemoryLedger>) -> DappContext {
    context_with(ledger, config(), Arc::new(MemoryLocator::default()))
}

/// Context over `ledger` with `config` and a given business locator.
pub fn context_with(
    ledger: &Arc<InMemoryLedger>,
    config: RuntimeConfig,
    business_locator: Arc<dyn ObjectLocator>,
) -> DappContext {
    DappContext::with_locators(
        ledger.clone(),
        config,
        Some(signer()),
        business_locator,
        Arc::new(MemoryLocator::default()),
    )
    .expect("test config has a package")
}

/// Reputation struct type for the test package.
pub fn reputation_type() -> String {
    config()
        .contract
        .reputation_struct_type()
        .expect("test config has a package")
}

/// A `KredithScore` snapshot the way the RPC renders it.
pub fn business_object(id: &ObjectId, version: u64, name: &str, revenue: u64) -> LedgerObject {
    LedgerObject {
        object_id: id.clone(),
        version,
        owner: Owner::AddressOwner(signer()),
        content: ObjectContent::MoveObject {
            type_tag: reputation_type(),
            fields: fields(json!({
                "name": name,
                "category": "F&B",
                "revenue": revenue.to_string(),
            })),
        },
    }
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
