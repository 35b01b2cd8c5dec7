//! # Simulated Contracts
//!
//! Just enough of the two deployed modules to exercise the client:
//!
//! | Call | Effect |
//! |------|--------|
//! | `umkm_reputation::register(name, category)` | creates a `KredithScore` owned by the sender |
//! | `umkm_reputation::record_revenue(score, amount)` | adds `amount` to the score's revenue; sender must own it |
//! | `pizza::cook(pepperoni, sausage, cheese, onion, chives)` | creates a `PizzaBox` wrapping a `Pizza` |
//!
//! `u64` fields are rendered as decimal strings and nested structs as
//! `{ type, fields }`, the way the RPC renders them.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use shared_types::{Address, CallArg, LedgerObject, MoveCall, ObjectContent, ObjectId, Owner, PureValue};

/// Reputation module name.
pub const REPUTATION_MODULE: &str = "umkm_reputation";
/// Struct minted by `register`.
pub const REPUTATION_STRUCT: &str = "KredithScore";
/// Pizza module name.
pub const PIZZA_MODULE: &str = "pizza";
/// Struct created by `cook`.
pub const PIZZA_BOX_STRUCT: &str = "PizzaBox";
/// Struct wrapped inside a box.
pub const PIZZA_STRUCT: &str = "Pizza";

const SILVER_ABOVE: u64 = 10_000_000;
const GOLD_ABOVE: u64 = 100_000_000;

/// Outcome of one successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// A new object owned by the sender.
    Create {
        /// Struct type.
        type_tag: String,
        /// Initial fields.
        fields: Map<String, Value>,
    },
    /// New fields for an existing object.
    Mutate {
        /// Target object.
        object_id: ObjectId,
        /// Replacement fields.
        fields: Map<String, Value>,
    },
}

/// Execute `call` against `objects` as `sender`. `Err` is the abort reason.
pub fn execute(
    call: &MoveCall,
    objects: &HashMap<ObjectId, LedgerObject>,
    sender: &Address,
) -> Result<Change, String> {
    let struct_type = |name: &str| format!("{}::{}::{}", call.target.package, call.target.module, name);

    match (call.target.module.as_str(), call.target.function.as_str()) {
        (REPUTATION_MODULE, "register") => {
            let [name, category] = pure_args::<2>(call)?;
            let (name, category) = (as_string(name)?, as_string(category)?);
            Ok(Change::Create {
                type_tag: struct_type(REPUTATION_STRUCT),
                fields: into_map(json!({
                    "name": name,
                    "category": category,
                    "revenue": "0",
                    "tier": tier_name(0),
                })),
            })
        }
        (REPUTATION_MODULE, "record_revenue") => {
            let (object_id, amount) = match call.arguments.as_slice() {
                [CallArg::Object(id), CallArg::Pure(PureValue::U64(amount))] => (id, *amount),
                _ => return Err(abort(call, "EArgumentMismatch")),
            };
            let object = objects
                .get(object_id)
                .ok_or_else(|| abort(call, "EObjectNotFound"))?;
            if object.owner_address() != Some(sender) {
                return Err(abort(call, "ENotOwner"));
            }
            let fields = match &object.content {
                ObjectContent::MoveObject { type_tag, fields }
                    if type_tag.ends_with(&format!("::{}::{}", REPUTATION_MODULE, REPUTATION_STRUCT)) =>
                {
                    fields
                }
                _ => return Err(abort(call, "ETypeMismatch")),
            };

            let current = fields
                .get("revenue")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(0);
            let revenue = current
                .checked_add(amount)
                .ok_or_else(|| abort(call, "EArithmeticOverflow"))?;

            let mut fields = fields.clone();
            fields.insert("revenue".into(), Value::String(revenue.to_string()));
            fields.insert("tier".into(), Value::String(tier_name(revenue).into()));
            Ok(Change::Mutate {
                object_id: object_id.clone(),
                fields,
            })
        }
        (PIZZA_MODULE, "cook") => {
            let counts = pure_args::<5>(call)?;
            let mut pizza = Map::new();
            for (name, value) in ["pepperoni", "sausage", "cheese", "onion", "chives"]
                .into_iter()
                .zip(counts)
            {
                match value {
                    PureValue::U16(count) => pizza.insert(name.into(), json!(count)),
                    _ => return Err(abort(call, "EArgumentMismatch")),
                };
            }
            Ok(Change::Create {
                type_tag: struct_type(PIZZA_BOX_STRUCT),
                fields: into_map(json!({
                    "pizza": { "type": struct_type(PIZZA_STRUCT), "fields": pizza },
                })),
            })
        }
        _ => Err(abort(call, "EFunctionNotFound")),
    }
}

fn pure_args<const N: usize>(call: &MoveCall) -> Result<[&PureValue; N], String> {
    let values: Vec<&PureValue> = call
        .arguments
        .iter()
        .filter_map(|arg| match arg {
            CallArg::Pure(value) => Some(value),
            CallArg::Object(_) => None,
        })
        .collect();
    if values.len() != call.arguments.len() {
        return Err(abort(call, "EArgumentMismatch"));
    }
    values
        .try_into()
        .map_err(|_| abort(call, "EArgumentCountMismatch"))
}

fn as_string(value: &PureValue) -> Result<&str, String> {
    match value {
        PureValue::String(s) => Ok(s),
        _ => Err("EArgumentMismatch".to_string()),
    }
}

fn tier_name(revenue: u64) -> &'static str {
    if revenue > GOLD_ABOVE {
        "Gold"
    } else if revenue > SILVER_ABOVE {
        "Silver"
    } else {
        "Bronze"
    }
}

fn abort(call: &MoveCall, code: &str) -> String {
    format!("MoveAbort in {}: {}", call.target, code)
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Build a fresh object for a `Create` change.
pub fn new_object(
    object_id: ObjectId,
    version: u64,
    owner: Address,
    type_tag: String,
    fields: Map<String, Value>,
) -> LedgerObject {
    LedgerObject {
        object_id,
        version,
        owner: Owner::AddressOwner(owner),
        content: ObjectContent::MoveObject { type_tag, fields },
    }
}
