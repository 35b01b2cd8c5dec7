//! # Core Ledger Entities
//!
//! Identifiers and object snapshots as the ledger RPC returns them.
//!
//! ## Clusters
//!
//! - **Identity**: `ObjectId`, `Address`, `Digest`
//! - **Objects**: `LedgerObject`, `ObjectContent`, `Owner`
//! - **Effects**: `TransactionEffects`, `ObjectRef`, `ExecutionStatus`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::IdParseError;

/// Number of hex digits in a normalized 32-byte identifier.
pub const ID_HEX_LEN: usize = 64;

/// Normalize a `0x`-prefixed hex identifier to lowercase, left-padded to 32 bytes.
fn normalize_hex_id(raw: &str) -> Result<String, IdParseError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| IdParseError::MissingPrefix(trimmed.to_string()))?;

    if digits.is_empty() || digits.len() > ID_HEX_LEN {
        return Err(IdParseError::InvalidLength(digits.len()));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(IdParseError::InvalidCharacter(bad));
    }

    Ok(format!(
        "0x{:0>width$}",
        digits.to_ascii_lowercase(),
        width = ID_HEX_LEN
    ))
}

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Immutable identifier of a ledger object (or a published package).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Normalized `0x…` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an id from raw bytes (used by ledger simulations).
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Shortened form for log lines (`0x1234…abcd`).
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl FromStr for ObjectId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_hex_id(s).map(Self)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account address of a wallet.
///
/// Same textual form as `ObjectId`; comparisons are on the normalized form,
/// so mixed-case input from wallets compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Normalized `0x…` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an address from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Display form used by wallet buttons (`0x1234...abcd`).
    pub fn abbreviated(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_hex_id(s).map(Self)
    }
}

impl TryFrom<String> for Address {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction digest returned by the gateway after submission.
///
/// Opaque to the client; only ever shown to the user for manual verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Wrap a digest string. Empty digests are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, IdParseError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdParseError::EmptyDigest);
        }
        Ok(Self(value))
    }

    /// Raw digest text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Digest {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER B: OBJECTS
// =============================================================================

/// Ownership of a ledger object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Exclusively owned by one account.
    AddressOwner(Address),
    /// Shared object, mutable by anyone through the contract.
    Shared {
        /// Version at which the object became shared.
        initial_shared_version: u64,
    },
    /// Frozen object.
    Immutable,
}

/// Content of a fetched object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all = "camelCase")]
pub enum ObjectContent {
    /// An instance of a contract struct.
    MoveObject {
        /// Fully qualified struct type (`0x…::module::Struct`).
        #[serde(rename = "type")]
        type_tag: String,
        /// Field bag exactly as the RPC renders it.
        fields: Map<String, Value>,
    },
    /// A published package (never a valid view-model source).
    Package,
}

/// Versioned snapshot of an on-chain object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerObject {
    /// Immutable identifier.
    pub object_id: ObjectId,
    /// Bumped by every transaction that mutates the object.
    pub version: u64,
    /// Current owner.
    pub owner: Owner,
    /// Typed content.
    pub content: ObjectContent,
}

impl LedgerObject {
    /// Struct type and fields, if this is a contract object.
    pub fn move_fields(&self) -> Option<(&str, &Map<String, Value>)> {
        match &self.content {
            ObjectContent::MoveObject { type_tag, fields } => Some((type_tag.as_str(), fields)),
            ObjectContent::Package => None,
        }
    }

    /// Owning address for address-owned objects.
    pub fn owner_address(&self) -> Option<&Address> {
        match &self.owner {
            Owner::AddressOwner(address) => Some(address),
            _ => None,
        }
    }
}

// =============================================================================
// CLUSTER C: EFFECTS
// =============================================================================

/// Reference to an object at a specific version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Object identifier.
    pub object_id: ObjectId,
    /// Version after the transaction.
    pub version: u64,
}

/// On-chain execution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// All commands executed.
    Success,
    /// The transaction was included but aborted.
    Failure {
        /// Abort reason reported by the ledger.
        error: String,
    },
}

/// Effects of a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEffects {
    /// Digest of the transaction.
    pub digest: Digest,
    /// Execution status.
    pub status: ExecutionStatus,
    /// Objects created by the transaction.
    pub created: Vec<ObjectRef>,
    /// Objects mutated by the transaction.
    pub mutated: Vec<ObjectRef>,
}

impl TransactionEffects {
    /// First created object; creation calls in these apps create exactly one.
    pub fn first_created(&self) -> Option<&ObjectRef> {
        self.created.first()
    }

    /// Version of `id` after this transaction, if it was created or mutated.
    pub fn version_of(&self, id: &ObjectId) -> Option<u64> {
        self.created
            .iter()
            .chain(self.mutated.iter())
            .find(|r| &r.object_id == id)
            .map(|r| r.version)
    }

    /// Whether execution succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.status, ExecutionStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_normalizes_case_and_padding() {
        let id: ObjectId = "0xABC".parse().unwrap();
        assert_eq!(id.as_str().len(), 2 + ID_HEX_LEN);
        assert!(id.as_str().ends_with("abc"));
        assert!(id.as_str().starts_with("0x000"));
    }

    #[test]
    fn test_object_id_rejects_missing_prefix() {
        let result: Result<ObjectId, _> = "abc".parse();
        assert!(matches!(result, Err(IdParseError::MissingPrefix(_))));
    }

    #[test]
    fn test_object_id_rejects_non_hex() {
        let result: Result<ObjectId, _> = "0xzz".parse();
        assert!(matches!(result, Err(IdParseError::InvalidCharacter('z'))));
    }

    #[test]
    fn test_object_id_rejects_too_long() {
        let raw = format!("0x{}", "1".repeat(65));
        let result: Result<ObjectId, _> = raw.parse();
        assert!(matches!(result, Err(IdParseError::InvalidLength(65))));
    }

    #[test]
    fn test_address_comparison_is_case_insensitive() {
        let lower: Address = "0xabcdef".parse().unwrap();
        let upper: Address = "0xABCDEF".parse().unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_address_abbreviated() {
        let address = Address::from_bytes([0x11; 32]);
        assert_eq!(address.abbreviated(), "0x1111...1111");
    }

    #[test]
    fn test_empty_digest_rejected() {
        assert!(Digest::new("  ").is_err());
        assert!(Digest::new("9xQe").is_ok());
    }

    #[test]
    fn test_object_id_serde_uses_string_form() {
        let id: ObjectId = "0x1".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
        assert!(serde_json::from_str::<ObjectId>("\"nope\"").is_err());
    }

    #[test]
    fn test_effects_version_of() {
        let id = ObjectId::from_bytes([7; 32]);
        let effects = TransactionEffects {
            digest: Digest::new("d1").unwrap(),
            status: ExecutionStatus::Success,
            created: vec![],
            mutated: vec![ObjectRef {
                object_id: id.clone(),
                version: 4,
            }],
        };
        assert_eq!(effects.version_of(&id), Some(4));
        assert!(effects.first_created().is_none());
        assert!(effects.is_success());
    }

    #[test]
    fn test_move_fields_none_for_package() {
        let object = LedgerObject {
            object_id: ObjectId::from_bytes([1; 32]),
            version: 1,
            owner: Owner::Immutable,
            content: ObjectContent::Package,
        };
        assert!(object.move_fields().is_none());
        assert!(object.owner_address().is_none());
    }
}
