//! # Transaction Builder
//!
//! Pure mapping from a validated request to the payload the gateway signs.
//! No I/O; the same request and config always produce the same payload.

use shared_types::{CallArg, CallTarget, MoveCall, ObjectId, PureValue, TransactionPayload};
use tracing::debug;

use crate::config::{functions, ContractConfig};
use crate::domain::{BuildError, ValidatedAction, ValidatedRequest};

/// Largest pure argument the ledger accepts, in bytes.
pub const MAX_PURE_ARG_BYTES: usize = 16 * 1024;

/// Build the payload for `request` against `contract`.
pub fn build(
    request: &ValidatedRequest,
    contract: &ContractConfig,
) -> Result<TransactionPayload, BuildError> {
    let package = contract
        .package_id
        .clone()
        .ok_or(BuildError::MissingPackage)?;

    let call = match request.action() {
        ValidatedAction::Register { name, category } => move_call(
            package,
            &contract.reputation_module,
            functions::REGISTER,
            vec![
                CallArg::Pure(PureValue::String(name.clone())),
                CallArg::Pure(PureValue::String(category.clone())),
            ],
        )?,
        ValidatedAction::RecordRevenue {
            business, amount, ..
        } => move_call(
            package,
            &contract.reputation_module,
            functions::RECORD_REVENUE,
            vec![
                CallArg::Object(business.clone()),
                CallArg::Pure(PureValue::U64(*amount)),
            ],
        )?,
        ValidatedAction::Cook { toppings } => {
            let mut arguments = Vec::with_capacity(5);
            for (topping, count) in toppings.iter() {
                // Validation caps counts at 30, far inside u16.
                let count = u16::try_from(count).map_err(|_| BuildError::ArgumentTooLarge {
                    index: arguments.len(),
                    size: count as usize,
                    limit: u16::MAX as usize,
                })?;
                debug!("[ld-01] {} = {}", topping, count);
                arguments.push(CallArg::Pure(PureValue::U16(count)));
            }
            move_call(package, &contract.pizza_module, functions::COOK, arguments)?
        }
    };

    debug!(
        request_id = %request.id(),
        target = %call.target,
        args = call.arguments.len(),
        "[ld-01] Built transaction payload"
    );

    Ok(TransactionPayload::single(call))
}

fn move_call(
    package: ObjectId,
    module: &str,
    function: &str,
    arguments: Vec<CallArg>,
) -> Result<MoveCall, BuildError> {
    check_identifier("module", module)?;
    check_identifier("function", function)?;
    check_pure_sizes(&arguments)?;

    Ok(MoveCall {
        target: CallTarget {
            package,
            module: module.to_string(),
            function: function.to_string(),
        },
        arguments,
    })
}

/// Move identifiers: ASCII letter or `_` first, then letters, digits, `_`;
/// a lone `_` is not an identifier.
pub fn check_identifier(kind: &'static str, value: &str) -> Result<(), BuildError> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        Some('_') => {
            let rest: Vec<char> = chars.collect();
            !rest.is_empty() && rest.iter().all(|c| c.is_ascii_alphanumeric() || *c == '_')
        }
        _ => false,
    };

    if !valid {
        return Err(BuildError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Reject pure arguments over `MAX_PURE_ARG_BYTES`.
pub fn check_pure_sizes(arguments: &[CallArg]) -> Result<(), BuildError> {
    for (index, argument) in arguments.iter().enumerate() {
        if let CallArg::Pure(value) = argument {
            let size = value.encoded_len();
            if size > MAX_PURE_ARG_BYTES {
                return Err(BuildError::ArgumentTooLarge {
                    index,
                    size,
                    limit: MAX_PURE_ARG_BYTES,
                });
            }
        }
    }
    Ok(())
}
