use log::{debug, info};
use serde::de::Error as _;
use serde_json::{Map, Value};

use crate::consensus::{BlockParams, ConsensusEngine, TendermintDefaults};
use crate::{Error, ParamChange, Result};

/// Subspace whose changes are cross-checked against the consensus engine.
pub const BASEAPP_SUBSPACE: &str = "baseapp";
/// The only `baseapp` key that mutates consensus params.
pub const BLOCK_PARAMS_KEY: &str = "BlockParams";

/// Performs basic validation checks over a set of `ParamChange`s against the
/// stock Tendermint consensus defaults. See [`validate_changes_with`].
pub fn validate_changes(changes: &[ParamChange]) -> Result<()> {
    validate_changes_with(changes, &TendermintDefaults)
}

/// Performs basic validation checks over a set of `ParamChange`s.
///
/// Changes are checked in order and the first violation is returned. A change
/// targeting the `baseapp` subspace triggers a check of the whole set against
/// `engine`: every `BlockParams` change is applied on top of the engine's
/// defaults and the result must be valid consensus params.
pub fn validate_changes_with(changes: &[ParamChange], engine: &impl ConsensusEngine) -> Result<()> {
    if changes.is_empty() {
        return Err(Error::EmptyChanges);
    }

    // The cross-check covers the whole set, so its outcome is the same for
    // every baseapp change. Run it once.
    let mut consensus_checked = false;

    for pc in changes {
        if pc.subspace.is_empty() {
            return Err(Error::EmptySubspace);
        }
        if pc.key.is_empty() {
            return Err(Error::EmptyKey);
        }
        if pc.value.is_empty() {
            return Err(Error::EmptyValue);
        }
        if pc.subspace == BASEAPP_SUBSPACE && !consensus_checked {
            verify_consensus_params_using_default(changes, engine)?;
            consensus_checked = true;
        }
    }

    debug!("[PARAMS] {} param change(s) passed validation", changes.len());
    Ok(())
}

/// Starts from the engine's default (valid) consensus params, applies every
/// `BlockParams` change in `changes`, then validates the result.
///
/// Keys other than `BlockParams` are ignored.
pub fn verify_consensus_params_using_default(
    changes: &[ParamChange],
    engine: &impl ConsensusEngine,
) -> Result<()> {
    let mut params = engine.default_consensus_params();

    for change in changes.iter().filter(|c| c.key == BLOCK_PARAMS_KEY) {
        params.block = decode_block_params(&change.value, engine.default_block_params())?;
        debug!("[PARAMS] applied block params override {:?}", params.block);
    }

    engine.validate_consensus_params(&params).map_err(|err| {
        info!("[PARAMS] rejecting consensus params {:?}: {}", params, err);
        Error::from(err)
    })
}

/// Decodes a JSON `BlockParams` value on top of `defaults`.
///
/// Fields absent from `value`, or set to `null`, keep their default and a
/// top-level `null` keeps all of them. Keys match field names exactly first,
/// then ignoring ASCII case. Later keys overwrite earlier ones. Unknown keys
/// are ignored.
fn decode_block_params(value: &str, defaults: BlockParams) -> Result<BlockParams> {
    let overrides = match serde_json::from_str::<Value>(value)? {
        Value::Null => return Ok(defaults),
        Value::Object(overrides) => overrides,
        other => {
            return Err(serde_json::Error::custom(format!(
                "invalid type: {}, expected a block params object",
                other
            ))
            .into())
        }
    };

    let mut merged = serde_json::to_value(defaults)?;
    if let Value::Object(fields) = &mut merged {
        for (key, v) in overrides {
            if v.is_null() {
                continue;
            }
            if let Some(field) = field_for_key(fields, &key) {
                fields.insert(field, v);
            }
        }
    }

    Ok(serde_json::from_value(merged)?)
}

fn field_for_key(fields: &Map<String, Value>, key: &str) -> Option<String> {
    if fields.contains_key(key) {
        return Some(key.to_string());
    }
    fields
        .keys()
        .find(|field| field.eq_ignore_ascii_case(key))
        .cloned()
}
