use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on `BlockParams::max_bytes` (100MB).
pub const MAX_BLOCK_SIZE_BYTES: i64 = 104_857_600;

pub const ABCI_PUB_KEY_TYPE_ED25519: &str = "ed25519";
pub const ABCI_PUB_KEY_TYPE_SECP256K1: &str = "secp256k1";
pub const ABCI_PUB_KEY_TYPE_SR25519: &str = "sr25519";

const KNOWN_PUB_KEY_TYPES: [&str; 3] = [
    ABCI_PUB_KEY_TYPE_ED25519,
    ABCI_PUB_KEY_TYPE_SECP256K1,
    ABCI_PUB_KEY_TYPE_SR25519,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusParamsError {
    #[error("block.MaxBytes must be greater than 0. Got {0}")]
    BlockMaxBytesNotPositive(i64),
    #[error("block.MaxBytes is too big. {got} > {max}")]
    BlockMaxBytesTooBig { got: i64, max: i64 },
    #[error("block.MaxGas must be greater or equal to -1. Got {0}")]
    BlockMaxGasBelowMinusOne(i64),
    #[error("block.TimeIotaMs must be greater than 0. Got {0}")]
    BlockTimeIotaNotPositive(i64),
    #[error("evidence.MaxAgeNumBlocks must be greater than 0. Got {0}")]
    EvidenceMaxAgeNumBlocksNotPositive(i64),
    #[error("evidence.MaxAgeDuration must be greater than 0. Got {0:?}")]
    EvidenceMaxAgeDurationZero(Duration),
    #[error("evidence.MaxBytes is greater than upper bound, {evidence} > {block}")]
    EvidenceMaxBytesAboveBlock { evidence: i64, block: i64 },
    #[error("evidence.MaxBytes must be non negative. Got: {0}")]
    EvidenceMaxBytesNegative(i64),
    #[error("len(Validator.PubKeyTypes) must be greater than 0")]
    NoValidatorPubKeyTypes,
    #[error("params.Validator.PubKeyTypes[{index}], {key_type}, is an unknown pubkey type")]
    UnknownValidatorPubKeyType { index: usize, key_type: String },
}

/// Limits on block size and gas, as carried in a `BlockParams` parameter change.
///
/// Decoding starts from the defaults: fields missing from the encoded value
/// keep their default, unknown fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockParams {
    pub max_bytes: i64,
    pub max_gas: i64,
    pub time_iota_ms: i64,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            max_bytes: 22_020_096, // 21MB
            max_gas: -1,
            time_iota_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceParams {
    pub max_age_num_blocks: i64,
    pub max_age_duration: Duration,
    pub max_bytes: i64,
}

impl Default for EvidenceParams {
    fn default() -> Self {
        Self {
            max_age_num_blocks: 100_000,
            max_age_duration: Duration::from_secs(48 * 60 * 60),
            max_bytes: 1_048_576, // 1MB
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorParams {
    pub pub_key_types: Vec<String>,
}

impl Default for ValidatorParams {
    fn default() -> Self {
        Self {
            pub_key_types: vec![ABCI_PUB_KEY_TYPE_ED25519.to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionParams {
    pub app_version: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    pub block: BlockParams,
    pub evidence: EvidenceParams,
    pub validator: ValidatorParams,
    pub version: VersionParams,
}

impl ConsensusParams {
    /// Checks the params as a whole. The first violated rule is reported.
    pub fn validate(&self) -> std::result::Result<(), ConsensusParamsError> {
        let block = &self.block;
        if block.max_bytes <= 0 {
            return Err(ConsensusParamsError::BlockMaxBytesNotPositive(
                block.max_bytes,
            ));
        }
        if block.max_bytes > MAX_BLOCK_SIZE_BYTES {
            return Err(ConsensusParamsError::BlockMaxBytesTooBig {
                got: block.max_bytes,
                max: MAX_BLOCK_SIZE_BYTES,
            });
        }
        if block.max_gas < -1 {
            return Err(ConsensusParamsError::BlockMaxGasBelowMinusOne(
                block.max_gas,
            ));
        }
        if block.time_iota_ms <= 0 {
            return Err(ConsensusParamsError::BlockTimeIotaNotPositive(
                block.time_iota_ms,
            ));
        }

        let evidence = &self.evidence;
        if evidence.max_age_num_blocks <= 0 {
            return Err(ConsensusParamsError::EvidenceMaxAgeNumBlocksNotPositive(
                evidence.max_age_num_blocks,
            ));
        }
        if evidence.max_age_duration.is_zero() {
            return Err(ConsensusParamsError::EvidenceMaxAgeDurationZero(
                evidence.max_age_duration,
            ));
        }
        if evidence.max_bytes > block.max_bytes {
            return Err(ConsensusParamsError::EvidenceMaxBytesAboveBlock {
                evidence: evidence.max_bytes,
                block: block.max_bytes,
            });
        }
        if evidence.max_bytes < 0 {
            return Err(ConsensusParamsError::EvidenceMaxBytesNegative(
                evidence.max_bytes,
            ));
        }

        if self.validator.pub_key_types.is_empty() {
            return Err(ConsensusParamsError::NoValidatorPubKeyTypes);
        }
        for (index, key_type) in self.validator.pub_key_types.iter().enumerate() {
            if !KNOWN_PUB_KEY_TYPES.contains(&key_type.as_str()) {
                return Err(ConsensusParamsError::UnknownValidatorPubKeyType {
                    index,
                    key_type: key_type.clone(),
                });
            }
        }

        Ok(())
    }
}

/// The view of the consensus engine needed to cross-check `baseapp` changes.
pub trait ConsensusEngine {
    fn default_consensus_params(&self) -> ConsensusParams;

    fn default_block_params(&self) -> BlockParams {
        self.default_consensus_params().block
    }

    fn validate_consensus_params(
        &self,
        params: &ConsensusParams,
    ) -> std::result::Result<(), ConsensusParamsError> {
        params.validate()
    }
}

/// Stock Tendermint defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TendermintDefaults;

impl ConsensusEngine for TendermintDefaults {
    fn default_consensus_params(&self) -> ConsensusParams {
        ConsensusParams::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_consensus_params_are_valid() {
        assert_eq!(ConsensusParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_block_max_bytes_bounds() {
        let mut params = ConsensusParams::default();

        params.block.max_bytes = 0;
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::BlockMaxBytesNotPositive(0))
        );

        params.block.max_bytes = MAX_BLOCK_SIZE_BYTES + 1;
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::BlockMaxBytesTooBig {
                got: MAX_BLOCK_SIZE_BYTES + 1,
                max: MAX_BLOCK_SIZE_BYTES
            })
        );

        params.block.max_bytes = MAX_BLOCK_SIZE_BYTES;
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn test_max_gas_of_minus_one_means_unlimited() {
        let mut params = ConsensusParams::default();
        params.block.max_gas = -1;
        assert_eq!(params.validate(), Ok(()));

        params.block.max_gas = -2;
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::BlockMaxGasBelowMinusOne(-2))
        );
    }

    #[test]
    fn test_evidence_must_fit_in_a_block() {
        let mut params = ConsensusParams::default();
        params.block.max_bytes = 1000;
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::EvidenceMaxBytesAboveBlock {
                evidence: 1_048_576,
                block: 1000
            })
        );

        params.evidence.max_bytes = -1;
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::EvidenceMaxBytesNegative(-1))
        );
    }

    #[test]
    fn test_evidence_age_must_be_positive() {
        let mut params = ConsensusParams::default();
        params.evidence.max_age_duration = Duration::ZERO;
        assert!(matches!(
            params.validate(),
            Err(ConsensusParamsError::EvidenceMaxAgeDurationZero(_))
        ));

        let mut params = ConsensusParams::default();
        params.evidence.max_age_num_blocks = 0;
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::EvidenceMaxAgeNumBlocksNotPositive(0))
        );
    }

    #[test]
    fn test_validator_pub_key_types() {
        let mut params = ConsensusParams::default();
        params.validator.pub_key_types.clear();
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::NoValidatorPubKeyTypes)
        );

        params.validator.pub_key_types = vec!["ed25519".into(), "bls12381".into()];
        assert_eq!(
            params.validate(),
            Err(ConsensusParamsError::UnknownValidatorPubKeyType {
                index: 1,
                key_type: "bls12381".into()
            })
        );
    }

    #[test]
    fn test_block_params_decode_overlays_defaults() {
        let params: BlockParams = serde_json::from_str(r#"{"max_gas": 5000000}"#).unwrap();
        assert_eq!(params.max_gas, 5_000_000);
        assert_eq!(params.max_bytes, BlockParams::default().max_bytes);
        assert_eq!(params.time_iota_ms, BlockParams::default().time_iota_ms);
    }
}
