use thiserror::Error;

use crate::consensus::ConsensusParamsError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("We experienced an IO error")]
    IO(#[from] std::io::Error),
    #[error("Submitted parameter changes are empty")]
    EmptyChanges,
    #[error("Parameter subspace is empty")]
    EmptySubspace,
    #[error("Parameter key is empty")]
    EmptyKey,
    #[error("Parameter value is empty")]
    EmptyValue,
    #[error("Failed to decode block params: {0}")]
    BlockParamsDecode(#[from] serde_json::Error),
    #[error("Consensus params are invalid: {0}")]
    InvalidConsensusParams(#[from] ConsensusParamsError),
    #[error("Invalid proposal content: {0}")]
    InvalidProposalContent(String),
    #[error("Proposal type `{0}` is already registered")]
    DuplicateProposalType(String),
    #[error("Proposal codec `{0}` is already registered")]
    DuplicateProposalCodec(String),
    #[error("Proposal type `{0}` is not registered")]
    UnknownProposalType(String),
    #[error("No decoder registered under codec `{0}`")]
    UnknownProposalCodec(String),
    #[error("Failed to encode with bincode")]
    Encoding(#[from] bincode::Error),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Failed to write config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
