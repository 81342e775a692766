pub mod config;
pub mod consensus;
pub mod content;
pub mod error;
pub mod param_change;
pub mod proposal;
pub mod registry;
pub mod validate;

pub use crate::config::Config;
pub use crate::consensus::{
    BlockParams, ConsensusEngine, ConsensusParams, ConsensusParamsError, TendermintDefaults,
};
pub use crate::content::{validate_abstract, Content, ContentLimits};
pub use crate::error::{Error, Result};
pub use crate::param_change::ParamChange;
pub use crate::proposal::{
    register_proposal_types, ParameterChangeProposal, PROPOSAL_CODEC_NAME, PROPOSAL_TYPE_CHANGE,
    ROUTER_KEY,
};
pub use crate::registry::{ContentEnvelope, ProposalRegistry};
pub use crate::validate::{
    validate_changes, validate_changes_with, BASEAPP_SUBSPACE, BLOCK_PARAMS_KEY,
};
