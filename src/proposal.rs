use core::fmt::{self, Write};

use log::info;
use serde::{Deserialize, Serialize};

use crate::consensus::ConsensusEngine;
use crate::content::{validate_abstract, Content};
use crate::registry::ProposalRegistry;
use crate::validate::{validate_changes, validate_changes_with};
use crate::{Config, ParamChange, Result};

/// Proposal type of a `ParameterChangeProposal`.
pub const PROPOSAL_TYPE_CHANGE: &str = "ParameterChange";
/// Routing key of the params module.
pub const ROUTER_KEY: &str = "params";
/// Name the proposal is (de)serialized under.
pub const PROPOSAL_CODEC_NAME: &str = "cosmos-sdk/ParameterChangeProposal";

/// Registers the parameter change proposal type and its codec.
/// Call once while the host application starts up.
pub fn register_proposal_types(registry: &mut ProposalRegistry) -> Result<()> {
    registry.register_proposal_type(PROPOSAL_TYPE_CHANGE)?;
    registry.register_proposal_type_codec::<ParameterChangeProposal>(PROPOSAL_CODEC_NAME)?;
    info!("[GOV] registered {} proposals", PROPOSAL_TYPE_CHANGE);
    Ok(())
}

/// Governance proposal requesting a set of parameter changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterChangeProposal {
    pub title: String,
    pub description: String,
    pub changes: Vec<ParamChange>,
    pub is_expedited: bool,
}

impl ParameterChangeProposal {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        changes: Vec<ParamChange>,
        is_expedited: bool,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            changes,
            is_expedited,
        }
    }

    pub fn changes(&self) -> &[ParamChange] {
        &self.changes
    }

    pub fn is_expedited(&self) -> bool {
        self.is_expedited
    }

    /// Like `validate_basic`, but cross-checks `baseapp` changes against `engine`.
    pub fn validate_basic_with(&self, engine: &impl ConsensusEngine) -> Result<()> {
        validate_abstract(self)?;
        validate_changes_with(&self.changes, engine)
    }
}

impl Content for ParameterChangeProposal {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn proposal_route(&self) -> &str {
        ROUTER_KEY
    }

    fn proposal_type(&self) -> &str {
        PROPOSAL_TYPE_CHANGE
    }

    fn validate_basic(&self) -> Result<()> {
        validate_abstract(self)?;
        validate_changes(&self.changes)
    }

    fn validate_with_config(&self, config: &Config) -> Result<()> {
        config.validate_proposal(self)
    }
}

impl fmt::Display for ParameterChangeProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b = String::new();
        write!(
            b,
            "Parameter Change Proposal:\n  Title:       {}\n  Description: {}\n  Changes:\n",
            self.title, self.description
        )?;

        for pc in self.changes.iter() {
            write!(
                b,
                "    Param Change:\n      Subspace: {}\n      Key:      {}\n      Value:    {}\n",
                pc.subspace,
                pc.key,
                pc.value_hex()
            )?;
        }

        f.write_str(&b)
    }
}
