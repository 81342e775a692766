//! Chain-specific settings for validating parameter change proposals.
//!
//! Everything is optional: a missing section or field falls back to the stock
//! Tendermint consensus defaults and the standard governance content limits.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::consensus::{ConsensusEngine, ConsensusParams};
use crate::content::{validate_abstract_with, ContentLimits};
use crate::validate::validate_changes_with;
use crate::{ParameterChangeProposal, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults `baseapp` changes are applied to before the consensus check
    pub consensus: ConsensusParams,

    /// Title and description limits
    pub limits: ContentLimits,
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!("[CONFIG] loaded {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn with_consensus(mut self, consensus: ConsensusParams) -> Self {
        self.consensus = consensus;
        self
    }

    pub fn with_limits(mut self, limits: ContentLimits) -> Self {
        self.limits = limits;
        self
    }

    /// `validate_basic` with this config's content limits and consensus defaults.
    pub fn validate_proposal(&self, proposal: &ParameterChangeProposal) -> Result<()> {
        validate_abstract_with(proposal, &self.limits)?;
        validate_changes_with(proposal.changes(), self)
    }
}

impl ConsensusEngine for Config {
    fn default_consensus_params(&self) -> ConsensusParams {
        self.consensus.clone()
    }
}
