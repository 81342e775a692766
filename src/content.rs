use core::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::{Config, Error, Result};

pub const MAX_TITLE_LENGTH: usize = 140;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// The capability set every governance proposal variant provides so it can be
/// stored, voted on and dispatched alongside the others.
pub trait Content: Display + Debug {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    /// Routing key used to dispatch the proposal to its handler.
    fn proposal_route(&self) -> &str;
    /// Discriminator identifying the variant among registered proposal types.
    fn proposal_type(&self) -> &str;
    fn validate_basic(&self) -> Result<()>;
    /// `validate_basic` against a host's content limits and consensus defaults.
    fn validate_with_config(&self, config: &Config) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentLimits {
    pub max_title_length: usize,
    pub max_description_length: usize,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_title_length: MAX_TITLE_LENGTH,
            max_description_length: MAX_DESCRIPTION_LENGTH,
        }
    }
}

/// Validates the title and description shared by all proposal variants.
pub fn validate_abstract(content: &dyn Content) -> Result<()> {
    validate_abstract_with(content, &ContentLimits::default())
}

pub fn validate_abstract_with(content: &dyn Content, limits: &ContentLimits) -> Result<()> {
    let title = content.title();
    if title.trim().is_empty() {
        return Err(invalid("proposal title cannot be blank".into()));
    }
    if title.len() > limits.max_title_length {
        return Err(invalid(format!(
            "proposal title is longer than max length of {}",
            limits.max_title_length
        )));
    }

    let description = content.description();
    if description.trim().is_empty() {
        return Err(invalid("proposal description cannot be blank".into()));
    }
    if description.len() > limits.max_description_length {
        return Err(invalid(format!(
            "proposal description is longer than max length of {}",
            limits.max_description_length
        )));
    }

    Ok(())
}

fn invalid(reason: String) -> Error {
    Error::InvalidProposalContent(reason)
}
