use std::collections::{BTreeMap, BTreeSet};

use core::fmt::Debug;

use log::{debug, info};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::content::Content;
use crate::{Config, Error, Result};

type Decoder = fn(&[u8]) -> Result<Box<dyn Content>>;

/// Wire form of a proposal: the codec it was encoded with and its bincode payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEnvelope {
    pub codec: String,
    pub payload: Vec<u8>,
}

/// Maps proposal discriminators to the codecs able to (de)serialize them.
///
/// Hosts build one at startup, register every proposal variant they accept,
/// and route incoming proposals through `decode_and_validate`.
#[derive(Default)]
pub struct ProposalRegistry {
    types: BTreeSet<String>,
    // codec name -> decoder
    decoders: BTreeMap<String, Decoder>,
    // proposal type -> codec name
    codecs: BTreeMap<String, String>,
}

impl Debug for ProposalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProposalRegistry")
            .field("types", &self.types)
            .field("codecs", &self.codecs)
            .finish()
    }
}

fn decode_as<C>(payload: &[u8]) -> Result<Box<dyn Content>>
where
    C: Content + DeserializeOwned + 'static,
{
    let content: C = bincode::deserialize(payload)?;
    Ok(Box::new(content))
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_proposal_type(&mut self, name: &str) -> Result<()> {
        if !self.types.insert(name.to_string()) {
            return Err(Error::DuplicateProposalType(name.to_string()));
        }
        debug!("[REGISTRY] registered proposal type {}", name);
        Ok(())
    }

    /// Binds `codec_name` to a decoder for `C`. `C`'s proposal type must
    /// already be registered.
    pub fn register_proposal_type_codec<C>(&mut self, codec_name: &str) -> Result<()>
    where
        C: Content + Default + DeserializeOwned + 'static,
    {
        let proposal_type = C::default().proposal_type().to_string();
        if !self.types.contains(&proposal_type) {
            return Err(Error::UnknownProposalType(proposal_type));
        }
        if self.decoders.contains_key(codec_name) {
            return Err(Error::DuplicateProposalCodec(codec_name.to_string()));
        }

        self.decoders
            .insert(codec_name.to_string(), decode_as::<C> as Decoder);
        self.codecs.insert(proposal_type, codec_name.to_string());
        debug!("[REGISTRY] registered proposal codec {}", codec_name);
        Ok(())
    }

    pub fn is_valid_proposal_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }

    pub fn codec_name(&self, proposal_type: &str) -> Option<&str> {
        self.codecs.get(proposal_type).map(String::as_str)
    }

    pub fn encode<C: Content + Serialize>(&self, content: &C) -> Result<Vec<u8>> {
        let codec = self
            .codec_name(content.proposal_type())
            .ok_or_else(|| Error::UnknownProposalType(content.proposal_type().to_string()))?;
        let envelope = ContentEnvelope {
            codec: codec.to_string(),
            payload: bincode::serialize(content)?,
        };
        Ok(bincode::serialize(&envelope)?)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Box<dyn Content>> {
        let envelope: ContentEnvelope = bincode::deserialize(bytes)?;
        let decoder = self
            .decoders
            .get(&envelope.codec)
            .ok_or_else(|| Error::UnknownProposalCodec(envelope.codec.clone()))?;
        decoder(&envelope.payload)
    }

    /// Decodes a proposal and runs its stateless checks against the stock
    /// consensus defaults and content limits.
    pub fn decode_and_validate(&self, bytes: &[u8]) -> Result<Box<dyn Content>> {
        self.decode_checked(bytes, |content| content.validate_basic())
    }

    /// Like `decode_and_validate`, but checks against `config`.
    pub fn decode_and_validate_with(
        &self,
        bytes: &[u8],
        config: &Config,
    ) -> Result<Box<dyn Content>> {
        self.decode_checked(bytes, |content| content.validate_with_config(config))
    }

    fn decode_checked(
        &self,
        bytes: &[u8],
        validate: impl Fn(&dyn Content) -> Result<()>,
    ) -> Result<Box<dyn Content>> {
        let content = self.decode(bytes)?;
        if !self.is_valid_proposal_type(content.proposal_type()) {
            return Err(Error::UnknownProposalType(
                content.proposal_type().to_string(),
            ));
        }
        if let Err(err) = validate(&*content) {
            info!(
                "[REGISTRY] rejecting {} proposal {:?}: {}",
                content.proposal_type(),
                content.title(),
                err
            );
            return Err(err);
        }
        Ok(content)
    }
}
