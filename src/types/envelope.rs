use core::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A structured message that can travel inside an [`Envelope`].
///
/// `TYPE_URL` identifies the payload shape on the wire, in the
/// `type.googleapis.com/<full.name>` convention.
pub trait DetailMessage: Serialize + DeserializeOwned {
    /// Self-describing type tag of the payload.
    const TYPE_URL: &'static str;
}

/// Opaque, self-describing detail attached to a status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Envelope {
    /// Type tag of the encoded payload.
    pub type_url: String,
    /// Encoded payload bytes.
    pub value: Vec<u8>,
}

impl Envelope {
    /// Encodes `message` into an envelope tagged with its type URL.
    pub fn pack<M: DetailMessage>(message: &M) -> Result<Self, EncodingError> {
        let value = serde_json::to_vec(message).map_err(|source| EncodingError {
            type_url: M::TYPE_URL.into(),
            source,
        })?;
        Ok(Self { type_url: M::TYPE_URL.into(), value })
    }

    /// Returns `true` if the envelope holds an `M`.
    #[inline]
    pub fn is<M: DetailMessage>(&self) -> bool {
        self.type_url == M::TYPE_URL
    }

    /// Decodes the payload as an `M`.
    ///
    /// Returns `Ok(None)` when the envelope holds a different type.
    pub fn unpack<M: DetailMessage>(&self) -> Result<Option<M>, EncodingError> {
        if !self.is::<M>() {
            return Ok(None);
        }
        serde_json::from_slice(&self.value)
            .map(Some)
            .map_err(|source| EncodingError { type_url: self.type_url.clone(), source })
    }
}

/// A detail message failed to encode into, or decode from, an [`Envelope`].
#[derive(Debug)]
pub struct EncodingError {
    type_url: String,
    source: serde_json::Error,
}

impl EncodingError {
    /// Type URL of the message that failed.
    #[inline]
    pub fn type_url(&self) -> &str {
        &self.type_url
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to encode detail `{}`: {}", self.type_url, self.source)
    }
}

impl std::error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
