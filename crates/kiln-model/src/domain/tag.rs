use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    ModelError,
    domain::constants::{TAG_DIGEST_BYTES, TAG_HEX_LEN},
};

/// Content-addressed image version label.
///
/// Always exactly [`TAG_HEX_LEN`] lowercase hex characters: the hex encoding of the
/// first [`TAG_DIGEST_BYTES`] bytes of a digest over the canonical spec encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct BuildTag(String);

impl BuildTag {
    /// Build a tag from a digest, keeping only its leading bytes.
    ///
    /// Returns an error if the digest is shorter than [`TAG_DIGEST_BYTES`].
    pub fn from_digest(digest: &[u8]) -> Result<Self, ModelError> {
        let prefix = digest.get(..TAG_DIGEST_BYTES).ok_or_else(|| {
            ModelError::InvalidTag(format!(
                "digest has {} bytes, need at least {TAG_DIGEST_BYTES}",
                digest.len()
            ))
        })?;
        Ok(Self(hex::encode(prefix)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BuildTag {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let well_formed = s.len() == TAG_HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(ModelError::InvalidTag(s));
        }
        Ok(Self(s))
    }
}

impl From<BuildTag> for String {
    fn from(t: BuildTag) -> Self {
        t.0
    }
}

impl fmt::Display for BuildTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_digest_keeps_eight_bytes() {
        let digest: Vec<u8> = (0u8..32).collect();
        let tag = BuildTag::from_digest(&digest).unwrap();
        assert_eq!(tag.as_str(), "0001020304050607");
        assert_eq!(tag.as_str().len(), TAG_HEX_LEN);
    }

    #[test]
    fn from_digest_rejects_short_input() {
        assert!(BuildTag::from_digest(&[0xab; 4]).is_err());
    }

    #[test]
    fn try_from_accepts_lowercase_hex_only() {
        assert!(BuildTag::try_from("8ab38a9b05d98966".to_string()).is_ok());

        let bad = ["", "8AB38A9B05D98966", "8ab38a9b05d9896", "8ab38a9b05d98966aa", "zzzzzzzzzzzzzzzz"];
        for input in bad {
            assert!(
                BuildTag::try_from(input.to_string()).is_err(),
                "expected error for {input:?}"
            );
        }
    }

    #[test]
    fn serde_is_a_plain_string() {
        let tag = BuildTag::try_from("0011223344556677".to_string()).unwrap();
        let json = serde_json::to_string(&tag).unwrap();
        assert_eq!(json, r#""0011223344556677""#);

        let back: BuildTag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tag);
        assert!(serde_json::from_str::<BuildTag>(r#""nope""#).is_err());
    }
}
