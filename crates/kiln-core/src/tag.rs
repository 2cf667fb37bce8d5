//! Content-addressed tag computation.
use sha2::{Digest, Sha256};

use kiln_model::{BuildSpec, BuildTag};

use crate::PipelineError;

/// Canonical byte encoding of a spec.
///
/// Compact JSON with fields in declaration order and sequences exactly as received.
pub fn canonical_bytes(spec: &BuildSpec) -> Result<Vec<u8>, PipelineError> {
    serde_json::to_vec(spec)
        .map_err(|e| PipelineError::Internal(format!("canonical encoding failed: {e}")))
}

/// SHA-256 over [`canonical_bytes`], truncated to the first 8 bytes, lowercase hex.
pub fn compute_tag(spec: &BuildSpec) -> Result<BuildTag, PipelineError> {
    let bytes = canonical_bytes(spec)?;
    let digest = Sha256::digest(&bytes);
    BuildTag::from_digest(digest.as_slice()).map_err(|e| PipelineError::Internal(e.to_string()))
}
