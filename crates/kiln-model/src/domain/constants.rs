//! Common model-level constants.
//!
//! Defaults shared by the daemon configuration layer and the tests.

/// Registry address used when `REGISTRY_URL` is not configured.
pub const DEFAULT_REGISTRY: &str = "localhost:5000";

/// Repository name used when `IMAGE_NAME` is not configured.
pub const DEFAULT_IMAGE_NAME: &str = "airflow";

/// Number of leading digest bytes kept in a [`crate::BuildTag`].
pub const TAG_DIGEST_BYTES: usize = 8;

/// Length of a [`crate::BuildTag`] in hex characters.
pub const TAG_HEX_LEN: usize = TAG_DIGEST_BYTES * 2;
