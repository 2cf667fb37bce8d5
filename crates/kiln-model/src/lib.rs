mod domain;
pub use domain::{BuildTag, ImageRef};
pub use domain::{DEFAULT_IMAGE_NAME, DEFAULT_REGISTRY, TAG_DIGEST_BYTES, TAG_HEX_LEN};

mod error;
pub use error::{ModelError, ModelResult};

mod spec;
pub use spec::BuildSpec;
