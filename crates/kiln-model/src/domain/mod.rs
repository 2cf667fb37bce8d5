mod constants;
pub use constants::{DEFAULT_IMAGE_NAME, DEFAULT_REGISTRY, TAG_DIGEST_BYTES, TAG_HEX_LEN};

mod tag;
pub use tag::BuildTag;

mod image;
pub use image::ImageRef;
