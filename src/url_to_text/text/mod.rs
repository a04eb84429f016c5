mod extractor;

pub use extractor::{TextExtractor, SUPPORTED_IMAGE_TYPES};
