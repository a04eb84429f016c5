pub mod image;
pub mod text;
pub mod url;

pub use url::{Tier, UrlPipeline, TIERS};
