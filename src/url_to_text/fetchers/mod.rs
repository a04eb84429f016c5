mod request;

pub use request::{RequestFetcher, BROWSER_USER_AGENT};
