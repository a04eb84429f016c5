use thiserror::Error;

/// Errors that can occur during recipe import operations.
///
/// The `Display` text of each variant is meant to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The page did not answer within the fetch timeout
    #[error("The website took too long to respond. Please try again.")]
    Timeout,

    /// DNS failure, connection reset and other transport problems
    #[error("Could not reach the website: {0}")]
    Network(String),

    /// HTTP 403, usually bot protection
    #[error("This site blocked the request. Try taking a photo of the recipe and using photo import instead.")]
    Blocked,

    /// HTTP 404
    #[error("Recipe page not found. Please check the URL.")]
    NotFound,

    /// HTTP 5xx
    #[error("The website is having issues (HTTP {0}). Please try again later.")]
    ServerError(u16),

    /// Any other non-success status
    #[error("Failed to fetch the page (HTTP {0})")]
    HttpStatus(u16),

    /// Every tier ran and the content genuinely has no recipe
    #[error("Could not find a recipe on this page. Try taking a photo of the recipe and using photo import instead.")]
    NoRecipeFound,

    /// Every tier ran and at least the last one failed to parse
    #[error("Could not extract a recipe from this page ({0}). Try taking a photo of the recipe and using photo import instead.")]
    ExtractionFailed(String),

    /// A photo or caption import produced no recipe; the message is user-facing
    #[error("{0}")]
    Extraction(String),

    /// The input was not an http(s) URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The model provider could not be created or called
    #[error("AI provider error: {0}")]
    Provider(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl From<reqwest::Error> for ImportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ImportError::Timeout;
        }
        if let Some(status) = err.status() {
            return ImportError::from_status(status.as_u16());
        }
        ImportError::Network(err.to_string())
    }
}

impl ImportError {
    /// Map a non-success HTTP status to its user-facing category.
    pub fn from_status(status: u16) -> Self {
        match status {
            403 => ImportError::Blocked,
            404 => ImportError::NotFound,
            500..=599 => ImportError::ServerError(status),
            other => ImportError::HttpStatus(other),
        }
    }

    /// True for failures that happened before any extraction tier ran.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            ImportError::Timeout
                | ImportError::Network(_)
                | ImportError::Blocked
                | ImportError::NotFound
                | ImportError::ServerError(_)
                | ImportError::HttpStatus(_)
        )
    }
}
