/*!
 * Error types for the catnav crate.
 *
 * Only catalog loading can fail in a way callers see. Resolution errors are
 * internal: the parent resolver converts them into the home route.
 */

use thiserror::Error;

/// Errors that can occur while loading or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog document could not be parsed
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog file could not be read
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// A service or child entry has no usable slug
    #[error("Entry {id} has an empty slug and no image to derive one from")]
    EmptySlug {
        /// Identifier of the offending entry
        id: u32,
    },

    /// Two services share the same slug
    #[error("Duplicate service slug: {0}")]
    DuplicateServiceSlug(String),

    /// Two child entries share the same slug
    #[error("Duplicate child slug: {0}")]
    DuplicateChildSlug(String),

    /// An entity has no non-empty title in any locale
    #[error("Entry '{0}' has no title in any locale")]
    MissingTitle(String),
}

/// Errors raised inside the parent resolver
///
/// These never reach callers of `resolve_parent`.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A path segment is not valid percent-encoded UTF-8
    #[error("Malformed path segment: {0}")]
    MalformedSegment(String),

    /// A deep link did not carry a slug
    #[error("Missing slug for route: {0}")]
    MissingSlug(String),

    /// The slug does not match any catalog entry
    #[error("No catalog entry matches slug: {0}")]
    NoMatch(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from catalog loading
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
