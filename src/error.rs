use thiserror::Error;

use crate::source::types::ItemId;

/// Errors raised by the clustering, layout and fitting core.
#[derive(Debug, Error)]
pub enum TagmapError {
    /// Non-positive sizes or dimensions, or a pattern that does not compile.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The representative image of a cluster could not be fetched or decoded.
    #[error("thumbnail for item {item_id} unavailable: {reason}")]
    MissingThumbnail { item_id: ItemId, reason: String },

    #[error(transparent)]
    DispatchFailure(#[from] DispatchError),
}

/// A dispatch sink refused or failed to deliver a cluster's item ids.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no destination named '{0}'")]
    UnknownDestination(String),

    #[error("could not write dispatch record: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode dispatch record: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T, E = TagmapError> = std::result::Result<T, E>;
