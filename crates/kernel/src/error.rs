//! Serializer error types.

use thiserror::Error;

use crate::content::filter_spec::FilterSpecError;
use crate::services::rendition::RenditionError;

/// Errors that abort serialization of a whole document.
///
/// Missing fields, dangling references and unknown variants are not errors;
/// they degrade to defaults. Only collaborator failures end up here.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("rendition failed")]
    Rendition(#[from] RenditionError),

    #[error("invalid filter spec")]
    FilterSpec(#[from] FilterSpecError),

    #[error("failed to encode block value")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using SerializeError.
pub type SerializeResult<T> = Result<T, SerializeError>;
