use thiserror::Error;

use crate::ast::TypeClass;

/// Fatal reconstruction failures.
///
/// Each of these means the frontend data or the engine broke an invariant, so
/// the current translation unit is abandoned. Conditions the engine can work
/// around are never reported this way; they degrade to an unexposed node and
/// at most leave an advisory diagnostic behind.
#[derive(Debug, Error)]
pub enum ReconstructError {
    #[error("invalid type '{spelling}'")]
    InvalidType { spelling: String },

    #[error("function type '{spelling}' has no result type")]
    MissingResultType { spelling: String },

    #[error("function type '{spelling}' has no parameter {index}")]
    InvalidArgumentCount { spelling: String, index: usize },

    #[error("expression '{cursor}' has no type")]
    MissingCursorType { cursor: String },

    #[error("template instantiation '{spelling}' canonicalizes to a {canonical} type")]
    CanonicalKindMismatch { spelling: String, canonical: TypeClass },

    #[error("template '{template}' declares parameter '{name}' more than once")]
    AmbiguousTemplateParameter { name: String, template: String },

    #[error("multiple template template parameters named '{name}' in '{scope}'")]
    AmbiguousTemplateTemplateParameter { name: String, scope: String },

    #[error("unexpected spelling '{spelling}': {reason}")]
    MalformedSpelling { spelling: String, reason: &'static str },

    #[error("canonical type already set")]
    CanonicalAlreadySet,
}

pub type Result<T, E = ReconstructError> = std::result::Result<T, E>;
