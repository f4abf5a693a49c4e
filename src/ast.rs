//! Reconstructed C++ model.
//!
//! The trees in this module are what the reconstruction engine hands back to
//! its callers. They own their children outright; the only links between
//! trees are [`EntityId`](crate::frontend::EntityId) based weak references
//! that are resolved lazily against an [`EntityRegistry`](crate::entity::EntityRegistry).
//!
//! - [`types`]: the type tree, its qualifiers and template arguments
//! - [`expr`]: literal, unexposed and call-edge expressions
//! - [`token`]: token sequences for text the engine could not structure

pub mod expr;
pub mod token;
pub mod types;

/// Represents an interned string using symbol_table crate.
pub type NameId = symbol_table::GlobalSymbol;

pub use expr::{Expr, ExprKind, MemberFunctionCall};
pub use token::TokenString;
pub use types::{
    BuiltinKind, CvQualifiers, TemplateArgument, TemplateArguments, Type, TypeClass, TypeKind, TypeRef,
};
