//! Structured C++ types and expressions from an opaque compiler frontend.
//!
//! Compiler libraries such as libclang describe a translation unit through
//! cursors and type handles and leave many constructs "unexposed": dependent
//! types, `decltype`, array bounds behind template parameters, argument lists
//! of template instantiations. This crate rebuilds those as owned trees,
//! re-reading the frontend's spellings where the structure is not reported,
//! and records which functions call which methods.
//!
//! ## Architecture
//!
//! - [`frontend`]: the [`Frontend`](frontend::Frontend) trait and an
//!   in-memory implementation
//! - [`ast`]: the reconstructed type and expression trees
//! - [`reconstruct`]: the engine turning handles into trees
//! - [`callgraph`]: call contexts and per-function call edges
//! - [`entity`]: lazy resolution of entity ids
//!
//! ```
//! use cxxmodel::frontend::{CursorKind, SnapshotFrontend, TypeKind};
//! use cxxmodel::reconstruct::Reconstructor;
//!
//! let mut fe = SnapshotFrontend::new();
//! let tu = fe.add_cursor(CursorKind::TranslationUnit, "main.cpp", None);
//! let var = fe.add_cursor(CursorKind::VarDecl, "p", Some(tu));
//! let int = fe.add_type(TypeKind::Int, "int");
//! let ptr = fe.add_pointer(int, "int *");
//!
//! let mut reconstructor = Reconstructor::new(&fe);
//! let ty = reconstructor.build_type(var, ptr).unwrap();
//! assert!(ty.canonical().is_some());
//! ```

/// The reconstructed model.
pub mod ast;
/// Call contexts and the call graph.
pub mod callgraph;
/// Advisory diagnostics.
pub mod diagnostic;
pub mod entity;
/// Contains the error types for the crate.
pub mod error;
pub mod frontend;
pub mod options;
/// Contains the reconstruction engine.
pub mod reconstruct;

pub use error::{ReconstructError, Result};
pub use options::ReconstructOptions;
pub use reconstruct::Reconstructor;

#[cfg(test)]
mod tests;
