//! Type and expression reconstruction.
//!
//! A [`Reconstructor`] turns opaque frontend handles into the trees of
//! [`crate::ast`]. It lives for one translation unit and owns the state that
//! accumulates over it: advisory diagnostics and the call graph.
//!
//! ## Layout
//!
//! - [`spelling`]: cv, tag and scope surgery on spellings
//! - [`template_args`]: splitting instantiation argument lists
//! - [`array_size`]: recovering dependent array bounds from text
//! - [`strategy`]: the ordered fallback combinator
//! - `types`, `instantiation`, `template_param`: the type builder
//! - `expression`: expressions and call edges

pub mod array_size;
pub mod spelling;
pub mod strategy;
pub mod template_args;

mod expression;
mod instantiation;
mod template_param;
mod types;

pub use expression::{raw_expression, raw_type};

use crate::callgraph::CallGraph;
use crate::diagnostic::DiagnosticEngine;
use crate::frontend::{Cursor, Frontend, TypeHandle, TypeKind};
use crate::options::ReconstructOptions;

/// Source tag attached to every diagnostic of this module.
const DIAGNOSTIC_SOURCE: &str = "reconstruct";

/// A type handle together with the cursor it was reached from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Site {
    pub cursor: Cursor,
    pub ty: TypeHandle,
}

impl Site {
    fn with_type(self, ty: TypeHandle) -> Site {
        Site { ty, ..self }
    }

    fn with_cursor(self, cursor: Cursor) -> Site {
        Site { cursor, ..self }
    }
}

pub struct Reconstructor<'f, F: Frontend + ?Sized> {
    frontend: &'f F,
    options: ReconstructOptions,
    diagnostics: DiagnosticEngine,
    call_graph: CallGraph,
}

impl<'f, F: Frontend + ?Sized> Reconstructor<'f, F> {
    pub fn new(frontend: &'f F) -> Self {
        Self::with_options(frontend, ReconstructOptions::default())
    }

    pub fn with_options(frontend: &'f F, options: ReconstructOptions) -> Self {
        Reconstructor {
            frontend,
            options,
            diagnostics: DiagnosticEngine::from_options(&options),
            call_graph: CallGraph::new(),
        }
    }

    pub fn frontend(&self) -> &'f F {
        self.frontend
    }

    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    pub fn diagnostics(&self) -> &DiagnosticEngine {
        &self.diagnostics
    }

    pub fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    pub fn into_parts(self) -> (CallGraph, DiagnosticEngine) {
        (self.call_graph, self.diagnostics)
    }

    /// Spelling of `ty` as written at `cursor`.
    ///
    /// The frontend spells a typedef declared in the same scope as the use
    /// with its full qualification; that qualification is dropped.
    pub fn type_spelling(&self, cursor: Cursor, ty: TypeHandle) -> String {
        let spelling = self.frontend.type_spelling(ty);
        if self.is_same_scope_typedef(cursor, ty) {
            spelling::strip_scope(&spelling).to_string()
        } else {
            spelling
        }
    }

    fn is_same_scope_typedef(&self, cursor: Cursor, ty: TypeHandle) -> bool {
        if self.frontend.type_kind(ty) != TypeKind::Typedef {
            return false;
        }
        match self.frontend.type_declaration(ty) {
            Some(declaration) => {
                self.frontend.semantic_parent(declaration) == self.frontend.semantic_parent(cursor)
            }
            None => false,
        }
    }
}
