use crate::ast::{Expr, MemberFunctionCall, TokenString, Type};
use crate::callgraph::CallContext;
use crate::error::{ReconstructError, Result};
use crate::frontend::{Cursor, CursorKind, Frontend};
use crate::reconstruct::{DIAGNOSTIC_SOURCE, Reconstructor};

/// Unexposed expression over a token range, without its trailing `;`.
pub fn raw_expression(tokens: TokenString, ty: Type) -> Option<Expr> {
    if tokens.is_empty() {
        return None;
    }
    Some(Expr::unexposed(ty, tokens.without_trailing(";")))
}

/// Unexposed type spelled by a token range.
pub fn raw_type(tokens: &TokenString) -> Type {
    Type::unexposed(tokens.to_string())
}

impl<'f, F: Frontend + ?Sized> Reconstructor<'f, F> {
    /// Reconstruct the expression at `cursor`.
    ///
    /// Call-like expressions become call edges attributed to `context`.
    /// Returns `None` for calls that cannot be resolved and for calls written
    /// without parentheses, which are default constructions.
    pub fn build_expression(&mut self, context: &CallContext, cursor: Cursor) -> Result<Option<Expr>> {
        let kind = self.frontend.cursor_kind(cursor);
        let Some(ty) = self.frontend.cursor_type(cursor) else {
            return Err(ReconstructError::MissingCursorType {
                cursor: self.frontend.cursor_spelling(cursor),
            });
        };
        let ty = self.build_type(cursor, ty)?;
        let tokens = TokenString::from_tokens(self.frontend.tokens(cursor));

        if kind.is_call_like() {
            if tokens.last() != Some(")") {
                return Ok(None);
            }
            return Ok(self
                .build_call(context, cursor)?
                .map(|call| Expr::member_function_call(ty, call)));
        }

        if kind.is_literal() {
            Ok(Some(Expr::literal(ty, tokens.to_string())))
        } else {
            Ok(Some(Expr::unexposed(ty, tokens)))
        }
    }

    fn build_call(&mut self, context: &CallContext, cursor: Cursor) -> Result<Option<MemberFunctionCall>> {
        let referenced = self.frontend.referenced(cursor);
        let referenced_kind = referenced.map(|referenced| self.frontend.cursor_kind(referenced));

        let call = match (referenced, referenced_kind) {
            (Some(method), Some(CursorKind::CxxMethod)) => self.frontend.semantic_parent(method).map(|class| {
                context.call(self.frontend.entity_id(class), self.frontend.entity_id(method))
            }),
            (Some(function), Some(CursorKind::FunctionDecl)) => {
                if self.options.follow_callees {
                    self.collect_function_calls(function)?;
                }
                let id = self.frontend.entity_id(function);
                Some(context.call(id.clone(), id))
            }
            (Some(template), Some(CursorKind::FunctionTemplate)) => {
                self.primary_pattern(template).map(|pattern| {
                    let id = self.frontend.entity_id(pattern);
                    context.call(id.clone(), id)
                })
            }
            _ => None,
        };

        if call.is_none() {
            let message = format!(
                "cannot parse call expression: '{}'",
                self.frontend.cursor_kind(cursor)
            );
            let location = self.frontend.location(cursor);
            self.diagnostics.report_debug(DIAGNOSTIC_SOURCE, message, location);
        }
        Ok(call)
    }

    /// First function declaration below a function template.
    fn primary_pattern(&self, template: Cursor) -> Option<Cursor> {
        let mut stack: Vec<Cursor> = self.frontend.children(template).into_iter().rev().collect();
        while let Some(cursor) = stack.pop() {
            if self.frontend.cursor_kind(cursor) == CursorKind::FunctionDecl {
                return Some(cursor);
            }
            stack.extend(self.frontend.children(cursor).into_iter().rev());
        }
        None
    }

    /// Record the call edges in the body of `function`.
    ///
    /// A function is only walked once; later requests, including recursive
    /// ones reached through its own callees, return what was recorded.
    pub fn collect_function_calls(&mut self, function: Cursor) -> Result<&[MemberFunctionCall]> {
        let id = self.frontend.entity_id(function);
        if self.call_graph.begin(id.clone()) {
            log::debug!("collecting calls of '{}'", self.frontend.cursor_spelling(function));
            let context = CallContext::for_function(self.frontend, function);

            let mut stack: Vec<Cursor> = self.frontend.children(function).into_iter().rev().collect();
            while let Some(cursor) = stack.pop() {
                if self.frontend.cursor_kind(cursor) == CursorKind::CallExpr
                    && let Some(expr) = self.build_expression(&context, cursor)?
                    && let Some(call) = expr.as_call()
                {
                    self.call_graph.record(&id, call.clone());
                }
                stack.extend(self.frontend.children(cursor).into_iter().rev());
            }
        }
        Ok(self.call_graph.calls_from(&id))
    }
}
