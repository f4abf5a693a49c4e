//! Expression nodes.

use serde::Serialize;

use crate::ast::{TokenString, Type};
use crate::entity::{Entity, EntityRegistry};
use crate::frontend::EntityId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub ty: Type,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// Literal with its exact source text.
    Literal { value: String },
    Unexposed { tokens: TokenString },
    MemberFunctionCall(MemberFunctionCall),
}

impl Expr {
    pub fn literal(ty: Type, value: impl Into<String>) -> Self {
        Expr {
            ty,
            kind: ExprKind::Literal { value: value.into() },
        }
    }

    pub fn unexposed(ty: Type, tokens: TokenString) -> Self {
        Expr {
            ty,
            kind: ExprKind::Unexposed { tokens },
        }
    }

    pub fn member_function_call(ty: Type, call: MemberFunctionCall) -> Self {
        Expr {
            ty,
            kind: ExprKind::MemberFunctionCall(call),
        }
    }

    pub fn as_call(&self) -> Option<&MemberFunctionCall> {
        match &self.kind {
            ExprKind::MemberFunctionCall(call) => Some(call),
            _ => None,
        }
    }
}

/// One call site: who calls what.
///
/// All four ends are weak references. `caller_id` and `caller_method_id` are
/// absent when the call does not sit inside a member function context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MemberFunctionCall {
    pub caller_id: Option<EntityId>,
    pub caller_method_id: Option<EntityId>,
    pub callee_id: EntityId,
    pub callee_method_id: EntityId,
}

impl MemberFunctionCall {
    pub fn caller<'r, R: EntityRegistry + ?Sized>(&self, registry: &'r R) -> Option<&'r Entity> {
        self.caller_id.as_ref().and_then(|id| registry.lookup(id))
    }

    pub fn caller_method<'r, R: EntityRegistry + ?Sized>(&self, registry: &'r R) -> Option<&'r Entity> {
        self.caller_method_id.as_ref().and_then(|id| registry.lookup(id))
    }

    pub fn callee<'r, R: EntityRegistry + ?Sized>(&self, registry: &'r R) -> Option<&'r Entity> {
        registry.lookup(&self.callee_id)
    }

    pub fn callee_method<'r, R: EntityRegistry + ?Sized>(&self, registry: &'r R) -> Option<&'r Entity> {
        registry.lookup(&self.callee_method_id)
    }
}
