//! Call-site bookkeeping.
//!
//! A [`CallContext`] describes where a call expression sits. It is a plain
//! value handed down to the expression builder, so walking into a callee
//! derives a fresh context instead of mutating the caller's.
//!
//! The [`CallGraph`] keeps, per function, the call edges found in its body in
//! source order.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::ast::MemberFunctionCall;
use crate::frontend::{Cursor, CursorKind, EntityId, Frontend};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallContext {
    pub current_function: Option<EntityId>,
    pub current_class: Option<EntityId>,
}

impl CallContext {
    /// Context of a call site inside the body of `function`.
    ///
    /// Member functions, and function templates declared in a class, see
    /// themselves and their class. Everything else gets an empty context.
    pub fn for_function<F: Frontend + ?Sized>(frontend: &F, function: Cursor) -> Self {
        let kind = frontend.cursor_kind(function);
        let class = frontend
            .semantic_parent(function)
            .filter(|parent| frontend.cursor_kind(*parent).is_record());

        let in_member_context =
            kind.is_member_function() || (kind == CursorKind::FunctionTemplate && class.is_some());
        if !in_member_context {
            return CallContext::default();
        }

        CallContext {
            current_function: Some(frontend.entity_id(function)),
            current_class: class.map(|class| frontend.entity_id(class)),
        }
    }

    /// Who the call is attributed to: the class when there is one.
    pub fn caller(&self) -> Option<&EntityId> {
        self.current_class.as_ref().or(self.current_function.as_ref())
    }

    pub fn call(&self, callee: EntityId, callee_method: EntityId) -> MemberFunctionCall {
        MemberFunctionCall {
            caller_id: self.caller().cloned(),
            caller_method_id: self.current_function.clone(),
            callee_id: callee,
            callee_method_id: callee_method,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    functions: IndexMap<EntityId, Vec<MemberFunctionCall>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `function` as visited. Returns false if it already was.
    pub fn begin(&mut self, function: EntityId) -> bool {
        match self.functions.entry(function) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Vec::new());
                true
            }
        }
    }

    pub fn record(&mut self, function: &EntityId, call: MemberFunctionCall) {
        match self.functions.get_mut(function) {
            Some(calls) => calls.push(call),
            None => {
                self.functions.insert(function.clone(), vec![call]);
            }
        }
    }

    pub fn contains(&self, function: &EntityId) -> bool {
        self.functions.contains_key(function)
    }

    /// Calls made by `function`, in source order.
    pub fn calls_from(&self, function: &EntityId) -> &[MemberFunctionCall] {
        self.functions.get(function).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every recorded call whose callee method is `method`.
    pub fn callers_of<'a>(&'a self, method: &'a EntityId) -> impl Iterator<Item = &'a MemberFunctionCall> + 'a {
        self.functions
            .values()
            .flatten()
            .filter(move |call| &call.callee_method_id == method)
    }

    /// Visited functions in the order they were first reached.
    pub fn functions(&self) -> impl Iterator<Item = &EntityId> {
        self.functions.keys()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::SnapshotFrontend;

    #[test]
    fn method_context_names_class_and_method() {
        let mut fe = SnapshotFrontend::new();
        let tu = fe.add_cursor(CursorKind::TranslationUnit, "tu.cpp", None);
        let b = fe.add_cursor(CursorKind::ClassDecl, "B", Some(tu));
        let wrap_add = fe.add_cursor(CursorKind::CxxMethod, "wrap_add", Some(b));
        let tmain = fe.add_cursor(CursorKind::FunctionDecl, "tmain", Some(tu));

        let ctx = CallContext::for_function(&fe, wrap_add);
        assert_eq!(ctx.current_function, Some(fe.entity_id(wrap_add)));
        assert_eq!(ctx.caller(), Some(&fe.entity_id(b)));

        let ctx = CallContext::for_function(&fe, tmain);
        assert_eq!(ctx, CallContext::default());
        assert_eq!(ctx.caller(), None);
    }

    #[test]
    fn begin_marks_once() {
        let mut graph = CallGraph::new();
        let f = EntityId::from("f");
        assert!(graph.begin(f.clone()));
        assert!(!graph.begin(f.clone()));
        assert!(graph.calls_from(&f).is_empty());
        assert!(graph.calls_from(&EntityId::from("g")).is_empty());
    }

    #[test]
    fn callers_of_filters_by_callee_method() {
        let mut graph = CallGraph::new();
        let f = EntityId::from("f");
        let ctx = CallContext::default();
        graph.record(&f, ctx.call(EntityId::from("A"), EntityId::from("A::add")));
        graph.record(&f, ctx.call(EntityId::from("A"), EntityId::from("A::sub")));
        graph.record(&f, ctx.call(EntityId::from("A"), EntityId::from("A::add")));

        let add = EntityId::from("A::add");
        assert_eq!(graph.callers_of(&add).count(), 2);
        assert_eq!(graph.calls_from(&f).len(), 3);
        assert_eq!(graph.functions().collect::<Vec<_>>(), vec![&f]);
    }
}
