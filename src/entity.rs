//! Entity lookup.
//!
//! Call edges and type references only carry [`EntityId`]s. Turning an id
//! back into a declaration is the job of an [`EntityRegistry`], which is
//! filled by whoever processes declarations. The reconstruction engine never
//! writes to it, and an id that was never registered simply does not resolve.

use hashbrown::HashMap;

use crate::ast::NameId;
use crate::frontend::{Cursor, CursorKind, EntityId, Frontend};

/// A registered declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub name: NameId,
    pub kind: CursorKind,
}

pub trait EntityRegistry {
    fn lookup(&self, id: &EntityId) -> Option<&Entity>;
}

/// Hash map backed registry.
#[derive(Debug, Default)]
pub struct EntityIndex {
    entities: HashMap<EntityId, Entity>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity, returning the one it replaced.
    pub fn register(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.id.clone(), entity)
    }

    pub fn register_cursor<F: Frontend + ?Sized>(&mut self, frontend: &F, cursor: Cursor) -> &Entity {
        let id = frontend.entity_id(cursor);
        let entity = Entity {
            id: id.clone(),
            name: NameId::from(frontend.cursor_spelling(cursor).as_str()),
            kind: frontend.cursor_kind(cursor),
        };
        self.entities.insert(id.clone(), entity);
        &self.entities[&id]
    }

    /// Register every declaration below `root`, `root` included.
    pub fn register_tree<F: Frontend + ?Sized>(&mut self, frontend: &F, root: Cursor) {
        let mut stack = vec![root];
        while let Some(cursor) = stack.pop() {
            let kind = frontend.cursor_kind(cursor);
            if !kind.is_expression() && kind != CursorKind::TranslationUnit {
                self.register_cursor(frontend, cursor);
            }
            stack.extend(frontend.children(cursor));
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityRegistry for EntityIndex {
    fn lookup(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::SnapshotFrontend;

    #[test]
    fn unregistered_ids_do_not_resolve() {
        let mut fe = SnapshotFrontend::new();
        let tu = fe.add_cursor(CursorKind::TranslationUnit, "tu.cpp", None);
        let a = fe.add_cursor(CursorKind::ClassDecl, "A", Some(tu));
        let b = fe.add_cursor(CursorKind::ClassDecl, "B", Some(tu));

        let mut index = EntityIndex::new();
        let entity = index.register_cursor(&fe, a);
        assert_eq!(entity.name, NameId::from("A"));

        assert!(index.lookup(&fe.entity_id(a)).is_some());
        assert!(index.lookup(&fe.entity_id(b)).is_none());
    }

    #[test]
    fn register_tree_skips_translation_unit() {
        let mut fe = SnapshotFrontend::new();
        let tu = fe.add_cursor(CursorKind::TranslationUnit, "tu.cpp", None);
        let ns = fe.add_cursor(CursorKind::Namespace, "n", Some(tu));
        fe.add_cursor(CursorKind::FunctionDecl, "f", Some(ns));

        let mut index = EntityIndex::new();
        index.register_tree(&fe, tu);
        assert_eq!(index.len(), 2);
        assert!(index.lookup(&fe.entity_id(tu)).is_none());
    }
}
