//! In-memory frontend.
//!
//! A `SnapshotFrontend` is a flat table of cursors and types, the same shape a
//! recorded frontend dump has. It implements [`Frontend`] by plain indexing and
//! can be serialized, so a translation unit captured once can be replayed
//! without the compiler library that produced it.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{Cursor, CursorKind, EntityId, Frontend, SourceLocation, TypeHandle, TypeKind};

/// Recorded state of a single cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorData {
    pub kind: CursorKind,
    pub spelling: String,
    pub entity_id: EntityId,
    pub ty: Option<TypeHandle>,
    pub semantic_parent: Option<Cursor>,
    pub referenced: Option<Cursor>,
    pub specialized_template: Option<Cursor>,
    pub children: Vec<Cursor>,
    pub tokens: Vec<String>,
    pub location: Option<SourceLocation>,
}

/// Recorded state of a single type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeData {
    pub kind: TypeKind,
    pub spelling: String,
    /// `None` means the type is its own canonical form.
    pub canonical: Option<TypeHandle>,
    pub pointee: Option<TypeHandle>,
    pub element: Option<TypeHandle>,
    pub result: Option<TypeHandle>,
    /// `None` for non-function types.
    pub args: Option<Vec<TypeHandle>>,
    pub is_variadic: bool,
    pub array_size: Option<u64>,
    pub class_type: Option<TypeHandle>,
    pub declaration: Option<Cursor>,
    /// `None` for non-specializations; `None` entries are non-type arguments.
    pub template_arguments: Option<Vec<Option<TypeHandle>>>,
}

impl TypeData {
    fn new(kind: TypeKind, spelling: &str) -> Self {
        TypeData {
            kind,
            spelling: spelling.to_string(),
            canonical: None,
            pointee: None,
            element: None,
            result: None,
            args: None,
            is_variadic: false,
            array_size: None,
            class_type: None,
            declaration: None,
            template_arguments: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFrontend {
    cursors: Vec<CursorData>,
    types: Vec<TypeData>,
}

impl SnapshotFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_count(&self) -> usize {
        self.cursors.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    // ============================================================
    // Cursor construction
    // ============================================================

    /// Allocate a cursor and attach it as the last child of `parent`.
    pub fn add_cursor(&mut self, kind: CursorKind, spelling: &str, parent: Option<Cursor>) -> Cursor {
        let cursor = Cursor(NonZeroU32::MIN.saturating_add(self.cursors.len() as u32));
        let n = cursor.get();
        self.cursors.push(CursorData {
            kind,
            spelling: spelling.to_string(),
            entity_id: EntityId::new(format!("c:@{}#{}", spelling, n)),
            ty: None,
            semantic_parent: parent,
            referenced: None,
            specialized_template: None,
            children: Vec::new(),
            tokens: Vec::new(),
            location: None,
        });
        if let Some(parent) = parent {
            self.cursors[parent.index()].children.push(cursor);
        }
        cursor
    }

    pub fn cursor_data(&self, cursor: Cursor) -> &CursorData {
        &self.cursors[cursor.index()]
    }

    pub fn cursor_data_mut(&mut self, cursor: Cursor) -> &mut CursorData {
        &mut self.cursors[cursor.index()]
    }

    pub fn set_cursor_type(&mut self, cursor: Cursor, ty: TypeHandle) {
        self.cursor_data_mut(cursor).ty = Some(ty);
    }

    pub fn set_referenced(&mut self, cursor: Cursor, referenced: Cursor) {
        self.cursor_data_mut(cursor).referenced = Some(referenced);
    }

    pub fn set_specialized_template(&mut self, cursor: Cursor, template: Cursor) {
        self.cursor_data_mut(cursor).specialized_template = Some(template);
    }

    pub fn set_tokens(&mut self, cursor: Cursor, tokens: &[&str]) {
        self.cursor_data_mut(cursor).tokens = tokens.iter().map(|t| t.to_string()).collect();
    }

    // ============================================================
    // Type construction
    // ============================================================

    pub fn add_type(&mut self, kind: TypeKind, spelling: &str) -> TypeHandle {
        let ty = TypeHandle(NonZeroU32::MIN.saturating_add(self.types.len() as u32));
        self.types.push(TypeData::new(kind, spelling));
        ty
    }

    pub fn type_data(&self, ty: TypeHandle) -> &TypeData {
        &self.types[ty.index()]
    }

    pub fn type_data_mut(&mut self, ty: TypeHandle) -> &mut TypeData {
        &mut self.types[ty.index()]
    }

    pub fn add_pointer(&mut self, pointee: TypeHandle, spelling: &str) -> TypeHandle {
        let ty = self.add_type(TypeKind::Pointer, spelling);
        self.type_data_mut(ty).pointee = Some(pointee);
        ty
    }

    pub fn add_reference(&mut self, referee: TypeHandle, is_rvalue: bool, spelling: &str) -> TypeHandle {
        let kind = if is_rvalue {
            TypeKind::RValueReference
        } else {
            TypeKind::LValueReference
        };
        let ty = self.add_type(kind, spelling);
        self.type_data_mut(ty).pointee = Some(referee);
        ty
    }

    pub fn add_array(
        &mut self,
        kind: TypeKind,
        element: TypeHandle,
        size: Option<u64>,
        spelling: &str,
    ) -> TypeHandle {
        let ty = self.add_type(kind, spelling);
        let data = self.type_data_mut(ty);
        data.element = Some(element);
        data.array_size = size;
        ty
    }

    pub fn add_function(
        &mut self,
        result: TypeHandle,
        args: &[TypeHandle],
        is_variadic: bool,
        spelling: &str,
    ) -> TypeHandle {
        let ty = self.add_type(TypeKind::FunctionProto, spelling);
        let data = self.type_data_mut(ty);
        data.result = Some(result);
        data.args = Some(args.to_vec());
        data.is_variadic = is_variadic;
        ty
    }

    pub fn set_canonical(&mut self, ty: TypeHandle, canonical: TypeHandle) {
        self.type_data_mut(ty).canonical = Some(canonical);
    }

    pub fn set_declaration(&mut self, ty: TypeHandle, declaration: Cursor) {
        self.type_data_mut(ty).declaration = Some(declaration);
    }

    pub fn set_template_arguments(&mut self, ty: TypeHandle, arguments: &[Option<TypeHandle>]) {
        self.type_data_mut(ty).template_arguments = Some(arguments.to_vec());
    }
}

impl Frontend for SnapshotFrontend {
    fn type_kind(&self, ty: TypeHandle) -> TypeKind {
        self.type_data(ty).kind
    }

    fn type_spelling(&self, ty: TypeHandle) -> String {
        self.type_data(ty).spelling.clone()
    }

    fn canonical_type(&self, ty: TypeHandle) -> TypeHandle {
        self.type_data(ty).canonical.unwrap_or(ty)
    }

    fn pointee_type(&self, ty: TypeHandle) -> Option<TypeHandle> {
        self.type_data(ty).pointee
    }

    fn element_type(&self, ty: TypeHandle) -> Option<TypeHandle> {
        self.type_data(ty).element
    }

    fn result_type(&self, ty: TypeHandle) -> Option<TypeHandle> {
        self.type_data(ty).result
    }

    fn num_arg_types(&self, ty: TypeHandle) -> Option<usize> {
        self.type_data(ty).args.as_ref().map(Vec::len)
    }

    fn arg_type(&self, ty: TypeHandle, index: usize) -> Option<TypeHandle> {
        self.type_data(ty).args.as_ref().and_then(|args| args.get(index).copied())
    }

    fn is_function_variadic(&self, ty: TypeHandle) -> bool {
        self.type_data(ty).is_variadic
    }

    fn array_size(&self, ty: TypeHandle) -> Option<u64> {
        self.type_data(ty).array_size
    }

    fn class_type(&self, ty: TypeHandle) -> Option<TypeHandle> {
        self.type_data(ty).class_type
    }

    fn type_declaration(&self, ty: TypeHandle) -> Option<Cursor> {
        self.type_data(ty).declaration
    }

    fn num_template_arguments(&self, ty: TypeHandle) -> Option<usize> {
        self.type_data(ty).template_arguments.as_ref().map(Vec::len)
    }

    fn template_argument_type(&self, ty: TypeHandle, index: usize) -> Option<TypeHandle> {
        self.type_data(ty)
            .template_arguments
            .as_ref()
            .and_then(|args| args.get(index).copied().flatten())
    }

    fn cursor_kind(&self, cursor: Cursor) -> CursorKind {
        self.cursor_data(cursor).kind
    }

    fn cursor_spelling(&self, cursor: Cursor) -> String {
        self.cursor_data(cursor).spelling.clone()
    }

    fn cursor_type(&self, cursor: Cursor) -> Option<TypeHandle> {
        self.cursor_data(cursor).ty
    }

    fn semantic_parent(&self, cursor: Cursor) -> Option<Cursor> {
        self.cursor_data(cursor).semantic_parent
    }

    fn referenced(&self, cursor: Cursor) -> Option<Cursor> {
        self.cursor_data(cursor).referenced
    }

    fn specialized_template(&self, cursor: Cursor) -> Option<Cursor> {
        self.cursor_data(cursor).specialized_template
    }

    fn children(&self, cursor: Cursor) -> Vec<Cursor> {
        self.cursor_data(cursor).children.clone()
    }

    fn tokens(&self, cursor: Cursor) -> Vec<String> {
        self.cursor_data(cursor).tokens.clone()
    }

    fn entity_id(&self, cursor: Cursor) -> EntityId {
        self.cursor_data(cursor).entity_id.clone()
    }

    fn location(&self, cursor: Cursor) -> Option<SourceLocation> {
        self.cursor_data(cursor).location.clone()
    }
}
