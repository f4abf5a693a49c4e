//! Frontend abstraction.
//!
//! The reconstruction engine never talks to a compiler library directly. All of
//! the structure it needs (kinds, spellings, parents, referenced declarations,
//! tokens) is read through the [`Frontend`] trait, which hands out small opaque
//! handles instead of live library objects.
//!
//! - [`Cursor`] names a declaration, statement or expression.
//! - [`TypeHandle`] names a type as the frontend sees it.
//! - [`EntityId`] is the stable identity of a declaration inside one
//!   translation unit and is the key for every weak cross reference.
//!
//! Absence is always `None`; there are no sentinel "invalid" handles.

pub mod snapshot;

pub use snapshot::SnapshotFrontend;

use std::fmt::{self, Display};
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Opaque reference to a frontend cursor.
/// Internally index + 1 (NonZeroU32 for niche optimization).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(NonZeroU32);

impl Cursor {
    #[inline]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(Cursor)
    }

    #[inline]
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({})", self.get())
    }
}

/// Opaque reference to a frontend type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHandle(NonZeroU32);

impl TypeHandle {
    #[inline]
    pub fn new(n: u32) -> Option<Self> {
        NonZeroU32::new(n).map(TypeHandle)
    }

    #[inline]
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.get())
    }
}

/// Stable identity of a declaration within a translation unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        EntityId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId::new(id)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presumed source position of a cursor, used for diagnostics only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Coarse cursor kind reported by the frontend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorKind {
    TranslationUnit,
    Namespace,

    // declarations
    ClassDecl,
    StructDecl,
    UnionDecl,
    EnumDecl,
    ClassTemplate,
    ClassTemplatePartialSpecialization,
    TypeAliasTemplateDecl,
    FunctionTemplate,
    FunctionDecl,
    CxxMethod,
    Constructor,
    Destructor,
    ConversionFunction,
    TemplateTypeParameter,
    NonTypeTemplateParameter,
    TemplateTemplateParameter,
    TypedefDecl,
    TypeAliasDecl,
    VarDecl,
    FieldDecl,
    ParmDecl,

    // statements
    CompoundStmt,
    DeclStmt,
    ReturnStmt,

    // expressions
    CallExpr,
    DeclRefExpr,
    MemberRefExpr,
    OverloadedDeclRef,
    CharacterLiteral,
    CompoundLiteralExpr,
    FloatingLiteral,
    ImaginaryLiteral,
    IntegerLiteral,
    StringLiteral,
    CxxBoolLiteralExpr,
    CxxNullPtrLiteralExpr,
    UnaryOperator,
    BinaryOperator,
    UnexposedExpr,

    Other,
}

impl CursorKind {
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            CursorKind::CallExpr
                | CursorKind::DeclRefExpr
                | CursorKind::MemberRefExpr
                | CursorKind::UnaryOperator
                | CursorKind::BinaryOperator
                | CursorKind::UnexposedExpr
        ) || self.is_literal()
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            CursorKind::CharacterLiteral
                | CursorKind::CompoundLiteralExpr
                | CursorKind::FloatingLiteral
                | CursorKind::ImaginaryLiteral
                | CursorKind::IntegerLiteral
                | CursorKind::StringLiteral
                | CursorKind::CxxBoolLiteralExpr
                | CursorKind::CxxNullPtrLiteralExpr
        )
    }

    /// Kinds that may name a call target.
    pub fn is_call_like(self) -> bool {
        matches!(
            self,
            CursorKind::CallExpr | CursorKind::DeclRefExpr | CursorKind::OverloadedDeclRef
        )
    }

    /// Declarations that own a template parameter list themselves.
    pub fn is_directly_templated(self) -> bool {
        // TODO: variable templates once the frontend reports them
        matches!(
            self,
            CursorKind::TypeAliasTemplateDecl
                | CursorKind::ClassTemplate
                | CursorKind::ClassTemplatePartialSpecialization
                | CursorKind::FunctionTemplate
        )
    }

    pub fn is_scope_boundary(self) -> bool {
        matches!(self, CursorKind::Namespace | CursorKind::TranslationUnit)
    }

    pub fn is_record(self) -> bool {
        matches!(
            self,
            CursorKind::ClassDecl
                | CursorKind::StructDecl
                | CursorKind::UnionDecl
                | CursorKind::ClassTemplate
                | CursorKind::ClassTemplatePartialSpecialization
        )
    }

    pub fn is_member_function(self) -> bool {
        matches!(
            self,
            CursorKind::CxxMethod
                | CursorKind::Constructor
                | CursorKind::Destructor
                | CursorKind::ConversionFunction
        )
    }
}

impl Display for CursorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Coarse type kind reported by the frontend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Invalid,
    Unexposed,
    Dependent,
    Complex,

    Void,
    Bool,
    UChar,
    UShort,
    UInt,
    ULong,
    ULongLong,
    UInt128,
    CharU,
    CharS,
    SChar,
    Short,
    Int,
    Long,
    LongLong,
    Int128,
    Float,
    Double,
    LongDouble,
    Float128,
    WChar,
    Char16,
    Char32,
    NullPtr,

    Elaborated,
    Record,
    Enum,
    Typedef,

    Pointer,
    LValueReference,
    RValueReference,
    IncompleteArray,
    VariableArray,
    DependentSizedArray,
    ConstantArray,
    FunctionNoProto,
    FunctionProto,
    MemberPointer,
    Auto,

    // reported by the frontend, not modelled by the engine
    Vector,
    BlockPointer,
    Atomic,
    Attributed,
    ObjCObjectPointer,
}

impl TypeKind {
    pub fn is_array(self) -> bool {
        matches!(
            self,
            TypeKind::IncompleteArray
                | TypeKind::VariableArray
                | TypeKind::DependentSizedArray
                | TypeKind::ConstantArray
        )
    }
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Read-only view of the external semantic analysis frontend.
///
/// Handles are only meaningful for the frontend that produced them and only
/// for the duration of one reconstruction run.
pub trait Frontend {
    // ---- types ----
    fn type_kind(&self, ty: TypeHandle) -> TypeKind;
    fn type_spelling(&self, ty: TypeHandle) -> String;
    /// Fully desugared form. A type that is already canonical returns itself.
    fn canonical_type(&self, ty: TypeHandle) -> TypeHandle;
    fn pointee_type(&self, ty: TypeHandle) -> Option<TypeHandle>;
    fn element_type(&self, ty: TypeHandle) -> Option<TypeHandle>;
    fn result_type(&self, ty: TypeHandle) -> Option<TypeHandle>;
    /// `None` when the type is not a function type.
    fn num_arg_types(&self, ty: TypeHandle) -> Option<usize>;
    fn arg_type(&self, ty: TypeHandle, index: usize) -> Option<TypeHandle>;
    fn is_function_variadic(&self, ty: TypeHandle) -> bool;
    /// Constant array extent, `None` for incomplete or dependent bounds.
    fn array_size(&self, ty: TypeHandle) -> Option<u64>;
    /// Class of a member pointer.
    fn class_type(&self, ty: TypeHandle) -> Option<TypeHandle>;
    fn type_declaration(&self, ty: TypeHandle) -> Option<Cursor>;
    /// `None` when the type is not a template specialization.
    fn num_template_arguments(&self, ty: TypeHandle) -> Option<usize>;
    /// `None` for non-type arguments.
    fn template_argument_type(&self, ty: TypeHandle, index: usize) -> Option<TypeHandle>;

    // ---- cursors ----
    fn cursor_kind(&self, cursor: Cursor) -> CursorKind;
    fn cursor_spelling(&self, cursor: Cursor) -> String;
    fn cursor_type(&self, cursor: Cursor) -> Option<TypeHandle>;
    fn semantic_parent(&self, cursor: Cursor) -> Option<Cursor>;
    fn referenced(&self, cursor: Cursor) -> Option<Cursor>;
    /// Primary template of a specialization.
    fn specialized_template(&self, cursor: Cursor) -> Option<Cursor>;
    /// Direct children in source order.
    fn children(&self, cursor: Cursor) -> Vec<Cursor>;
    /// Token spellings covering the cursor's extent.
    fn tokens(&self, cursor: Cursor) -> Vec<String>;
    fn entity_id(&self, cursor: Cursor) -> EntityId;
    fn location(&self, cursor: Cursor) -> Option<SourceLocation>;

    /// Nearest directly templated declaration, starting with `cursor` itself
    /// and stopping at the first namespace or translation unit.
    fn enclosing_template(&self, cursor: Cursor) -> Option<Cursor> {
        let mut current = cursor;
        loop {
            if self.cursor_kind(current).is_directly_templated() {
                return Some(current);
            }
            match self.semantic_parent(current) {
                Some(parent) if !self.cursor_kind(parent).is_scope_boundary() => current = parent,
                _ => return None,
            }
        }
    }
}
