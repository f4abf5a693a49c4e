//! Type tree representation.
//!
//! A [`Type`] is an owned tree. Every node may additionally carry its
//! canonical (fully desugared) form, which is computed at most once and then
//! cached in the node itself.

use std::cell::OnceCell;
use std::fmt::{self, Display};

use bitflags::bitflags;
use serde::{Serialize, Serializer};
use thin_vec::ThinVec;

use crate::ast::Expr;
use crate::error::{ReconstructError, Result};
use crate::frontend::EntityId;

/// Fundamental types, one per keyword spelling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinKind {
    Void,
    Bool,
    UChar,
    UShort,
    UInt,
    ULong,
    ULongLong,
    UInt128,
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
    Char,
    WChar,
    Char16,
    Char32,
    NullPtr,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 23] = [
        BuiltinKind::Void,
        BuiltinKind::Bool,
        BuiltinKind::UChar,
        BuiltinKind::UShort,
        BuiltinKind::UInt,
        BuiltinKind::ULong,
        BuiltinKind::ULongLong,
        BuiltinKind::UInt128,
        BuiltinKind::SChar,
        BuiltinKind::Short,
        BuiltinKind::Int,
        BuiltinKind::Long,
        BuiltinKind::LongLong,
        BuiltinKind::Int128,
        BuiltinKind::Float,
        BuiltinKind::Double,
        BuiltinKind::LongDouble,
        BuiltinKind::Float128,
        BuiltinKind::Char,
        BuiltinKind::WChar,
        BuiltinKind::Char16,
        BuiltinKind::Char32,
        BuiltinKind::NullPtr,
    ];

    /// Keyword spelling of the type.
    pub fn spelling(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::UChar => "unsigned char",
            BuiltinKind::UShort => "unsigned short",
            BuiltinKind::UInt => "unsigned int",
            BuiltinKind::ULong => "unsigned long",
            BuiltinKind::ULongLong => "unsigned long long",
            BuiltinKind::UInt128 => "unsigned __int128",
            BuiltinKind::SChar => "signed char",
            BuiltinKind::Short => "short",
            BuiltinKind::Int => "int",
            BuiltinKind::Long => "long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::Int128 => "__int128",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::LongDouble => "long double",
            BuiltinKind::Float128 => "__float128",
            BuiltinKind::Char => "char",
            BuiltinKind::WChar => "wchar_t",
            BuiltinKind::Char16 => "char16_t",
            BuiltinKind::Char32 => "char32_t",
            BuiltinKind::NullPtr => "std::nullptr_t",
        }
    }
}

impl Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

bitflags! {
    /// cv-qualifiers of a type
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default)]
    pub struct CvQualifiers: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
    }
}

impl CvQualifiers {
    /// Combine qualifiers found in two places of one spelling.
    pub fn merge(self, other: CvQualifiers) -> CvQualifiers {
        self | other
    }

    pub fn is_const(self) -> bool {
        self.contains(CvQualifiers::CONST)
    }

    pub fn is_volatile(self) -> bool {
        self.contains(CvQualifiers::VOLATILE)
    }
}

/// Weak reference to a declaration, resolved lazily by entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    pub id: EntityId,
    pub name: String,
}

impl TypeRef {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        TypeRef { id, name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TemplateArgument {
    Type(Type),
    Expr(Expr),
}

/// Arguments of a template instantiation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TemplateArguments {
    /// One entry per argument found in the spelling.
    Exposed(ThinVec<TemplateArgument>),
    /// Raw bracket content; the frontend could not enumerate the arguments.
    Unexposed(String),
}

impl TemplateArguments {
    pub fn arguments_exposed(&self) -> bool {
        matches!(self, TemplateArguments::Exposed(_))
    }

    pub fn exposed(&self) -> Option<&[TemplateArgument]> {
        match self {
            TemplateArguments::Exposed(arguments) => Some(arguments),
            TemplateArguments::Unexposed(_) => None,
        }
    }
}

/// The variants of a type node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeKind {
    Builtin(BuiltinKind),
    Pointer {
        pointee: Box<Type>,
    },
    Reference {
        referee: Box<Type>,
        is_rvalue: bool,
    },
    CvQualified {
        inner: Box<Type>,
        cv: CvQualifiers,
    },
    Array {
        element: Box<Type>,
        size: Option<Box<Expr>>,
    },
    Function {
        result: Box<Type>,
        parameters: ThinVec<Type>,
        is_variadic: bool,
    },
    MemberObject {
        class_type: Box<Type>,
        value_type: Box<Type>,
    },
    /// `class_type` carries the cv and ref qualifiers of the member function.
    MemberFunction {
        class_type: Box<Type>,
        result: Box<Type>,
        parameters: ThinVec<Type>,
        is_variadic: bool,
    },
    TemplateParameter(TypeRef),
    TemplateInstantiation {
        template: TypeRef,
        arguments: TemplateArguments,
    },
    UserDefined(TypeRef),
    Decltype {
        operand: Box<Expr>,
    },
    Auto,
    Unexposed {
        spelling: String,
    },
}

/// Variant tag of a [`TypeKind`], used to compare declared and canonical forms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeClass {
    Builtin,
    Pointer,
    Reference,
    CvQualified,
    Array,
    Function,
    MemberObject,
    MemberFunction,
    TemplateParameter,
    TemplateInstantiation,
    UserDefined,
    Decltype,
    Auto,
    Unexposed,
}

impl Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeClass::Builtin => "builtin",
            TypeClass::Pointer => "pointer",
            TypeClass::Reference => "reference",
            TypeClass::CvQualified => "cv-qualified",
            TypeClass::Array => "array",
            TypeClass::Function => "function",
            TypeClass::MemberObject => "member object",
            TypeClass::MemberFunction => "member function",
            TypeClass::TemplateParameter => "template parameter",
            TypeClass::TemplateInstantiation => "template instantiation",
            TypeClass::UserDefined => "user-defined",
            TypeClass::Decltype => "decltype",
            TypeClass::Auto => "auto",
            TypeClass::Unexposed => "unexposed",
        };
        f.write_str(name)
    }
}

/// A node of the type tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: TypeKind,
    canonical: OnceCell<Box<Type>>,
}

impl Type {
    pub fn new(kind: TypeKind) -> Self {
        Type {
            kind,
            canonical: OnceCell::new(),
        }
    }

    pub fn builtin(kind: BuiltinKind) -> Self {
        Type::new(TypeKind::Builtin(kind))
    }

    pub fn pointer(pointee: Type) -> Self {
        Type::new(TypeKind::Pointer {
            pointee: Box::new(pointee),
        })
    }

    pub fn reference(referee: Type, is_rvalue: bool) -> Self {
        Type::new(TypeKind::Reference {
            referee: Box::new(referee),
            is_rvalue,
        })
    }

    /// Wrap `inner` unless `cv` is empty.
    pub fn cv_qualified(inner: Type, cv: CvQualifiers) -> Self {
        if cv.is_empty() {
            return inner;
        }
        Type::new(TypeKind::CvQualified {
            inner: Box::new(inner),
            cv,
        })
    }

    pub fn array(element: Type, size: Option<Expr>) -> Self {
        Type::new(TypeKind::Array {
            element: Box::new(element),
            size: size.map(Box::new),
        })
    }

    pub fn function(result: Type, parameters: ThinVec<Type>, is_variadic: bool) -> Self {
        Type::new(TypeKind::Function {
            result: Box::new(result),
            parameters,
            is_variadic,
        })
    }

    pub fn member_object(class_type: Type, value_type: Type) -> Self {
        Type::new(TypeKind::MemberObject {
            class_type: Box::new(class_type),
            value_type: Box::new(value_type),
        })
    }

    pub fn member_function(class_type: Type, result: Type, parameters: ThinVec<Type>, is_variadic: bool) -> Self {
        Type::new(TypeKind::MemberFunction {
            class_type: Box::new(class_type),
            result: Box::new(result),
            parameters,
            is_variadic,
        })
    }

    pub fn template_parameter(parameter: TypeRef) -> Self {
        Type::new(TypeKind::TemplateParameter(parameter))
    }

    pub fn template_instantiation(template: TypeRef, arguments: TemplateArguments) -> Self {
        Type::new(TypeKind::TemplateInstantiation { template, arguments })
    }

    pub fn user_defined(declaration: TypeRef) -> Self {
        Type::new(TypeKind::UserDefined(declaration))
    }

    pub fn decltype(operand: Expr) -> Self {
        Type::new(TypeKind::Decltype {
            operand: Box::new(operand),
        })
    }

    pub fn auto() -> Self {
        Type::new(TypeKind::Auto)
    }

    pub fn unexposed(spelling: impl Into<String>) -> Self {
        Type::new(TypeKind::Unexposed {
            spelling: spelling.into(),
        })
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn class(&self) -> TypeClass {
        match &self.kind {
            TypeKind::Builtin(_) => TypeClass::Builtin,
            TypeKind::Pointer { .. } => TypeClass::Pointer,
            TypeKind::Reference { .. } => TypeClass::Reference,
            TypeKind::CvQualified { .. } => TypeClass::CvQualified,
            TypeKind::Array { .. } => TypeClass::Array,
            TypeKind::Function { .. } => TypeClass::Function,
            TypeKind::MemberObject { .. } => TypeClass::MemberObject,
            TypeKind::MemberFunction { .. } => TypeClass::MemberFunction,
            TypeKind::TemplateParameter(_) => TypeClass::TemplateParameter,
            TypeKind::TemplateInstantiation { .. } => TypeClass::TemplateInstantiation,
            TypeKind::UserDefined(_) => TypeClass::UserDefined,
            TypeKind::Decltype { .. } => TypeClass::Decltype,
            TypeKind::Auto => TypeClass::Auto,
            TypeKind::Unexposed { .. } => TypeClass::Unexposed,
        }
    }

    /// Cached canonical form, if it has been computed.
    pub fn canonical(&self) -> Option<&Type> {
        self.canonical.get().map(Box::as_ref)
    }

    pub fn has_canonical(&self) -> bool {
        self.canonical.get().is_some()
    }

    /// Cache the canonical form. It can only be set once.
    pub fn set_canonical(&self, canonical: Type) -> Result<()> {
        self.canonical
            .set(Box::new(canonical))
            .map_err(|_| ReconstructError::CanonicalAlreadySet)
    }

    /// True for an unexposed node with no spelling at all.
    pub fn is_unnamed_unexposed(&self) -> bool {
        matches!(&self.kind, TypeKind::Unexposed { spelling } if spelling.is_empty())
    }

    /// The node with any cv wrapper removed.
    pub fn unqualified(&self) -> &Type {
        match &self.kind {
            TypeKind::CvQualified { inner, .. } => inner,
            _ => self,
        }
    }
}

// The canonical slot is a cache and is not part of the serialized tree.
impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.kind.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_merge_is_commutative_and_idempotent() {
        let c = CvQualifiers::CONST;
        let v = CvQualifiers::VOLATILE;
        let none = CvQualifiers::empty();

        assert_eq!(c.merge(v), v.merge(c));
        assert_eq!(c.merge(v), CvQualifiers::CONST | CvQualifiers::VOLATILE);
        for x in [none, c, v, c | v] {
            assert_eq!(x.merge(x), x);
            assert_eq!(none.merge(x), x);
        }
    }

    #[test]
    fn empty_cv_does_not_wrap() {
        let ty = Type::cv_qualified(Type::builtin(BuiltinKind::Int), CvQualifiers::empty());
        assert_eq!(ty.class(), TypeClass::Builtin);

        let ty = Type::cv_qualified(Type::builtin(BuiltinKind::Int), CvQualifiers::CONST);
        assert_eq!(ty.class(), TypeClass::CvQualified);
        assert_eq!(ty.unqualified().class(), TypeClass::Builtin);
    }

    #[test]
    fn canonical_is_set_once() {
        let ty = Type::unexposed("T");
        assert!(ty.canonical().is_none());

        ty.set_canonical(Type::builtin(BuiltinKind::Int)).unwrap();
        assert_eq!(ty.canonical(), Some(&Type::builtin(BuiltinKind::Int)));

        let err = ty.set_canonical(Type::builtin(BuiltinKind::Long)).unwrap_err();
        assert!(matches!(err, ReconstructError::CanonicalAlreadySet));
    }

    #[test]
    fn serialized_tree_skips_canonical() {
        let ty = Type::pointer(Type::builtin(BuiltinKind::Int));
        ty.set_canonical(Type::pointer(Type::builtin(BuiltinKind::Int))).unwrap();
        insta::assert_yaml_snapshot!(&ty, @r"
        Pointer:
          pointee:
            Builtin: Int
        ");
    }
}
