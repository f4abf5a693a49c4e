#[cfg(test)]
mod tests {
    use crate::ast::{BuiltinKind, CvQualifiers, Type, TypeKind};
    use crate::frontend::{self, CursorKind};
    use crate::tests::test_utils::Unit;

    const BUILTINS: [(frontend::TypeKind, BuiltinKind); 23] = [
        (frontend::TypeKind::Void, BuiltinKind::Void),
        (frontend::TypeKind::Bool, BuiltinKind::Bool),
        (frontend::TypeKind::UChar, BuiltinKind::UChar),
        (frontend::TypeKind::UShort, BuiltinKind::UShort),
        (frontend::TypeKind::UInt, BuiltinKind::UInt),
        (frontend::TypeKind::ULong, BuiltinKind::ULong),
        (frontend::TypeKind::ULongLong, BuiltinKind::ULongLong),
        (frontend::TypeKind::UInt128, BuiltinKind::UInt128),
        (frontend::TypeKind::SChar, BuiltinKind::SChar),
        (frontend::TypeKind::Short, BuiltinKind::Short),
        (frontend::TypeKind::Int, BuiltinKind::Int),
        (frontend::TypeKind::Long, BuiltinKind::Long),
        (frontend::TypeKind::LongLong, BuiltinKind::LongLong),
        (frontend::TypeKind::Int128, BuiltinKind::Int128),
        (frontend::TypeKind::Float, BuiltinKind::Float),
        (frontend::TypeKind::Double, BuiltinKind::Double),
        (frontend::TypeKind::LongDouble, BuiltinKind::LongDouble),
        (frontend::TypeKind::Float128, BuiltinKind::Float128),
        (frontend::TypeKind::CharS, BuiltinKind::Char),
        (frontend::TypeKind::WChar, BuiltinKind::WChar),
        (frontend::TypeKind::Char16, BuiltinKind::Char16),
        (frontend::TypeKind::Char32, BuiltinKind::Char32),
        (frontend::TypeKind::NullPtr, BuiltinKind::NullPtr),
    ];

    #[test]
    fn test_builtin_keywords() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "v");

        for (kind, builtin) in BUILTINS {
            let handle = unit.fe.add_type(kind, builtin.spelling());
            let ty = unit.build(var, handle).unwrap();
            assert_eq!(ty.kind, TypeKind::Builtin(builtin), "{}", builtin);
            assert_eq!(ty.canonical(), Some(&Type::builtin(builtin)));
        }
    }

    #[test]
    fn test_unsigned_char_kinds_share_char() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "c");
        let handle = unit.fe.add_type(frontend::TypeKind::CharU, "char");
        let ty = unit.build(var, handle).unwrap();
        assert_eq!(ty.kind, TypeKind::Builtin(BuiltinKind::Char));
    }

    #[test]
    fn test_cv_qualified_builtins() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "v");

        let cases = [
            ("const int", CvQualifiers::CONST),
            ("int const", CvQualifiers::CONST),
            ("volatile int", CvQualifiers::VOLATILE),
            ("const volatile int", CvQualifiers::CONST | CvQualifiers::VOLATILE),
            ("volatile int const", CvQualifiers::CONST | CvQualifiers::VOLATILE),
        ];
        for (spelling, expected) in cases {
            let handle = unit.fe.add_type(frontend::TypeKind::Int, spelling);
            let ty = unit.build(var, handle).unwrap();
            let TypeKind::CvQualified { inner, cv } = &ty.kind else {
                panic!("'{}' is not cv-qualified: {:?}", spelling, ty.kind);
            };
            assert_eq!(*cv, expected, "{}", spelling);
            assert_eq!(**inner, Type::builtin(BuiltinKind::Int));
        }
    }

    #[test]
    fn test_keyword_lookalikes_are_not_qualifiers() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "v");
        let (_, constant) = unit.class("constant");

        let ty = unit.build(var, constant).unwrap();
        let TypeKind::UserDefined(declaration) = &ty.kind else {
            panic!("expected a user-defined type: {:?}", ty.kind);
        };
        assert_eq!(declaration.name, "constant");
    }

    #[test]
    fn test_auto_resolves_through_canonical() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "x");
        let int = unit.int();

        let deduced = unit.fe.add_type(frontend::TypeKind::Auto, "auto");
        unit.fe.set_canonical(deduced, int);
        let ty = unit.build(var, deduced).unwrap();
        assert_eq!(ty.kind, TypeKind::Builtin(BuiltinKind::Int));

        let undeduced = unit.fe.add_type(frontend::TypeKind::Auto, "const auto");
        let ty = unit.build(var, undeduced).unwrap();
        assert_eq!(ty.kind, Type::cv_qualified(Type::auto(), CvQualifiers::CONST).kind);
    }

    #[test]
    fn test_invalid_type_is_an_error() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "v");
        let invalid = unit.fe.add_type(frontend::TypeKind::Invalid, "");
        let err = unit.build(var, invalid).unwrap_err();
        assert!(matches!(err, crate::error::ReconstructError::InvalidType { .. }));
    }

    #[test]
    fn test_reconstruction_is_deterministic() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "v");
        let int = unit.fe.add_type(frontend::TypeKind::Int, "const int");
        let ptr = unit.fe.add_pointer(int, "const int *volatile");

        let first = unit.build(var, ptr).unwrap();
        let second = unit.build(var, ptr).unwrap();
        assert_eq!(first, second);
    }
}
