#[cfg(test)]
mod tests {
    use crate::ast::{BuiltinKind, CvQualifiers, Type, TypeKind};
    use crate::frontend::{self, CursorKind};
    use crate::tests::test_utils::Unit;

    #[test]
    fn test_const_pointer_to_const() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "p");
        let int = unit.fe.add_type(frontend::TypeKind::Int, "const int");
        let ptr = unit.fe.add_pointer(int, "const int *const");

        let ty = unit.build(var, ptr).unwrap();
        let expected = Type::cv_qualified(
            Type::pointer(Type::cv_qualified(Type::builtin(BuiltinKind::Int), CvQualifiers::CONST)),
            CvQualifiers::CONST,
        );
        assert_eq!(ty.kind, expected.kind);
    }

    #[test]
    fn test_pointer_to_pointer() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "argv");
        let char_ty = unit.fe.add_type(frontend::TypeKind::CharS, "char");
        let inner = unit.fe.add_pointer(char_ty, "char *");
        let outer = unit.fe.add_pointer(inner, "char **");

        let ty = unit.build(var, outer).unwrap();
        insta::assert_yaml_snapshot!(&ty, @r"
        Pointer:
          pointee:
            Pointer:
              pointee:
                Builtin: Char
        ");
    }

    #[test]
    fn test_references() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::ParmDecl, "r");
        let int = unit.int();
        let lvalue = unit.fe.add_reference(int, false, "int &");
        let rvalue = unit.fe.add_reference(int, true, "int &&");

        let ty = unit.build(var, lvalue).unwrap();
        assert_eq!(ty.kind, Type::reference(Type::builtin(BuiltinKind::Int), false).kind);

        let ty = unit.build(var, rvalue).unwrap();
        assert_eq!(ty.kind, Type::reference(Type::builtin(BuiltinKind::Int), true).kind);
    }

    #[test]
    fn test_pointer_without_pointee_is_an_error() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "p");
        let ptr = unit.fe.add_type(frontend::TypeKind::Pointer, "int *");
        assert!(unit.build(var, ptr).is_err());
    }

    #[test]
    fn test_member_object_pointer() {
        let mut unit = Unit::new();
        let (_, a) = unit.class("A");
        let var = unit.decl(CursorKind::VarDecl, "field");
        let int = unit.int();
        let member = unit.fe.add_type(frontend::TypeKind::MemberPointer, "int A::*");
        unit.fe.type_data_mut(member).pointee = Some(int);
        unit.fe.type_data_mut(member).class_type = Some(a);

        let ty = unit.build(var, member).unwrap();
        let TypeKind::Pointer { pointee } = &ty.kind else {
            panic!("expected a pointer: {:?}", ty.kind);
        };
        let TypeKind::MemberObject { class_type, value_type } = &pointee.kind else {
            panic!("expected a member object: {:?}", pointee.kind);
        };
        assert!(matches!(&class_type.kind, TypeKind::UserDefined(class) if class.name == "A"));
        assert_eq!(**value_type, Type::builtin(BuiltinKind::Int));
    }

    #[test]
    fn test_member_function_pointer_qualifiers() {
        let mut unit = Unit::new();
        let (_, a) = unit.class("A");
        let var = unit.decl(CursorKind::VarDecl, "method");
        let void = unit.fe.add_type(frontend::TypeKind::Void, "void");
        let int = unit.int();
        let function = unit.fe.add_function(void, &[int], false, "void (int) const &&");
        let member = unit.fe.add_type(frontend::TypeKind::MemberPointer, "void (A::*)(int) const &&");
        unit.fe.type_data_mut(member).pointee = Some(function);
        unit.fe.type_data_mut(member).class_type = Some(a);

        let ty = unit.build(var, member).unwrap();
        let TypeKind::Pointer { pointee } = &ty.kind else {
            panic!("expected a pointer: {:?}", ty.kind);
        };
        let TypeKind::MemberFunction {
            class_type,
            result,
            parameters,
            is_variadic,
        } = &pointee.kind
        else {
            panic!("expected a member function: {:?}", pointee.kind);
        };

        let TypeKind::Reference { referee, is_rvalue } = &class_type.kind else {
            panic!("expected a ref-qualified class: {:?}", class_type.kind);
        };
        assert!(*is_rvalue);
        let TypeKind::CvQualified { inner, cv } = &referee.kind else {
            panic!("expected a const class: {:?}", referee.kind);
        };
        assert_eq!(*cv, CvQualifiers::CONST);
        assert!(matches!(&inner.kind, TypeKind::UserDefined(class) if class.name == "A"));

        assert_eq!(**result, Type::builtin(BuiltinKind::Void));
        assert_eq!(parameters.as_slice(), &[Type::builtin(BuiltinKind::Int)]);
        assert!(!is_variadic);
    }

    #[test]
    fn test_unqualified_member_function_pointer() {
        let mut unit = Unit::new();
        let (_, a) = unit.class("A");
        let var = unit.decl(CursorKind::VarDecl, "method");
        let int = unit.int();
        let function = unit.fe.add_function(int, &[], false, "int ()");
        let member = unit.fe.add_type(frontend::TypeKind::MemberPointer, "int (A::*)()");
        unit.fe.type_data_mut(member).pointee = Some(function);
        unit.fe.type_data_mut(member).class_type = Some(a);

        let ty = unit.build(var, member).unwrap();
        let TypeKind::Pointer { pointee } = &ty.kind else {
            panic!("expected a pointer: {:?}", ty.kind);
        };
        let TypeKind::MemberFunction { class_type, .. } = &pointee.kind else {
            panic!("expected a member function: {:?}", pointee.kind);
        };
        assert!(matches!(&class_type.kind, TypeKind::UserDefined(class) if class.name == "A"));
    }
}
