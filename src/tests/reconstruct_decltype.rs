#[cfg(test)]
mod tests {
    use crate::ast::{CvQualifiers, ExprKind, TypeKind};
    use crate::error::ReconstructError;
    use crate::frontend::{self, CursorKind};
    use crate::tests::test_utils::Unit;

    #[test]
    fn test_decltype_operand() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "sum");
        let ty = unit.fe.add_type(frontend::TypeKind::Unexposed, "decltype(a + b)");

        let ty = unit.build(var, ty).unwrap();
        let TypeKind::Decltype { operand } = &ty.kind else {
            panic!("expected decltype: {:?}", ty.kind);
        };
        let ExprKind::Unexposed { tokens } = &operand.kind else {
            panic!("expected an unexposed operand: {:?}", operand.kind);
        };
        assert_eq!(tokens.tokens(), ["a", "+", "b"]);
        assert_eq!(tokens.to_string(), "a+b");
    }

    #[test]
    fn test_const_decltype() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "value");
        let ty = unit.fe.add_type(frontend::TypeKind::Dependent, "const decltype(t.get())");

        let ty = unit.build(var, ty).unwrap();
        let TypeKind::CvQualified { inner, cv } = &ty.kind else {
            panic!("expected a cv-qualified decltype: {:?}", ty.kind);
        };
        assert_eq!(*cv, CvQualifiers::CONST);
        assert_eq!(inner.class(), crate::ast::TypeClass::Decltype);
    }

    #[test]
    fn test_decltype_pack_expansion() {
        let mut unit = Unit::new();
        let parm = unit.decl(CursorKind::ParmDecl, "args");
        let ty = unit.fe.add_type(frontend::TypeKind::Unexposed, "decltype(xs)...");

        let ty = unit.build(parm, ty).unwrap();
        let TypeKind::Decltype { operand } = &ty.kind else {
            panic!("expected decltype: {:?}", ty.kind);
        };
        assert!(matches!(&operand.kind, ExprKind::Unexposed { tokens } if tokens.to_string() == "xs"));
    }

    #[test]
    fn test_unterminated_decltype_is_an_error() {
        let mut unit = Unit::new();
        let var = unit.decl(CursorKind::VarDecl, "broken");
        let ty = unit.fe.add_type(frontend::TypeKind::Unexposed, "decltype(x");

        let err = unit.build(var, ty).unwrap_err();
        assert!(matches!(err, ReconstructError::MalformedSpelling { .. }));
    }

    #[test]
    fn test_decltype_skipped_on_expressions() {
        let mut unit = Unit::new();
        let expr = unit.decl(CursorKind::UnexposedExpr, "");
        let ty = unit.fe.add_type(frontend::TypeKind::Unexposed, "decltype(a + b)");

        let ty = unit.build(expr, ty).unwrap();
        assert!(matches!(&ty.kind, TypeKind::Unexposed { spelling } if spelling == "decltype(a + b)"));
    }
}
