use thin_vec::ThinVec;

use crate::ast::{BuiltinKind, CvQualifiers, Expr, TokenString, Type, TypeClass, TypeRef};
use crate::error::{ReconstructError, Result};
use crate::frontend::{Cursor, Frontend, TypeHandle, TypeKind};
use crate::reconstruct::strategy::{Strategy, first_success};
use crate::reconstruct::{DIAGNOSTIC_SOURCE, Reconstructor, Site, array_size, spelling};

/// Builtin type reported under a frontend type kind, if any.
pub(crate) fn builtin_kind(kind: TypeKind) -> Option<BuiltinKind> {
    let builtin = match kind {
        TypeKind::Void => BuiltinKind::Void,
        TypeKind::Bool => BuiltinKind::Bool,
        TypeKind::UChar => BuiltinKind::UChar,
        TypeKind::UShort => BuiltinKind::UShort,
        TypeKind::UInt => BuiltinKind::UInt,
        TypeKind::ULong => BuiltinKind::ULong,
        TypeKind::ULongLong => BuiltinKind::ULongLong,
        TypeKind::UInt128 => BuiltinKind::UInt128,
        TypeKind::SChar => BuiltinKind::SChar,
        TypeKind::Short => BuiltinKind::Short,
        TypeKind::Int => BuiltinKind::Int,
        TypeKind::Long => BuiltinKind::Long,
        TypeKind::LongLong => BuiltinKind::LongLong,
        TypeKind::Int128 => BuiltinKind::Int128,
        TypeKind::Float => BuiltinKind::Float,
        TypeKind::Double => BuiltinKind::Double,
        TypeKind::LongDouble => BuiltinKind::LongDouble,
        TypeKind::Float128 => BuiltinKind::Float128,
        TypeKind::CharU | TypeKind::CharS => BuiltinKind::Char,
        TypeKind::WChar => BuiltinKind::WChar,
        TypeKind::Char16 => BuiltinKind::Char16,
        TypeKind::Char32 => BuiltinKind::Char32,
        TypeKind::NullPtr => BuiltinKind::NullPtr,
        _ => return None,
    };
    Some(builtin)
}

impl<'f, F: Frontend + ?Sized> Reconstructor<'f, F> {
    /// Reconstruct the type `ty` seen from `cursor`, including its canonical form.
    pub fn build_type(&mut self, cursor: Cursor, ty: TypeHandle) -> Result<Type> {
        let site = Site { cursor, ty };
        let result = self.build_required(site)?;
        if result.has_canonical() {
            return Ok(result);
        }

        let declared = result.class();
        let canonical_site = site.with_type(self.frontend.canonical_type(ty));
        let canonical = match declared {
            // already canonical, building it again would repeat its diagnostics
            _ if canonical_site.ty == ty => result.clone(),
            TypeClass::TemplateInstantiation | TypeClass::UserDefined => {
                match self.try_instantiation_type(canonical_site)? {
                    Some(canonical) => canonical,
                    None => self.build_required(canonical_site)?,
                }
            }
            _ => self.build_required(canonical_site)?,
        };

        if declared == TypeClass::TemplateInstantiation && canonical.class() != declared {
            return Err(ReconstructError::CanonicalKindMismatch {
                spelling: self.frontend.type_spelling(ty),
                canonical: canonical.class(),
            });
        }

        result.set_canonical(canonical)?;
        Ok(result)
    }

    /// One node for `site`, without a canonical form. `None` for invalid types.
    pub(crate) fn build_type_node(&mut self, site: Site) -> Result<Option<Type>> {
        let kind = self.frontend.type_kind(site.ty);
        if let Some(builtin) = builtin_kind(kind) {
            let (cv, _) = self.leaf_spelling(site);
            return Ok(Some(Type::cv_qualified(Type::builtin(builtin), cv)));
        }

        let ty = match kind {
            TypeKind::Invalid => return Ok(None),
            TypeKind::Unexposed | TypeKind::Dependent => self.unexposed_type(site)?,
            TypeKind::Complex => Type::unexposed(self.type_spelling(site.cursor, site.ty)),

            TypeKind::Elaborated => match self.try_instantiation_type(site)? {
                Some(instantiation) => instantiation,
                None => self.user_defined_type(site),
            },
            TypeKind::Record | TypeKind::Enum | TypeKind::Typedef => self.user_defined_type(site),

            TypeKind::Pointer => {
                let pointee = self.pointee(site)?;
                let spelling = self.type_spelling(site.cursor, site.ty);
                let (cv, _) = spelling::suffix_cv(&spelling);
                Type::cv_qualified(Type::pointer(pointee), cv)
            }
            TypeKind::LValueReference | TypeKind::RValueReference => {
                let referee = self.pointee(site)?;
                Type::reference(referee, kind == TypeKind::RValueReference)
            }

            kind if kind.is_array() => return self.try_array_type(site),

            TypeKind::FunctionNoProto | TypeKind::FunctionProto => {
                return match self.try_function_type(site)? {
                    Some(function) => Ok(Some(function)),
                    None => Err(ReconstructError::MissingResultType {
                        spelling: self.frontend.type_spelling(site.ty),
                    }),
                };
            }

            TypeKind::MemberPointer => Type::pointer(self.member_pointee_type(site)?),

            TypeKind::Auto => {
                let canonical = self.frontend.canonical_type(site.ty);
                if canonical == site.ty || self.frontend.type_kind(canonical) == TypeKind::Auto {
                    let (cv, _) = self.leaf_spelling(site);
                    Type::cv_qualified(Type::auto(), cv)
                } else {
                    return self.build_type_node(site.with_type(canonical));
                }
            }

            TypeKind::Vector
            | TypeKind::BlockPointer
            | TypeKind::Atomic
            | TypeKind::Attributed
            | TypeKind::ObjCObjectPointer => {
                let message = format!(
                    "unexpected type '{}' of kind '{}'",
                    self.frontend.cursor_spelling(site.cursor),
                    kind
                );
                let location = self.frontend.location(site.cursor);
                self.diagnostics.report_warning(DIAGNOSTIC_SOURCE, message, location);
                self.unexposed_type(site)?
            }

            // builtins were handled above
            _ => Type::unexposed(self.type_spelling(site.cursor, site.ty)),
        };
        Ok(Some(ty))
    }

    /// A sub-type that must exist.
    pub(crate) fn build_required(&mut self, site: Site) -> Result<Type> {
        match self.build_type_node(site)? {
            Some(ty) => Ok(ty),
            None => Err(ReconstructError::InvalidType {
                spelling: self.frontend.type_spelling(site.ty),
            }),
        }
    }

    /// Qualifiers and bare spelling of a leaf type.
    pub(crate) fn leaf_spelling(&self, site: Site) -> (CvQualifiers, String) {
        let spelling = self.type_spelling(site.cursor, site.ty);
        let (cv, rest) = spelling::extract_cv(&spelling);
        (cv, spelling::strip_elaborated_prefix(rest).to_string())
    }

    fn valid_type(&self, ty: Option<TypeHandle>) -> Option<TypeHandle> {
        ty.filter(|ty| self.frontend.type_kind(*ty) != TypeKind::Invalid)
    }

    fn pointee(&mut self, site: Site) -> Result<Type> {
        match self.valid_type(self.frontend.pointee_type(site.ty)) {
            Some(pointee) => self.build_required(site.with_type(pointee)),
            None => Err(ReconstructError::InvalidType {
                spelling: self.frontend.type_spelling(site.ty),
            }),
        }
    }

    /// Fallback chain for kinds the frontend does not expose.
    fn unexposed_type(&mut self, site: Site) -> Result<Type> {
        let strategies: [Strategy<Self, Site, Type>; 5] = [
            Strategy::new("function", Self::try_function_type),
            Strategy::new("array", Self::try_array_type),
            Strategy::new("decltype", Self::try_decltype_type),
            Strategy::new("instantiation", Self::try_instantiation_type),
            Strategy::new("template parameter", Self::try_template_parameter_type),
        ];
        match first_success(self, site, &strategies)? {
            Some(ty) => Ok(ty),
            None => Ok(Type::unexposed(self.type_spelling(site.cursor, site.ty))),
        }
    }

    fn user_defined_type(&self, site: Site) -> Type {
        let (cv, spelling) = self.leaf_spelling(site);
        let Some(declaration) = self.frontend.type_declaration(site.ty) else {
            return Type::unexposed(self.type_spelling(site.cursor, site.ty));
        };

        // anonymous class or enum
        let spelling = if self.frontend.cursor_spelling(declaration).is_empty() {
            String::new()
        } else {
            spelling
        };
        let declaration = TypeRef::new(self.frontend.entity_id(declaration), spelling);
        Type::cv_qualified(Type::user_defined(declaration), cv)
    }

    pub(crate) fn try_function_type(&mut self, site: Site) -> Result<Option<Type>> {
        let Some(result) = self.valid_type(self.frontend.result_type(site.ty)) else {
            return Ok(None);
        };
        let result = self.build_required(site.with_type(result))?;
        let (parameters, is_variadic) = self.parameters(site)?;
        Ok(Some(Type::function(result, parameters, is_variadic)))
    }

    /// Parameter types of the function type at `site`, in declaration order.
    fn parameters(&mut self, site: Site) -> Result<(ThinVec<Type>, bool)> {
        let Some(count) = self.frontend.num_arg_types(site.ty) else {
            return Err(ReconstructError::InvalidArgumentCount {
                spelling: self.frontend.type_spelling(site.ty),
                index: 0,
            });
        };

        let mut parameters = ThinVec::with_capacity(count);
        for index in 0..count {
            let Some(argument) = self.frontend.arg_type(site.ty, index) else {
                return Err(ReconstructError::InvalidArgumentCount {
                    spelling: self.frontend.type_spelling(site.ty),
                    index,
                });
            };
            parameters.push(self.build_required(site.with_type(argument))?);
        }
        Ok((parameters, self.frontend.is_function_variadic(site.ty)))
    }

    pub(crate) fn try_array_type(&mut self, site: Site) -> Result<Option<Type>> {
        // Unresolved typedefs can hide that a type is an array; its canonical
        // form still knows.
        let canonical = self.frontend.canonical_type(site.ty);
        let element = match self.valid_type(self.frontend.element_type(site.ty)) {
            Some(element) => element,
            None => match self.valid_type(self.frontend.element_type(canonical)) {
                Some(element) => element,
                None => return Ok(None),
            },
        };

        let size = self.array_size(site.with_type(canonical))?;
        let element = self.build_required(site.with_type(element))?;
        Ok(Some(Type::array(element, size)))
    }

    fn array_size(&self, site: Site) -> Result<Option<Expr>> {
        let size_type = || Type::builtin(BuiltinKind::ULongLong);
        if let Some(size) = self.frontend.array_size(site.ty) {
            return Ok(Some(Expr::literal(size_type(), size.to_string())));
        }

        let bound = array_size::recover_bound(&self.type_spelling(site.cursor, site.ty))?;
        if bound.is_empty() {
            return Ok(None);
        }
        Ok(Some(Expr::unexposed(size_type(), TokenString::tokenize(&bound))))
    }

    pub(crate) fn try_decltype_type(&mut self, site: Site) -> Result<Option<Type>> {
        if self.frontend.cursor_kind(site.cursor).is_expression() {
            return Ok(None);
        }

        let (cv, spelling) = self.leaf_spelling(site);
        let Some(operand) = spelling::remove_prefix(&spelling, "decltype(", false) else {
            return Ok(None);
        };
        // decltype(...)... in a pack expansion
        let operand = spelling::remove_suffix(operand, "...", false).unwrap_or(operand);
        let Some(operand) = operand.strip_suffix(')') else {
            return Err(ReconstructError::MalformedSpelling {
                spelling,
                reason: "decltype spelling must end in ')'",
            });
        };

        let operand = Expr::unexposed(Type::unexposed("<decltype>"), TokenString::tokenize(operand));
        Ok(Some(Type::cv_qualified(Type::decltype(operand), cv)))
    }

    fn member_pointee_type(&mut self, site: Site) -> Result<Type> {
        let spelling = self.type_spelling(site.cursor, site.ty);
        let (ref_qualifier, rest) = spelling::ref_qualifier(&spelling);
        let (cv, _) = spelling::suffix_cv(rest);

        let Some(class) = self.valid_type(self.frontend.class_type(site.ty)) else {
            return Err(ReconstructError::InvalidType { spelling });
        };
        let mut class_type = Type::cv_qualified(self.build_required(site.with_type(class))?, cv);
        if let Some(is_rvalue) = ref_qualifier {
            class_type = Type::reference(class_type, is_rvalue);
        }

        let Some(pointee) = self.valid_type(self.frontend.pointee_type(site.ty)) else {
            return Err(ReconstructError::InvalidType { spelling });
        };
        let pointee_site = site.with_type(pointee);
        match self.valid_type(self.frontend.result_type(pointee)) {
            None => Ok(Type::member_object(class_type, self.build_required(pointee_site)?)),
            Some(result) => {
                let result = self.build_required(site.with_type(result))?;
                let (parameters, is_variadic) = self.parameters(pointee_site)?;
                Ok(Type::member_function(class_type, result, parameters, is_variadic))
            }
        }
    }
}
