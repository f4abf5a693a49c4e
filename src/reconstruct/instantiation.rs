use thin_vec::ThinVec;

use crate::ast::{Expr, TemplateArgument, TemplateArguments, TokenString, Type, TypeRef};
use crate::error::{ReconstructError, Result};
use crate::frontend::{Cursor, CursorKind, Frontend, TypeHandle};
use crate::reconstruct::{Reconstructor, Site, template_args};

impl<'f, F: Frontend + ?Sized> Reconstructor<'f, F> {
    /// Read `site` as `Name<arguments>`.
    pub(crate) fn try_instantiation_type(&mut self, site: Site) -> Result<Option<Type>> {
        let (cv, spelling) = self.leaf_spelling(site);
        let Some((template_name, _)) = spelling.split_once('<') else {
            return Ok(None);
        };
        let Some(template) = self.instantiation_template(site, template_name)? else {
            return Ok(None);
        };
        let Some(spelling) = spelling.trim_end().strip_suffix('>') else {
            return Ok(None);
        };

        // The frontend's count can differ from what the spelling shows because
        // of default arguments and packs, so the spelling decides how many
        // arguments there are.
        let arguments = match self.frontend.num_template_arguments(site.ty) {
            Some(count) if count > 0 => {
                let parsed = template_args::split_arguments(template_name, spelling);
                let mut arguments = ThinVec::with_capacity(parsed.len());
                for (index, argument_spelling) in parsed.iter().enumerate() {
                    arguments.push(self.instantiation_argument(template, site.ty, index, argument_spelling)?);
                }
                TemplateArguments::Exposed(arguments)
            }
            _ => {
                let body = &spelling[template_name.len() + 1..];
                TemplateArguments::Unexposed(body.trim_end().to_string())
            }
        };

        let template = TypeRef::new(self.frontend.entity_id(template), template_name);
        Ok(Some(Type::cv_qualified(Type::template_instantiation(template, arguments), cv)))
    }

    /// The template an instantiation spelling named `name` refers to.
    fn instantiation_template(&self, site: Site, name: &str) -> Result<Option<Cursor>> {
        if let Some(declaration) = self.frontend.type_declaration(site.ty) {
            let count = self
                .frontend
                .cursor_type(declaration)
                .and_then(|ty| self.frontend.num_template_arguments(ty))
                .unwrap_or(0);
            if count > 0 || self.frontend.cursor_kind(declaration).is_directly_templated() {
                let template = self.frontend.specialized_template(declaration).unwrap_or(declaration);
                return Ok(Some(template));
            }
        }

        // dependent instantiation of a template template parameter
        let mut parameter = None;
        for child in self.frontend.children(site.cursor) {
            if self.frontend.cursor_kind(child) == CursorKind::TemplateTemplateParameter
                && self.frontend.cursor_spelling(child) == name
            {
                if parameter.is_some() {
                    return Err(ReconstructError::AmbiguousTemplateTemplateParameter {
                        name: name.to_string(),
                        scope: self.frontend.cursor_spelling(site.cursor),
                    });
                }
                parameter = Some(child);
            }
        }
        Ok(parameter)
    }

    fn instantiation_argument(
        &mut self,
        template: Cursor,
        ty: TypeHandle,
        index: usize,
        spelling: &str,
    ) -> Result<TemplateArgument> {
        let argument_type = match self.frontend.template_argument_type(ty, index) {
            Some(argument) => {
                let site = Site {
                    cursor: template,
                    ty: argument,
                };
                match self.try_instantiation_type(site)? {
                    Some(instantiation) => Some(instantiation),
                    None => self.build_type_node(site)?,
                }
            }
            None => None,
        };

        match argument_type {
            Some(ty) if !ty.is_unnamed_unexposed() => Ok(TemplateArgument::Type(ty)),
            // non-type argument: re-read it from the spelling
            _ if spelling.parse::<u64>().is_ok() => {
                Ok(TemplateArgument::Expr(Expr::literal(Type::unexposed(spelling), spelling)))
            }
            _ => Ok(TemplateArgument::Expr(Expr::unexposed(
                Type::unexposed(spelling),
                TokenString::tokenize(spelling),
            ))),
        }
    }
}
