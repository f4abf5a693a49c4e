use crate::ast::{Type, TypeRef};
use crate::error::{ReconstructError, Result};
use crate::frontend::{Cursor, CursorKind, Frontend};
use crate::reconstruct::{Reconstructor, Site};

impl<'f, F: Frontend + ?Sized> Reconstructor<'f, F> {
    /// Read `site` as a reference to a template type parameter.
    ///
    /// The innermost enclosing template is searched first; without a match
    /// the search continues with the templates around it.
    pub(crate) fn try_template_parameter_type(&mut self, site: Site) -> Result<Option<Type>> {
        let mut scope = Some(site.cursor);
        while let Some(cursor) = scope {
            let Some(template) = self.frontend.enclosing_template(cursor) else {
                return Ok(None);
            };
            if let Some(parameter) = self.match_template_parameter(site.with_cursor(cursor), template)? {
                return Ok(Some(parameter));
            }
            scope = self.frontend.semantic_parent(template);
        }
        Ok(None)
    }

    fn match_template_parameter(&self, site: Site, template: Cursor) -> Result<Option<Type>> {
        let (cv, spelling) = self.leaf_spelling(site);

        let mut parameter = None;
        for child in self.frontend.children(template) {
            if self.frontend.cursor_kind(child) != CursorKind::TemplateTypeParameter {
                continue;
            }
            let name = match self.frontend.cursor_type(child) {
                Some(ty) => self.type_spelling(child, ty),
                None => self.frontend.cursor_spelling(child),
            };
            if name != spelling {
                continue;
            }
            if parameter.is_some() {
                return Err(ReconstructError::AmbiguousTemplateParameter {
                    name,
                    template: self.frontend.cursor_spelling(template),
                });
            }
            parameter = Some(child);
        }

        Ok(parameter.map(|parameter| {
            let parameter = TypeRef::new(self.frontend.entity_id(parameter), spelling);
            Type::cv_qualified(Type::template_parameter(parameter), cv)
        }))
    }
}
