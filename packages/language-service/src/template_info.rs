//! Template lookup
//!
//! Finds the component owning a position and the template attached to it,
//! whether the template is inline in a TypeScript file or lives in its own
//! template file.

use std::cmp::Ordering;

use crate::logging::{Logger, NullLogger};
use crate::program::{is_typescript_file, Declaration, TemplateCompiler};
use crate::render3::r3_ast::R3Node;

/// A component together with its parsed template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateInfo<'a> {
    pub component: &'a Declaration,
    pub template: &'a [R3Node],
}

pub struct TemplateLocator<'a, C: TemplateCompiler + ?Sized> {
    compiler: &'a C,
    logger: &'a dyn Logger,
}

static NULL_LOGGER: NullLogger = NullLogger;

impl<'a, C: TemplateCompiler + ?Sized> TemplateLocator<'a, C> {
    pub fn new(compiler: &'a C) -> Self {
        Self::with_logger(compiler, &NULL_LOGGER)
    }

    pub fn with_logger(compiler: &'a C, logger: &'a dyn Logger) -> Self {
        Self { compiler, logger }
    }

    /// Resolve the component and template for `position` in `file_name`.
    pub fn get_template_info_at_position(
        &self,
        file_name: &str,
        position: usize,
    ) -> Option<TemplateInfo<'a>> {
        if is_typescript_file(file_name) {
            self.inline_template_info(file_name, position)
        } else {
            self.external_template_info(file_name)
        }
    }

    /// The first top-level named class spanning `position` decides the
    /// result; its template may be absent.
    fn inline_template_info(&self, file_name: &str, position: usize) -> Option<TemplateInfo<'a>> {
        let compiler = self.compiler;
        let Some(source_file) = compiler.program_source_file(file_name) else {
            self.logger
                .debug(&format!("{} is not part of the program", file_name));
            return None;
        };

        let Some(component) = source_file
            .statements
            .iter()
            .find(|stmt| stmt.is_named_class() && stmt.contains(position))
        else {
            self.logger
                .debug(&format!("no class encloses {}:{}", file_name, position));
            return None;
        };

        match compiler.get_template(component) {
            Some(template) => Some(TemplateInfo {
                component,
                template,
            }),
            None => {
                self.logger.debug(&format!(
                    "class {} at {}:{} has no template",
                    component.name.as_deref().unwrap_or_default(),
                    file_name,
                    position
                ));
                None
            }
        }
    }

    /// Components sharing a template file are visited in a fixed order and
    /// the first one carrying a template wins.
    fn external_template_info(&self, file_name: &str) -> Option<TemplateInfo<'a>> {
        let compiler = self.compiler;
        let mut components = compiler.components_with_template_file(file_name);
        components.sort_by(|a, b| compare_components(a, b));

        let info = components
            .into_iter()
            .filter(|component| component.is_named_class())
            .find_map(|component| {
                compiler.get_template(component).map(|template| TemplateInfo {
                    component,
                    template,
                })
            });

        if info.is_none() {
            self.logger
                .debug(&format!("no component with a template uses {}", file_name));
        }
        info
    }
}

/// File name ascending, then raw start offset descending.
pub fn compare_components(a: &Declaration, b: &Declaration) -> Ordering {
    a.file_name
        .cmp(&b.file_name)
        .then_with(|| b.pos.cmp(&a.pos))
}
