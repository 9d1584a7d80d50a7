// Program View
//
// The slice of the compiler's program the language service reads: top-level
// declarations of source files and the templates attached to components.

use crate::render3::r3_ast::R3Node;

/// Kind of a top-level statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Function,
    Variable,
    Interface,
    Enum,
    Import,
    Other,
}

/// A top-level statement of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: Option<String>,
    /// Declaring source file.
    pub file_name: String,
    /// Raw start offset, including leading trivia.
    pub pos: usize,
    /// End offset.
    pub end: usize,
}

impl Declaration {
    pub fn new(
        kind: DeclarationKind,
        name: Option<String>,
        file_name: impl Into<String>,
        pos: usize,
        end: usize,
    ) -> Self {
        Self {
            kind,
            name,
            file_name: file_name.into(),
            pos,
            end,
        }
    }

    /// Named class declaration.
    pub fn class(name: impl Into<String>, file_name: impl Into<String>, pos: usize, end: usize) -> Self {
        Self::new(DeclarationKind::Class, Some(name.into()), file_name, pos, end)
    }

    /// Only named classes can own a template.
    pub fn is_named_class(&self) -> bool {
        self.kind == DeclarationKind::Class && self.name.is_some()
    }

    /// Inclusive on both ends.
    pub fn contains(&self, position: usize) -> bool {
        self.pos <= position && position <= self.end
    }
}

/// A parsed source file of the program.
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub file_name: String,
    pub statements: Vec<Declaration>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, statements: Vec<Declaration>) -> Self {
        Self {
            file_name: file_name.into(),
            statements,
        }
    }
}

/// Compiler state the language service queries.
pub trait TemplateCompiler {
    /// Source file of the current program, if `file_name` belongs to it.
    fn program_source_file(&self, file_name: &str) -> Option<&SourceFile>;

    /// Parsed template of a component declaration.
    fn get_template(&self, declaration: &Declaration) -> Option<&[R3Node]>;

    /// Declarations whose external template is `file_name`, in no particular order.
    fn components_with_template_file(&self, file_name: &str) -> Vec<&Declaration>;
}

/// Check if file is TypeScript.
pub fn is_typescript_file(file_name: &str) -> bool {
    file_name.ends_with(".ts")
}

/// Anything that is not a TypeScript file is treated as a template resource.
pub fn is_external_template(file_name: &str) -> bool {
    !is_typescript_file(file_name)
}
