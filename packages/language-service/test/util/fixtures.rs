//! Template fixtures for language service tests
//!
//! Builds template nodes by hand from offsets into a template string, and a
//! compiler double that serves declarations and templates from memory.

#![allow(dead_code)]

use std::collections::HashMap;

use angular_language_service::expression_parser::{
    AbsoluteSourceSpan, EmptyExpr, ImplicitReceiver, ParseSpan, PropertyRead, AST,
};
use angular_language_service::parse_util::{ParseSourceFile, ParseSourceSpan};
use angular_language_service::program::{Declaration, SourceFile, TemplateCompiler};
use angular_language_service::render3::{
    BindingType, BoundAttribute, Element, R3Node, Template, TemplateAttr, Text, TextAttribute,
};

pub fn template_file(content: &str) -> ParseSourceFile {
    ParseSourceFile::new(content, "test.html")
}

pub fn span(file: &ParseSourceFile, start: usize, end: usize) -> ParseSourceSpan {
    ParseSourceSpan::from_offsets(file, start, end)
}

/// Offsets of `needle` within the file content. Panics if absent.
pub fn offsets_of(file: &ParseSourceFile, needle: &str) -> (usize, usize) {
    let start = file
        .content
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in {:?}", needle, file.content));
    (start, start + needle.len())
}

/// Static attribute; `value` is the quoted text, when present.
pub fn text_attr(file: &ParseSourceFile, source: &str, name: &str, value: Option<&str>) -> TextAttribute {
    let (start, end) = offsets_of(file, source);
    let key_start = start + source.find(name).unwrap();
    let value_span = value.map(|v| {
        let value_start = start + source.rfind(v).unwrap();
        span(file, value_start, value_start + v.len())
    });
    TextAttribute::new(
        name.to_string(),
        value.unwrap_or_default().to_string(),
        span(file, start, end),
        span(file, key_start, key_start + name.len()),
        value_span,
    )
}

/// Property binding whose value is a single implicit property read.
pub fn bound_attr(file: &ParseSourceFile, source: &str, name: &str, value: &str) -> BoundAttribute {
    let (start, end) = offsets_of(file, source);
    let key_start = start + source.find(name).unwrap();
    let value_start = start + source.rfind(value).unwrap();
    let value_end = value_start + value.len();
    BoundAttribute::new(
        name.to_string(),
        BindingType::Property,
        property_read(value, value_start, value_end),
        None,
        span(file, start, end),
        span(file, key_start, key_start + name.len()),
        Some(span(file, value_start, value_end)),
    )
}

/// `name` read off the implicit receiver.
pub fn property_read(name: &str, start: usize, end: usize) -> AST {
    let source_span = AbsoluteSourceSpan::new(start, end);
    AST::PropertyRead(PropertyRead::new(
        ParseSpan::new(0, end - start),
        source_span,
        source_span,
        Box::new(AST::ImplicitReceiver(ImplicitReceiver::new(
            ParseSpan::new(0, 0),
            AbsoluteSourceSpan::new(start, start),
        ))),
        name.to_string(),
    ))
}

pub fn empty_expr(at: usize) -> AST {
    AST::EmptyExpr(EmptyExpr::new(
        ParseSpan::new(0, 0),
        AbsoluteSourceSpan::new(at, at),
    ))
}

/// Element spanning the whole file.
pub fn element(
    file: &ParseSourceFile,
    name: &str,
    attributes: Vec<TextAttribute>,
    inputs: Vec<BoundAttribute>,
) -> Element {
    let end = file.content.len();
    let start_tag_end = file.content.find('>').map(|i| i + 1).unwrap_or(end);
    Element::new(
        name.to_string(),
        attributes,
        inputs,
        vec![],
        vec![],
        vec![],
        false,
        span(file, 0, end),
        span(file, 0, start_tag_end),
        None,
    )
}

/// Template spanning the whole file.
pub fn template(
    file: &ParseSourceFile,
    tag_name: Option<&str>,
    attributes: Vec<TextAttribute>,
    inputs: Vec<BoundAttribute>,
    template_attrs: Vec<TemplateAttr>,
) -> Template {
    let end = file.content.len();
    let start_tag_end = file.content.find('>').map(|i| i + 1).unwrap_or(end);
    Template {
        tag_name: tag_name.map(str::to_string),
        attributes,
        inputs,
        outputs: vec![],
        template_attrs,
        children: vec![],
        references: vec![],
        variables: vec![],
        is_self_closing: false,
        source_span: span(file, 0, end),
        start_source_span: span(file, 0, start_tag_end),
        end_source_span: None,
    }
}

/// In-memory compiler state.
#[derive(Default)]
pub struct FakeCompiler {
    source_files: HashMap<String, SourceFile>,
    templates: Vec<(Declaration, Vec<R3Node>)>,
    template_files: HashMap<String, Vec<Declaration>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source_file(&mut self, file: SourceFile) -> &mut Self {
        self.source_files.insert(file.file_name.clone(), file);
        self
    }

    pub fn add_template(&mut self, component: Declaration, nodes: Vec<R3Node>) -> &mut Self {
        self.templates.push((component, nodes));
        self
    }

    pub fn add_template_file(&mut self, file_name: &str, component: Declaration) -> &mut Self {
        self.template_files
            .entry(file_name.to_string())
            .or_default()
            .push(component);
        self
    }
}

impl TemplateCompiler for FakeCompiler {
    fn program_source_file(&self, file_name: &str) -> Option<&SourceFile> {
        self.source_files.get(file_name)
    }

    fn get_template(&self, declaration: &Declaration) -> Option<&[R3Node]> {
        self.templates
            .iter()
            .find(|(component, _)| component == declaration)
            .map(|(_, nodes)| nodes.as_slice())
    }

    fn components_with_template_file(&self, file_name: &str) -> Vec<&Declaration> {
        self.template_files
            .get(file_name)
            .map(|components| components.iter().collect())
            .unwrap_or_default()
    }
}

/// Template made of a single text node, so tests can tell templates apart.
pub fn marker_template(file: &ParseSourceFile, text: &str) -> Vec<R3Node> {
    let (start, end) = offsets_of(file, text);
    vec![R3Node::Text(Text::new(text.to_string(), span(file, start, end)))]
}
