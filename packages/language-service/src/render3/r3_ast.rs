//! Render3 AST
//!
//! Template node definitions as produced by the template parser. The language
//! service only reads these; every node keeps the spans it was parsed from.

use crate::expression_parser::ast::AST as ExprAST;
use crate::parse_util::ParseSourceSpan;

/// Every template node knows the source range it was parsed from.
pub trait Node {
    fn source_span(&self) -> &ParseSourceSpan;
}

/// `<!-- ... -->`, kept only when the parser collects comments.
#[derive(Debug, Clone)]
pub struct Comment {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

impl Comment {
    pub fn new(value: String, source_span: ParseSourceSpan) -> Self {
        Comment { value, source_span }
    }
}

/// Static text.
#[derive(Debug, Clone)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

impl Text {
    pub fn new(value: String, source_span: ParseSourceSpan) -> Self {
        Text { value, source_span }
    }
}

/// Text containing `{{ }}` interpolation.
#[derive(Debug, Clone)]
pub struct BoundText {
    pub value: ExprAST,
    pub source_span: ParseSourceSpan,
}

impl BoundText {
    pub fn new(value: ExprAST, source_span: ParseSourceSpan) -> Self {
        BoundText { value, source_span }
    }
}

/// Static attribute in the template, e.g. `<div title="hello">`
#[derive(Debug, Clone)]
pub struct TextAttribute {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

impl TextAttribute {
    pub fn new(
        name: String,
        value: String,
        source_span: ParseSourceSpan,
        key_span: ParseSourceSpan,
        value_span: Option<ParseSourceSpan>,
    ) -> Self {
        TextAttribute {
            name,
            value,
            source_span,
            key_span,
            value_span,
        }
    }
}

/// Kind of a property binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingType {
    /// `[property]="value"`
    Property,
    /// `[attr.name]="value"`
    Attribute,
    /// `[class.name]="value"`
    Class,
    /// `[style.name]="value"`
    Style,
    /// `[@trigger]="value"`
    Animation,
    /// `[(property)]="value"`
    TwoWay,
}

/// Bound attribute node, e.g. `<div [title]="heading">`
#[derive(Debug, Clone)]
pub struct BoundAttribute {
    pub name: String,
    pub type_: BindingType,
    pub value: ExprAST,
    pub unit: Option<String>,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

impl BoundAttribute {
    pub fn new(
        name: String,
        type_: BindingType,
        value: ExprAST,
        unit: Option<String>,
        source_span: ParseSourceSpan,
        key_span: ParseSourceSpan,
        value_span: Option<ParseSourceSpan>,
    ) -> Self {
        BoundAttribute {
            name,
            type_,
            value,
            unit,
            source_span,
            key_span,
            value_span,
        }
    }
}

/// Kind of an event binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedEventType {
    Regular,
    Animation,
    TwoWay,
}

/// Bound event node, e.g. `<button (click)="save()">`
#[derive(Debug, Clone)]
pub struct BoundEvent {
    pub name: String,
    pub type_: ParsedEventType,
    pub handler: ExprAST,
    pub target: Option<String>,
    pub phase: Option<String>,
    pub source_span: ParseSourceSpan,
    pub handler_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
}

impl BoundEvent {
    pub fn new(
        name: String,
        type_: ParsedEventType,
        handler: ExprAST,
        target: Option<String>,
        phase: Option<String>,
        source_span: ParseSourceSpan,
        handler_span: ParseSourceSpan,
        key_span: ParseSourceSpan,
    ) -> Self {
        BoundEvent {
            name,
            type_,
            handler,
            target,
            phase,
            source_span,
            handler_span,
            key_span,
        }
    }
}

/// Element node
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub outputs: Vec<BoundEvent>,
    pub children: Vec<R3Node>,
    pub references: Vec<Reference>,
    pub is_self_closing: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

impl Element {
    pub fn new(
        name: String,
        attributes: Vec<TextAttribute>,
        inputs: Vec<BoundAttribute>,
        outputs: Vec<BoundEvent>,
        children: Vec<R3Node>,
        references: Vec<Reference>,
        is_self_closing: bool,
        source_span: ParseSourceSpan,
        start_source_span: ParseSourceSpan,
        end_source_span: Option<ParseSourceSpan>,
    ) -> Self {
        Element {
            name,
            attributes,
            inputs,
            outputs,
            children,
            references,
            is_self_closing,
            source_span,
            start_source_span,
            end_source_span,
        }
    }
}

/// Template node: `<ng-template>` or the implicit template created by a
/// structural directive such as `*ngFor`.
#[derive(Debug, Clone)]
pub struct Template {
    pub tag_name: Option<String>,
    pub attributes: Vec<TextAttribute>,
    pub inputs: Vec<BoundAttribute>,
    pub outputs: Vec<BoundEvent>,
    pub template_attrs: Vec<TemplateAttr>,
    pub children: Vec<R3Node>,
    pub references: Vec<Reference>,
    pub variables: Vec<Variable>,
    pub is_self_closing: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

/// Attribute written on a structural directive, `*ngFor="..."` and its
/// desugared bindings.
#[derive(Debug, Clone)]
pub enum TemplateAttr {
    Bound(BoundAttribute),
    Text(TextAttribute),
}

impl TemplateAttr {
    pub fn name(&self) -> &str {
        match self {
            TemplateAttr::Bound(attr) => &attr.name,
            TemplateAttr::Text(attr) => &attr.name,
        }
    }

    pub fn value_span(&self) -> Option<&ParseSourceSpan> {
        match self {
            TemplateAttr::Bound(attr) => attr.value_span.as_ref(),
            TemplateAttr::Text(attr) => attr.value_span.as_ref(),
        }
    }
}

/// `<ng-content>` projection slot.
#[derive(Debug, Clone)]
pub struct Content {
    pub selector: String,
    pub attributes: Vec<TextAttribute>,
    pub children: Vec<R3Node>,
    pub is_self_closing: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    pub end_source_span: Option<ParseSourceSpan>,
}

impl Content {
    pub fn name(&self) -> &str {
        "ng-content"
    }
}

/// Template variable, e.g. `let-item` or the `item` of `*ngFor="let item of items"`
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

/// Template reference, e.g. `#form="ngForm"`
#[derive(Debug, Clone)]
pub struct Reference {
    pub name: String,
    pub value: String,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

/// `@let` declaration
#[derive(Debug, Clone)]
pub struct LetDeclaration {
    pub name: String,
    pub value: ExprAST,
    pub source_span: ParseSourceSpan,
    pub name_span: ParseSourceSpan,
    pub value_span: ParseSourceSpan,
}

macro_rules! impl_node {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Node for $ty {
                fn source_span(&self) -> &ParseSourceSpan {
                    &self.source_span
                }
            }
        )*
    };
}

impl_node!(
    Comment,
    Text,
    BoundText,
    TextAttribute,
    BoundAttribute,
    BoundEvent,
    Element,
    Template,
    Content,
    Variable,
    Reference,
    LetDeclaration,
);

/// Any template node.
#[derive(Debug, Clone)]
pub enum R3Node {
    Comment(Comment),
    Text(Text),
    BoundText(BoundText),
    TextAttribute(TextAttribute),
    BoundAttribute(BoundAttribute),
    BoundEvent(BoundEvent),
    Element(Element),
    Template(Template),
    Content(Content),
    Variable(Variable),
    Reference(Reference),
    LetDeclaration(LetDeclaration),
}

impl R3Node {
    /// Span of the key part of key/value shaped nodes (attributes, bindings,
    /// events, variables and references). `None` for every other node.
    pub fn key_span(&self) -> Option<&ParseSourceSpan> {
        match self {
            R3Node::TextAttribute(n) => Some(&n.key_span),
            R3Node::BoundAttribute(n) => Some(&n.key_span),
            R3Node::BoundEvent(n) => Some(&n.key_span),
            R3Node::Variable(n) => Some(&n.key_span),
            R3Node::Reference(n) => Some(&n.key_span),
            R3Node::Comment(_)
            | R3Node::Text(_)
            | R3Node::BoundText(_)
            | R3Node::Element(_)
            | R3Node::Template(_)
            | R3Node::Content(_)
            | R3Node::LetDeclaration(_) => None,
        }
    }
}

impl Node for R3Node {
    fn source_span(&self) -> &ParseSourceSpan {
        match self {
            R3Node::Comment(n) => n.source_span(),
            R3Node::Text(n) => n.source_span(),
            R3Node::BoundText(n) => n.source_span(),
            R3Node::TextAttribute(n) => n.source_span(),
            R3Node::BoundAttribute(n) => n.source_span(),
            R3Node::BoundEvent(n) => n.source_span(),
            R3Node::Element(n) => n.source_span(),
            R3Node::Template(n) => n.source_span(),
            R3Node::Content(n) => n.source_span(),
            R3Node::Variable(n) => n.source_span(),
            R3Node::Reference(n) => n.source_span(),
            R3Node::LetDeclaration(n) => n.source_span(),
        }
    }
}
