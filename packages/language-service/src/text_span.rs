//! Text Spans
//!
//! Converts template and expression AST nodes into the `(start, length)` spans
//! reported to the editor.

use serde::{Deserialize, Serialize};

use crate::expression_parser::ast::{AbsoluteSourceSpan, AST};
use crate::parse_util::ParseSourceSpan;
use crate::render3::r3_ast::{Node, R3Node};

/// Editor-facing byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        TextSpan { start, length }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Either shape of source span carried by AST nodes.
pub trait SourceSpanLike {
    fn start_offset(&self) -> usize;
    fn end_offset(&self) -> usize;
}

impl SourceSpanLike for AbsoluteSourceSpan {
    fn start_offset(&self) -> usize {
        self.start
    }

    fn end_offset(&self) -> usize {
        self.end
    }
}

impl SourceSpanLike for ParseSourceSpan {
    fn start_offset(&self) -> usize {
        self.start.offset
    }

    fn end_offset(&self) -> usize {
        self.end.offset
    }
}

/// A node of either AST family.
#[derive(Debug, Clone, Copy)]
pub enum TargetNode<'a> {
    Template(&'a R3Node),
    Expression(&'a AST),
}

impl<'a> From<&'a R3Node> for TargetNode<'a> {
    fn from(node: &'a R3Node) -> Self {
        TargetNode::Template(node)
    }
}

impl<'a> From<&'a AST> for TargetNode<'a> {
    fn from(node: &'a AST) -> Self {
        TargetNode::Expression(node)
    }
}

/// Normalize a source span. Panics if the span ends before it starts.
pub fn to_text_span<S: SourceSpanLike + ?Sized>(span: &S) -> TextSpan {
    let (start, end) = (span.start_offset(), span.end_offset());
    assert!(
        start <= end,
        "source span ends ({}) before it starts ({})",
        end,
        start
    );
    TextSpan::new(start, end - start)
}

/// The span to report for `node`.
///
/// Key/value template nodes report their key. Property reads and writes,
/// method calls and pipes report only their name, which has no AST node of its
/// own. Everything else reports its full source span.
pub fn get_text_span_of_node<'a>(node: impl Into<TargetNode<'a>>) -> TextSpan {
    match node.into() {
        TargetNode::Template(node) => match node.key_span() {
            Some(key_span) => to_text_span(key_span),
            None => to_text_span(node.source_span()),
        },
        TargetNode::Expression(ast) => match ast {
            AST::PropertyWrite(e) => to_text_span(&e.name_span),
            AST::MethodCall(e) => to_text_span(&e.name_span),
            AST::BindingPipe(e) => to_text_span(&e.name_span),
            AST::PropertyRead(e) => to_text_span(&e.name_span),
            AST::EmptyExpr(_)
            | AST::ImplicitReceiver(_)
            | AST::ThisReceiver(_)
            | AST::Chain(_)
            | AST::Conditional(_)
            | AST::SafePropertyRead(_)
            | AST::KeyedRead(_)
            | AST::KeyedWrite(_)
            | AST::SafeMethodCall(_)
            | AST::Call(_)
            | AST::LiteralPrimitive(_)
            | AST::LiteralArray(_)
            | AST::LiteralMap(_)
            | AST::Interpolation(_)
            | AST::Binary(_)
            | AST::PrefixNot(_)
            | AST::NonNullAssert(_) => to_text_span(&ast.source_span()),
        },
    }
}

/// Whether `position` lies within `span`. Both ends are inclusive so a cursor
/// right before the first or right after the last character still counts.
pub fn is_within<S: SourceSpanLike + ?Sized>(position: usize, span: &S) -> bool {
    span.start_offset() <= position && position <= span.end_offset()
}
