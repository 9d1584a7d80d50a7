/**
 * Angular Expression AST
 *
 * The node shapes of parsed binding and interpolation expressions, as handed
 * to the language service by the expression parser.
 */

use serde::{Deserialize, Serialize};

/// Span relative to the start of the expression text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSpan {
    pub start: usize,
    pub end: usize,
}

impl ParseSpan {
    pub fn new(start: usize, end: usize) -> Self {
        ParseSpan { start, end }
    }

    pub fn to_absolute(&self, absolute_offset: usize) -> AbsoluteSourceSpan {
        AbsoluteSourceSpan::new(absolute_offset + self.start, absolute_offset + self.end)
    }
}

/// Absolute source span for mapping back to the template file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsoluteSourceSpan {
    pub start: usize,
    pub end: usize,
}

impl AbsoluteSourceSpan {
    pub fn new(start: usize, end: usize) -> Self {
        AbsoluteSourceSpan { start, end }
    }
}

/// A parsed expression. Every variant carries its absolute `source_span`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AST {
    EmptyExpr(EmptyExpr),
    ImplicitReceiver(ImplicitReceiver),
    ThisReceiver(ThisReceiver),
    Chain(Chain),
    Conditional(Conditional),
    PropertyRead(PropertyRead),
    SafePropertyRead(SafePropertyRead),
    PropertyWrite(PropertyWrite),
    KeyedRead(KeyedRead),
    KeyedWrite(KeyedWrite),
    MethodCall(MethodCall),
    SafeMethodCall(SafeMethodCall),
    Call(Call),
    BindingPipe(BindingPipe),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Interpolation(Interpolation),
    Binary(Binary),
    PrefixNot(PrefixNot),
    NonNullAssert(NonNullAssert),
}

/// Empty expression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmptyExpr {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Receiver of a bare identifier; resolves against the component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplicitReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Explicit `this`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThisReceiver {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
}

/// Statements separated by `;` in an event handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

/// `condition ? true_exp : false_exp`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conditional {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub condition: Box<AST>,
    pub true_exp: Box<AST>,
    pub false_exp: Box<AST>,
}

/// `receiver.name`, or a bare `name` on the implicit receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// `receiver?.name`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafePropertyRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
}

/// `receiver.name = value`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
    pub value: Box<AST>,
}

/// `receiver[key]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedRead {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
}

/// `receiver[key] = value`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedWrite {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub key: Box<AST>,
    pub value: Box<AST>,
}

/// Method call (e.g., `obj.method(a, b)`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
    pub argument_span: AbsoluteSourceSpan,
}

/// Safe method call (e.g., `obj?.method(a, b)`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeMethodCall {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
    pub argument_span: AbsoluteSourceSpan,
}

/// Call of an arbitrary receiver (e.g., `fn(a, b)`, `getter()()`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub receiver: Box<AST>,
    pub args: Vec<AST>,
    pub argument_span: AbsoluteSourceSpan,
}

/// Pipe types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingPipeType {
    /// Looked up by the name used in the template.
    ReferencedByName,
    /// Pipe class referenced directly, as in standalone host bindings.
    ReferencedDirectly,
}

/// `exp | name:arg`. `name_span` covers the pipe name only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingPipe {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub name_span: AbsoluteSourceSpan,
    pub exp: Box<AST>,
    pub name: String,
    pub args: Vec<AST>,
    pub pipe_type: BindingPipeType,
}

/// Scalar literal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "literalType")]
pub enum LiteralPrimitive {
    String {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        value: String,
    },
    Number {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        value: f64,
    },
    Boolean {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        value: bool,
    },
    Null {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
    },
    Undefined {
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
    },
}

/// `[a, b]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralArray {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expressions: Vec<AST>,
}

/// Map literal key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralMapKey {
    pub key: String,
    pub quoted: bool,
}

/// `{key: value}`; `keys` and `values` are parallel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiteralMap {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<AST>,
}

/// Text with `{{ }}` holes: `strings` interleave with `expressions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpolation {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub strings: Vec<String>,
    pub expressions: Vec<AST>,
}

/// Binary operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binary {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub operation: String,
    pub left: Box<AST>,
    pub right: Box<AST>,
}

/// `!expression`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixNot {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

/// `expression!`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonNullAssert {
    pub span: ParseSpan,
    pub source_span: AbsoluteSourceSpan,
    pub expression: Box<AST>,
}

// Helper constructors
impl EmptyExpr {
    pub fn new(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        EmptyExpr { span, source_span }
    }
}

impl ImplicitReceiver {
    pub fn new(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        ImplicitReceiver { span, source_span }
    }
}

impl ThisReceiver {
    pub fn new(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        ThisReceiver { span, source_span }
    }
}

impl PropertyRead {
    pub fn new(
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        name_span: AbsoluteSourceSpan,
        receiver: Box<AST>,
        name: String,
    ) -> Self {
        PropertyRead {
            span,
            source_span,
            name_span,
            receiver,
            name,
        }
    }
}

impl PropertyWrite {
    pub fn new(
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        name_span: AbsoluteSourceSpan,
        receiver: Box<AST>,
        name: String,
        value: Box<AST>,
    ) -> Self {
        PropertyWrite {
            span,
            source_span,
            name_span,
            receiver,
            name,
            value,
        }
    }
}

impl MethodCall {
    pub fn new(
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        name_span: AbsoluteSourceSpan,
        receiver: Box<AST>,
        name: String,
        args: Vec<AST>,
        argument_span: AbsoluteSourceSpan,
    ) -> Self {
        MethodCall {
            span,
            source_span,
            name_span,
            receiver,
            name,
            args,
            argument_span,
        }
    }
}

impl BindingPipe {
    pub fn new(
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        name_span: AbsoluteSourceSpan,
        exp: Box<AST>,
        name: String,
        args: Vec<AST>,
    ) -> Self {
        BindingPipe {
            span,
            source_span,
            name_span,
            exp,
            name,
            args,
            pipe_type: BindingPipeType::ReferencedByName,
        }
    }
}

impl Binary {
    pub fn new(
        span: ParseSpan,
        source_span: AbsoluteSourceSpan,
        operation: String,
        left: Box<AST>,
        right: Box<AST>,
    ) -> Self {
        Binary {
            span,
            source_span,
            operation,
            left,
            right,
        }
    }
}

impl LiteralPrimitive {
    pub fn string(span: ParseSpan, source_span: AbsoluteSourceSpan, value: String) -> Self {
        LiteralPrimitive::String {
            span,
            source_span,
            value,
        }
    }

    pub fn number(span: ParseSpan, source_span: AbsoluteSourceSpan, value: f64) -> Self {
        LiteralPrimitive::Number {
            span,
            source_span,
            value,
        }
    }

    pub fn boolean(span: ParseSpan, source_span: AbsoluteSourceSpan, value: bool) -> Self {
        LiteralPrimitive::Boolean {
            span,
            source_span,
            value,
        }
    }

    pub fn null(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        LiteralPrimitive::Null { span, source_span }
    }

    pub fn undefined(span: ParseSpan, source_span: AbsoluteSourceSpan) -> Self {
        LiteralPrimitive::Undefined { span, source_span }
    }

    pub fn source_span(&self) -> AbsoluteSourceSpan {
        match self {
            LiteralPrimitive::String { source_span, .. }
            | LiteralPrimitive::Number { source_span, .. }
            | LiteralPrimitive::Boolean { source_span, .. }
            | LiteralPrimitive::Null { source_span, .. }
            | LiteralPrimitive::Undefined { source_span, .. } => *source_span,
        }
    }
}

macro_rules! dispatch_source_span {
    ($node:expr, [$($variant:ident),* $(,)?]) => {
        match $node {
            $(AST::$variant(e) => e.source_span,)*
            AST::LiteralPrimitive(e) => e.source_span(),
        }
    };
}

impl AST {
    pub fn source_span(&self) -> AbsoluteSourceSpan {
        dispatch_source_span!(
            self,
            [
                EmptyExpr,
                ImplicitReceiver,
                ThisReceiver,
                Chain,
                Conditional,
                PropertyRead,
                SafePropertyRead,
                PropertyWrite,
                KeyedRead,
                KeyedWrite,
                MethodCall,
                SafeMethodCall,
                Call,
                BindingPipe,
                LiteralArray,
                LiteralMap,
                Interpolation,
                Binary,
                PrefixNot,
                NonNullAssert,
            ]
        )
    }

    pub fn is_implicit_receiver(&self) -> bool {
        matches!(self, AST::ImplicitReceiver(_))
    }
}
