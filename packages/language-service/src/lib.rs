/**
 * Angular Language Service - template resolution core
 *
 * Resolves editor positions to components and templates, converts template
 * and expression nodes to text spans, and attributes directive matches to
 * the tag name or attribute that caused them.
 */

// AST views over parser output
pub mod expression_parser;
pub mod parse_util;
pub mod render3;

// Selector matching
pub mod directive_matching;

// Language service queries
pub mod directive_attribution;
pub mod display_parts;
pub mod program;
pub mod template_info;
pub mod text_span;

// Ambient
pub mod config;
pub mod error;
pub mod logging;

// Re-exports
pub use config::LanguageServiceConfig;
pub use directive_attribution::{
    get_directive_matches_for_attribute, get_directive_matches_for_element_tag,
    make_element_selector, CssSelectorCapability, DirectiveAttribution, DirectiveDescriptor,
    DirectiveSet, DirectiveSymbol, HostNode, SelectorCapability,
};
pub use display_parts::{filter_alias_imports, SymbolDisplayPart};
pub use error::LanguageServiceError;
pub use program::{Declaration, DeclarationKind, SourceFile, TemplateCompiler};
pub use template_info::{TemplateInfo, TemplateLocator};
pub use text_span::{get_text_span_of_node, is_within, to_text_span, TargetNode, TextSpan};
