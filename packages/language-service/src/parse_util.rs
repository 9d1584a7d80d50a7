//! Parse Utilities
//!
//! Source files, locations and spans as produced by the template parser.
//! Only the read side lives here: the language service never builds templates
//! itself, it receives these spans attached to already-parsed nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
}

impl ParseSourceFile {
    pub fn new(content: impl Into<String>, url: impl Into<String>) -> Self {
        ParseSourceFile {
            content: content.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseLocation {
    pub file: ParseSourceFile,
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(file: ParseSourceFile, offset: usize, line: usize, col: usize) -> Self {
        ParseLocation {
            file,
            offset,
            line,
            col,
        }
    }

    /// Build a location for `offset`, deriving the zero-based line and column
    /// from the file content. Offsets past the end are clamped.
    pub fn at_offset(file: ParseSourceFile, offset: usize) -> Self {
        let offset = offset.min(file.content.len());
        let mut line = 0;
        let mut col = 0;
        for &ch in &file.content.as_bytes()[..offset] {
            if ch == b'\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        ParseLocation::new(file, offset, line, col)
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.file.url, self.line, self.col)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
    pub details: Option<String>,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan {
            start,
            end,
            details: None,
        }
    }

    /// Span over `[start, end)` of `file`.
    pub fn from_offsets(file: &ParseSourceFile, start: usize, end: usize) -> Self {
        ParseSourceSpan::new(
            ParseLocation::at_offset(file.clone(), start),
            ParseLocation::at_offset(file.clone(), end),
        )
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The source text covered by this span, or an empty string when the
    /// offsets do not fall on the file content.
    pub fn text(&self) -> &str {
        self.start
            .file
            .content
            .get(self.start.offset..self.end.offset)
            .unwrap_or("")
    }
}

impl fmt::Display for ParseSourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
