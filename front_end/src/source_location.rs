use std::fmt;

/// Represents a region of source code with start and end positions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub source_file: Option<String>,
}

impl Span {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
            source_file: None,
        }
    }

    pub fn with_file(mut self, file: &str) -> Self {
        self.source_file = Some(file.to_string());
        self
    }

    /// Create a single-point span (for when we only have a position, not a range)
    pub fn point(line: usize, column: usize) -> Self {
        Self::new(line, column, line, column)
    }

    /// Span used for nodes the compiler synthesizes without any source text
    pub fn synthesized() -> Self {
        Self::point(0, 0)
    }

    pub fn is_synthesized(&self) -> bool {
        self.start_line == 0 && self.source_file.is_none()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.source_file {
            write!(f, "{}:{}:{}", file, self.start_line, self.start_column)
        } else if self.is_synthesized() {
            write!(f, "<compiler-generated>")
        } else {
            write!(f, "line {}:{}", self.start_line, self.start_column)
        }
    }
}

/// Trait for types that can provide source location information
pub trait HasSourceLocation {
    fn span(&self) -> &Span;
}
