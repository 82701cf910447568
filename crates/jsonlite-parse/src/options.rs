//! Parser configuration.

/// Options for [`Parser`](crate::Parser).
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Deepest allowed object nesting, counting the outermost object as one
    /// (default: 128). Each nested object costs one level of recursion.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

impl ParseOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
