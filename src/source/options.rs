//! Extraction options.

/// Options for pulling spans out of a document.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Which extraction paths to try
    pub mode: ExtractMode,

    /// Error handling for individual pages
    pub error_mode: ErrorMode,

    /// Whether to process documents in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extract mode.
    pub fn with_mode(mut self, mode: ExtractMode) -> Self {
        self.mode = mode;
        self
    }

    /// Extract plain line text only (no font metadata).
    pub fn plain_only(mut self) -> Self {
        self.mode = ExtractMode::PlainOnly;
        self
    }

    /// Fail the rich path on the first bad page instead of skipping it.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            mode: ExtractMode::Auto,
            error_mode: ErrorMode::Lenient,
            parallel: true,
        }
    }
}

/// Error handling mode for per-page failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any page error
    Strict,
    /// Skip the failing page and continue
    #[default]
    Lenient,
}

/// Which extraction paths to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMode {
    /// Rich spans first, plain text when rich extraction fails or is empty
    #[default]
    Auto,
    /// Rich spans only
    RichOnly,
    /// Plain line text only
    PlainOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new().plain_only().strict().sequential();

        assert_eq!(options.mode, ExtractMode::PlainOnly);
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.mode, ExtractMode::Auto);
        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(options.parallel);
    }
}
