//! Engine configuration.

/// How `SET` extracts its value from the remainder of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueParsing {
    /// The value is exactly one whitespace-delimited token.
    #[default]
    SingleToken,
    /// The value is everything after the key, with surrounding whitespace
    /// trimmed.
    Remainder,
}

/// Configuration for a command engine.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How `SET` values are parsed.
    pub value_parsing: ValueParsing,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how `SET` values are parsed.
    #[must_use]
    pub const fn value_parsing(mut self, value_parsing: ValueParsing) -> Self {
        self.value_parsing = value_parsing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.value_parsing, ValueParsing::SingleToken);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().value_parsing(ValueParsing::Remainder);
        assert_eq!(config.value_parsing, ValueParsing::Remainder);
    }
}
