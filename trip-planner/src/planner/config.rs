//! Search configuration for the trip planner.

/// Configuration parameters for journey search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of state expansions before the search gives up.
    /// `None` means the search runs until the frontier is exhausted.
    ///
    /// Because revisiting cities is allowed, a plan whose required trips
    /// cannot all be completed would otherwise search forever.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Create a configuration with the given expansion cap.
    pub fn new(max_expansions: Option<usize>) -> Self {
        Self { max_expansions }
    }

    /// A configuration with no expansion cap.
    pub fn unbounded() -> Self {
        Self {
            max_expansions: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: Some(1_000_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_expansions, Some(1_000_000));
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(Some(50));
        assert_eq!(config.max_expansions, Some(50));

        let config = SearchConfig::unbounded();
        assert_eq!(config.max_expansions, None);
    }
}
