//! Lint configuration

/// Configuration for a single check group
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub enabled: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration for the whole lint pass
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    /// Reference integrity checks
    pub references: CheckConfig,
    /// Flow analysis checks
    pub flow: CheckConfig,
}
