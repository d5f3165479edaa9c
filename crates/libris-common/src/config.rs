//! Configuration types for Libris
//!
//! This module defines configuration structures for the coordination core.

use serde::{Deserialize, Serialize};

/// Configuration for the request coordination core
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CoordinationConfig {
    /// Submission quota configuration
    pub quota: QuotaConfig,
}

/// Submission quota configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Submissions granted per member per request kind before exhaustion
    pub ceiling: i64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self { ceiling: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ceiling() {
        assert_eq!(QuotaConfig::default().ceiling, 5);
        assert_eq!(CoordinationConfig::default().quota.ceiling, 5);
    }
}
