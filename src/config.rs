//! This module contains the configuration struct for the totalfit.toml file.

use serde::{Deserialize, Serialize};

use crate::optimizer::OptimizerOptions;
use crate::tokenizer::TokenizeOptions;
use crate::units::Pt;

/// This structure holds all the configuration needed to tokenize and break
/// a paragraph, loadable from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakingConfig {
    /// The target width lines are justified to.
    pub line_width: f64,

    /// Maximum adjustment ratio magnitude a line may still be considered
    /// feasible at.
    pub threshold: f64,

    /// Extra demerits added when two adjacent chosen breaks are both
    /// flagged penalties.
    pub flagged_penalty: f64,

    /// Extra demerits added when adjacent lines jump by more than one
    /// fitness class.
    pub fitness_penalty: f64,

    /// Dominance-pruning parameter. `+inf` disables pruning.
    pub gamma: f64,

    /// Width of the first-line indent.
    pub indent: f64,

    /// Whether words without an explicit hyphen are offered to the
    /// hyphenation oracle.
    pub hyphenation: bool,
}

impl Default for BreakingConfig {
    fn default() -> BreakingConfig {
        let optimizer = OptimizerOptions::default();

        BreakingConfig {
            line_width: optimizer.line_width.0,
            threshold: optimizer.threshold,
            flagged_penalty: optimizer.flagged_penalty,
            fitness_penalty: optimizer.fitness_penalty,
            gamma: optimizer.gamma,
            indent: 0.0,
            hyphenation: false,
        }
    }
}

impl BreakingConfig {
    /// Parses a configuration from the contents of a TOML file.
    pub fn from_toml(contents: &str) -> crate::Result<BreakingConfig> {
        toml::from_str(contents)
            .map_err(|e| crate::error::Error::InvariantViolation(format!("invalid config: {}", e)))
    }

    /// Splits this configuration into its tokenizer and optimizer halves.
    pub fn split(&self) -> (TokenizeOptions, OptimizerOptions) {
        let tokenize = TokenizeOptions {
            indent: Pt(self.indent),
            hyphenation: self.hyphenation,
        };

        let optimizer = OptimizerOptions {
            line_width: Pt(self.line_width),
            threshold: self.threshold,
            flagged_penalty: self.flagged_penalty,
            fitness_penalty: self.fitness_penalty,
            gamma: self.gamma,
        };

        (tokenize, optimizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_optimizer_defaults() {
        let config = BreakingConfig::default();
        let (_, opts) = config.split();
        assert_eq!(opts.threshold, 5.0);
        assert_eq!(opts.flagged_penalty, 3000.0);
        assert_eq!(opts.fitness_penalty, 100.0);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = BreakingConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed = BreakingConfig::from_toml(&serialized).unwrap();
        assert_eq!(parsed.line_width, config.line_width);
    }
}
