//! Configuration checks.
//!
//! `check_config` rejects values that cannot work; `validate_config` reports settings that are
//! legal but probably not what the user meant.

use std::fmt;

use wf_fst::MAX_CODEPOINT;

use crate::{CompositionKind, Config, ConfigError};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The special label is also a codepoint, so real input can collide with it.
    SpecialLabelIsCodepoint {
        /// The configured label.
        label: i64,
    },
    /// Multi-eps labels are set but the multi-eps stack is not selected.
    MultiEpsLabelsUnused {
        /// The selected stack.
        composition: CompositionKind,
    },
    /// The multi-eps stack is selected without any labels.
    NoMultiEpsLabels,
    /// A threshold at or below 1 sends every query to binary search.
    AlwaysBinarySearch,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpecialLabelIsCodepoint { label } => {
                write!(f, "special label {label} is a valid codepoint and may collide with input")
            }
            Self::MultiEpsLabelsUnused { composition } => {
                write!(f, "multi_eps_labels has no effect with composition '{composition}'")
            }
            Self::NoMultiEpsLabels => {
                write!(f, "composition 'multi_eps' without multi_eps_labels behaves like 'plain'")
            }
            Self::AlwaysBinarySearch => {
                write!(f, "binary_search_threshold <= 1 disables linear search")
            }
        }
    }
}

/// Rejects values that no component can work with.
pub fn check_config(config: &Config) -> Result<(), ConfigError> {
    if config.compiler.max_states == 0 {
        return Err(ConfigError::InvalidValue {
            field: "compiler.max_states",
            message: "must be at least 1".into(),
        });
    }

    let matcher = &config.matcher;
    if matcher.composition.uses_special_label() && matcher.special_label <= 0 {
        return Err(ConfigError::InvalidValue {
            field: "matcher.special_label",
            message: format!(
                "{} is reserved; {} needs a positive label",
                matcher.special_label, matcher.composition
            ),
        });
    }
    if let Some(label) = matcher.multi_eps_labels.iter().find(|&&l| l <= 0) {
        return Err(ConfigError::InvalidValue {
            field: "matcher.multi_eps_labels",
            message: format!("{label} is reserved"),
        });
    }
    Ok(())
}

/// Reports settings that are legal but probably unintended.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let matcher = &config.matcher;

    if matcher.composition.uses_special_label()
        && (1..=i64::from(MAX_CODEPOINT)).contains(&matcher.special_label)
    {
        warnings.push(ConfigWarning::SpecialLabelIsCodepoint {
            label: matcher.special_label,
        });
    }

    if matcher.composition == CompositionKind::MultiEps {
        if matcher.multi_eps_labels.is_empty() {
            warnings.push(ConfigWarning::NoMultiEpsLabels);
        }
    } else if !matcher.multi_eps_labels.is_empty() {
        warnings.push(ConfigWarning::MultiEpsLabelsUnused {
            composition: matcher.composition,
        });
    }

    if matcher.binary_search_threshold <= 1 {
        warnings.push(ConfigWarning::AlwaysBinarySearch);
    }

    warnings
}
