//! Weighted style descriptor sent to the generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected prompt weight.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("prompt weight must be positive and finite, got {0}")]
pub struct PromptWeightError(pub f32);

/// Immutable `(text, weight)` pair.
///
/// Duplicates are allowed; sending the same text twice simply adds emphasis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPrompt")]
pub struct WeightedPrompt {
    pub text: String,
    pub weight: f32,
}

#[derive(Deserialize)]
struct RawPrompt {
    text: String,
    weight: f32,
}

impl TryFrom<RawPrompt> for WeightedPrompt {
    type Error = PromptWeightError;

    fn try_from(raw: RawPrompt) -> Result<Self, Self::Error> {
        Self::try_new(raw.text, raw.weight)
    }
}

impl WeightedPrompt {
    /// For weights known to be valid, such as the composer's constants.
    pub fn new(text: impl Into<String>, weight: f32) -> Self {
        debug_assert!(is_valid_weight(weight), "prompt weight must be positive");
        Self {
            text: text.into(),
            weight,
        }
    }

    /// Validating constructor for weights from outside the crate graph.
    pub fn try_new(text: impl Into<String>, weight: f32) -> Result<Self, PromptWeightError> {
        if is_valid_weight(weight) {
            Ok(Self {
                text: text.into(),
                weight,
            })
        } else {
            Err(PromptWeightError(weight))
        }
    }

    pub fn has_valid_weight(&self) -> bool {
        is_valid_weight(self.weight)
    }

    /// Same text with its weight multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            text: self.text.clone(),
            weight: self.weight * factor,
        }
    }
}

fn is_valid_weight(weight: f32) -> bool {
    weight.is_finite() && weight > 0.0
}

impl From<(&str, f32)> for WeightedPrompt {
    fn from((text, weight): (&str, f32)) -> Self {
        Self::new(text, weight)
    }
}

impl fmt::Display for WeightedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.text, self.weight)
    }
}
