//! Heatmap buckets for correlation values

use serde::{Deserialize, Serialize};

/// Correlation strength bucket used to colour heatmap cells
///
/// Thresholds are inclusive lower bounds checked from the top down, so `0.75`
/// is already [`CorrelationBand::StrongPositive`] and `-0.25` is still
/// [`CorrelationBand::Neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum CorrelationBand {
    StrongPositive,
    MediumPositive,
    WeakPositive,
    Neutral,
    WeakNegative,
    MediumNegative,
    StrongNegative,
}

impl CorrelationBand {
    /// Every band in legend order, strongest positive first
    pub const ALL: [CorrelationBand; 7] = [
        CorrelationBand::StrongPositive,
        CorrelationBand::MediumPositive,
        CorrelationBand::WeakPositive,
        CorrelationBand::Neutral,
        CorrelationBand::WeakNegative,
        CorrelationBand::MediumNegative,
        CorrelationBand::StrongNegative,
    ];

    pub fn classify(value: f64) -> Self {
        if value >= 0.75 {
            CorrelationBand::StrongPositive
        } else if value >= 0.5 {
            CorrelationBand::MediumPositive
        } else if value >= 0.25 {
            CorrelationBand::WeakPositive
        } else if value >= -0.25 {
            CorrelationBand::Neutral
        } else if value >= -0.5 {
            CorrelationBand::WeakNegative
        } else if value >= -0.75 {
            CorrelationBand::MediumNegative
        } else {
            CorrelationBand::StrongNegative
        }
    }

    /// Legend text, including the value range the band covers
    pub fn label(&self) -> &'static str {
        match self {
            CorrelationBand::StrongPositive => "Strong Positive (0.75-1.0)",
            CorrelationBand::MediumPositive => "Medium Positive (0.5-0.75)",
            CorrelationBand::WeakPositive => "Weak Positive (0.25-0.5)",
            CorrelationBand::Neutral => "No Correlation (-0.25-0.25)",
            CorrelationBand::WeakNegative => "Weak Negative (-0.5--0.25)",
            CorrelationBand::MediumNegative => "Medium Negative (-0.75--0.5)",
            CorrelationBand::StrongNegative => "Strong Negative (-1.0--0.75)",
        }
    }
}
