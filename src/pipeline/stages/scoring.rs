use crate::pipeline::config::ScoringWeights;
use crate::pipeline::types::{ColorSample, InteractiveElementRecord, LayoutKind, TypographyRecord};

/// Unweighted mean of whichever confidence factors apply, rounded to two
/// decimals. Advisory only.
pub fn overall_confidence(
    layout: Option<LayoutKind>,
    colors: &[ColorSample],
    typography: &[TypographyRecord],
    elements: &[InteractiveElementRecord],
    weights: &ScoringWeights,
) -> f64 {
    let mut factors = Vec::with_capacity(4);

    if layout.is_some() {
        factors.push(weights.layout);
    }
    if !colors.is_empty() {
        factors.push(colors.iter().map(|c| c.confidence).sum::<f64>() / colors.len() as f64);
    }
    if !typography.is_empty() {
        factors.push(weights.typography);
    }
    if !elements.is_empty() {
        factors.push(weights.elements);
    }

    let score = if factors.is_empty() {
        weights.neutral
    } else {
        factors.iter().sum::<f64>() / factors.len() as f64
    };

    round2(score.clamp(0.0, 1.0))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
