use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::error::StageError;
use crate::pipeline::config::ColorThresholds;
use crate::pipeline::types::{ColorSample, DecodedImage, UsageContext};
use crate::pipeline::vision::{KMeans, WeightedPoint};

/// Dominant colors of the image, most prominent first.
#[instrument(skip_all, fields(width = image.width, height = image.height))]
pub fn extract_colors(
    image: &DecodedImage,
    thresholds: &ColorThresholds,
) -> Result<Vec<ColorSample>, StageError> {
    let total = image.rgb.pixels().len() as f64;
    if total == 0.0 {
        return Err(StageError::Vision("image has no pixels".to_string()));
    }

    let points = color_histogram(image, thresholds.max_distinct_colors);
    let model = KMeans {
        clusters: thresholds.clusters,
        seed: thresholds.seed,
        restarts: thresholds.restarts,
        max_iterations: thresholds.max_iterations,
        tolerance: thresholds.tolerance,
    };
    let clusters = model.fit(&points);
    debug!(
        "{} distinct color bins -> {} clusters",
        points.len(),
        clusters.len()
    );

    let mut samples: Vec<ColorSample> = clusters
        .iter()
        .map(|cluster| {
            // Centers are truncated to integer channels
            let rgb = (
                cluster.center[0] as u8,
                cluster.center[1] as u8,
                cluster.center[2] as u8,
            );
            let share = cluster.weight / total;
            ColorSample::new(rgb, classify_usage(rgb, share, thresholds), share)
        })
        .collect();

    samples.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    samples.truncate(thresholds.max_samples);
    Ok(samples)
}

/// Usage heuristics, first match wins.
pub fn classify_usage(rgb: (u8, u8, u8), share: f64, thresholds: &ColorThresholds) -> UsageContext {
    let (r, g, b) = rgb;
    let spread = r.max(g).max(b) - r.min(g).min(b);

    if share > thresholds.background_min_share {
        UsageContext::Background
    } else if r < thresholds.text_max_channel
        && g < thresholds.text_max_channel
        && b < thresholds.text_max_channel
    {
        UsageContext::Text
    } else if (thresholds.accent_min_share..=thresholds.accent_max_share).contains(&share)
        && spread > thresholds.accent_min_spread
    {
        UsageContext::PrimaryAccent
    } else if spread < thresholds.border_max_spread {
        UsageContext::BorderDivider
    } else {
        UsageContext::UiElement
    }
}

/// Weighted distinct colors in ascending RGB order. When there are more than
/// `max_distinct` of them, colors are binned on progressively coarser
/// channel grids and each bin is represented by its weighted mean.
fn color_histogram(image: &DecodedImage, max_distinct: usize) -> Vec<WeightedPoint> {
    let mut counts: HashMap<[u8; 3], u64> = HashMap::new();
    for pixel in image.rgb.pixels() {
        *counts.entry(pixel.0).or_insert(0) += 1;
    }

    let mut shift = 0u32;
    let mut bins: Vec<([u8; 3], [f64; 3], f64)> = Vec::new();
    while shift < 8 {
        let mut merged: HashMap<[u8; 3], ([f64; 3], f64)> = HashMap::new();
        for (color, count) in &counts {
            let key = color.map(|channel| channel >> shift);
            let entry = merged.entry(key).or_insert(([0.0; 3], 0.0));
            for c in 0..3 {
                entry.0[c] += color[c] as f64 * *count as f64;
            }
            entry.1 += *count as f64;
        }

        bins = merged
            .into_iter()
            .map(|(key, (sums, weight))| (key, sums, weight))
            .collect();
        if bins.len() <= max_distinct.max(1) {
            break;
        }
        shift += 1;
    }

    bins.sort_by_key(|(key, _, _)| *key);
    bins.into_iter()
        .map(|(_, sums, weight)| WeightedPoint {
            value: [sums[0] / weight, sums[1] / weight, sums[2] / weight],
            weight,
        })
        .collect()
}
