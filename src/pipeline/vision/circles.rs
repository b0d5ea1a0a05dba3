use std::f64::consts::{PI, TAU};

use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;
use imageproc::gradients::{horizontal_sobel, vertical_sobel};

use super::edges::edge_map;
use crate::pipeline::config::EdgeThresholds;

/// Smoothing applied before taking gradient directions.
const GRADIENT_SIGMA: f32 = 1.0;
/// Angular sectors used to measure how much of a ring is drawn.
const ARC_SECTORS: usize = 36;
/// Largest angle, in degrees, between an edge gradient and the radius for the
/// pixel to count as part of the ring.
const RADIAL_TOLERANCE_DEG: f64 = 15.0;

struct EdgePoint {
    x: i64,
    y: i64,
    ux: f64,
    uy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub x: i32,
    pub y: i32,
    pub radius: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRules {
    /// Upper Canny threshold; the lower one is half of it.
    pub edge_high: f32,
    pub vote_threshold: u32,
    pub min_distance: f64,
    pub min_radius: u32,
    pub max_radius: u32,
    /// Share of the ring's angular sectors that must hold an edge pixel.
    pub min_arc_fraction: f64,
}

/// Gradient Hough transform for circles.
///
/// Every edge pixel votes for centres along its gradient direction, in both
/// senses, at every radius of the allowed range. Votes are pooled over a 3x3
/// neighbourhood, so centres that land on adjacent cells still add up. Local
/// maxima above the vote threshold become centre candidates, strongest first;
/// candidates closer than `min_distance` to an accepted centre are skipped.
///
/// The radius of a centre is the distance shared by most edge pixels. A
/// centre is only kept when edge pixels at that radius, with gradients along
/// the radius, are spread over enough of the ring. The middle of a square
/// only sees such pixels near the four points where its sides touch the ring.
pub fn detect_circles(gray: &GrayImage, rules: CircleRules) -> Vec<Circle> {
    let (width, height) = gray.dimensions();
    let edges = edge_map(
        gray,
        EdgeThresholds {
            low: rules.edge_high / 2.0,
            high: rules.edge_high,
        },
    );
    let smoothed = gaussian_blur_f32(gray, GRADIENT_SIGMA);
    let gx = horizontal_sobel(&smoothed);
    let gy = vertical_sobel(&smoothed);
    let (w, h) = (width as i64, height as i64);

    let mut edge_points = Vec::new();
    let mut accumulator = vec![0u32; (width * height) as usize];

    for (x, y, pixel) in edges.enumerate_pixels() {
        if pixel[0] == 0 {
            continue;
        }
        let dx = gx.get_pixel(x, y)[0] as f64;
        let dy = gy.get_pixel(x, y)[0] as f64;
        let magnitude = (dx * dx + dy * dy).sqrt();
        if magnitude == 0.0 {
            continue;
        }
        let (x, y) = (x as i64, y as i64);
        let (ux, uy) = (dx / magnitude, dy / magnitude);
        edge_points.push(EdgePoint { x, y, ux, uy });
        for r in rules.min_radius..=rules.max_radius {
            for sign in [-1.0, 1.0] {
                let cx = (x as f64 + sign * r as f64 * ux).round() as i64;
                let cy = (y as f64 + sign * r as f64 * uy).round() as i64;
                if cx >= 0 && cx < w && cy >= 0 && cy < h {
                    accumulator[(cy * w + cx) as usize] += 1;
                }
            }
        }
    }

    let pooled = pool(&accumulator, w, h);
    let votes_at = |x: i64, y: i64| -> u32 {
        if x < 0 || x >= w || y < 0 || y >= h {
            0
        } else {
            pooled[(y * w + x) as usize]
        }
    };

    let mut candidates = Vec::new();
    for y in 0..h {
        for x in 0..w {
            let votes = votes_at(x, y);
            if votes > rules.vote_threshold
                && votes > votes_at(x - 1, y)
                && votes >= votes_at(x + 1, y)
                && votes > votes_at(x, y - 1)
                && votes >= votes_at(x, y + 1)
            {
                candidates.push((x, y, votes));
            }
        }
    }
    candidates.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)).then(a.0.cmp(&b.0)));

    let mut circles: Vec<Circle> = Vec::new();
    for (cx, cy, _) in candidates {
        let too_close = circles.iter().any(|c| {
            let dx = (c.x as i64 - cx) as f64;
            let dy = (c.y as i64 - cy) as f64;
            (dx * dx + dy * dy).sqrt() < rules.min_distance
        });
        if too_close {
            continue;
        }
        if let Some(radius) = estimate_radius(&edge_points, cx, cy, rules) {
            circles.push(Circle {
                x: cx as i32,
                y: cy as i32,
                radius,
            });
        }
    }

    circles
}

/// Sum of every 3x3 neighbourhood, zero outside the image.
fn pool(accumulator: &[u32], w: i64, h: i64) -> Vec<u32> {
    let mut pooled = vec![0u32; accumulator.len()];
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0;
            for ny in (y - 1).max(0)..=(y + 1).min(h - 1) {
                for nx in (x - 1).max(0)..=(x + 1).min(w - 1) {
                    sum += accumulator[(ny * w + nx) as usize];
                }
            }
            pooled[(y * w + x) as usize] = sum;
        }
    }
    pooled
}

fn estimate_radius(edge_points: &[EdgePoint], cx: i64, cy: i64, rules: CircleRules) -> Option<u32> {
    let bins = (rules.max_radius - rules.min_radius + 1) as usize;
    let mut histogram = vec![0u32; bins];

    for point in edge_points {
        let dx = (point.x - cx) as f64;
        let dy = (point.y - cy) as f64;
        let distance = (dx * dx + dy * dy).sqrt().round() as i64;
        if distance >= rules.min_radius as i64 && distance <= rules.max_radius as i64 {
            histogram[(distance - rules.min_radius as i64) as usize] += 1;
        }
    }

    // A digitised ring spreads over neighbouring distances.
    let band = |i: usize| -> u32 {
        let below = if i > 0 { histogram[i - 1] } else { 0 };
        let above = histogram.get(i + 1).copied().unwrap_or(0);
        below + histogram[i] + above
    };
    let (bin, support) = (0..bins)
        .map(|i| (i, band(i)))
        .fold((0, 0), |best, (i, count)| if count > best.1 { (i, count) } else { best });

    let radius = rules.min_radius + bin as u32;
    if support <= rules.vote_threshold {
        return None;
    }

    let min_alignment = RADIAL_TOLERANCE_DEG.to_radians().cos();
    let mut sectors = [false; ARC_SECTORS];
    for point in edge_points {
        let dx = (point.x - cx) as f64;
        let dy = (point.y - cy) as f64;
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 || (length.round() as i64 - radius as i64).abs() > 1 {
            continue;
        }
        let alignment = (dx * point.ux + dy * point.uy).abs() / length;
        if alignment >= min_alignment {
            let turn = (dy.atan2(dx) + PI) / TAU;
            sectors[(turn * ARC_SECTORS as f64) as usize % ARC_SECTORS] = true;
        }
    }
    let covered = sectors.iter().filter(|&&hit| hit).count();

    (covered as f64 >= rules.min_arc_fraction * ARC_SECTORS as f64).then_some(radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const RULES: CircleRules = CircleRules {
        edge_high: 50.0,
        vote_threshold: 30,
        min_distance: 30.0,
        min_radius: 10,
        max_radius: 100,
        min_arc_fraction: 0.6,
    };

    fn disc(width: u32, height: u32, cx: i64, cy: i64, r: i64) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            let dx = x as i64 - cx;
            let dy = y as i64 - cy;
            if dx * dx + dy * dy <= r * r {
                Luma([20])
            } else {
                Luma([240])
            }
        })
    }

    #[test]
    fn finds_single_disc_with_close_radius() {
        let img = disc(200, 160, 90, 80, 30);
        let circles = detect_circles(&img, RULES);
        assert_eq!(circles.len(), 1);
        let circle = circles[0];
        assert!((circle.x - 90).abs() <= 2, "x = {}", circle.x);
        assert!((circle.y - 80).abs() <= 2, "y = {}", circle.y);
        assert!((circle.radius as i32 - 30).abs() <= 2, "r = {}", circle.radius);
    }

    #[test]
    fn square_is_not_a_circle() {
        let img = GrayImage::from_fn(200, 200, |x, y| {
            if (70..130).contains(&x) && (70..130).contains(&y) {
                Luma([20])
            } else {
                Luma([240])
            }
        });
        assert!(detect_circles(&img, RULES).is_empty());
    }

    #[test]
    fn flat_image_has_no_circles() {
        let img = GrayImage::from_pixel(120, 120, Luma([200]));
        assert!(detect_circles(&img, RULES).is_empty());
    }
}
