use rand::{rngs::StdRng, Rng, SeedableRng};

/// A color (or any 3-vector) with the number of pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub value: [f64; 3],
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub center: [f64; 3],
    pub weight: f64,
}

/// Weighted Lloyd k-means with k-means++ seeding and a fixed seed, so the
/// same input always yields the same clusters.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub clusters: usize,
    pub seed: u64,
    pub restarts: usize,
    pub max_iterations: usize,
    /// Convergence threshold relative to the mean per-channel variance.
    pub tolerance: f64,
}

impl KMeans {
    /// Cluster `points`. Returns at most `clusters` non-empty clusters; fewer
    /// when there are fewer distinct points.
    pub fn fit(&self, points: &[WeightedPoint]) -> Vec<Cluster> {
        let total_weight: f64 = points.iter().map(|p| p.weight).sum();
        if points.is_empty() || total_weight <= 0.0 || self.clusters == 0 {
            return Vec::new();
        }

        let k = self.clusters.min(points.len());
        let threshold = self.tolerance * mean_variance(points, total_weight);
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut best: Option<(f64, Vec<Cluster>)> = None;
        for _ in 0..self.restarts.max(1) {
            let centers = seed_centers(points, k, &mut rng);
            let (inertia, clusters) = self.lloyd(points, centers, threshold);
            let better = best
                .as_ref()
                .map_or(true, |(best_inertia, _)| inertia < *best_inertia);
            if better {
                best = Some((inertia, clusters));
            }
        }

        best.map(|(_, clusters)| clusters)
            .unwrap_or_default()
            .into_iter()
            .filter(|cluster| cluster.weight > 0.0)
            .collect()
    }

    fn lloyd(&self, points: &[WeightedPoint], mut centers: Vec<[f64; 3]>, threshold: f64) -> (f64, Vec<Cluster>) {
        let mut labels = vec![0usize; points.len()];

        for _ in 0..self.max_iterations {
            for (label, point) in labels.iter_mut().zip(points) {
                *label = nearest(&centers, &point.value).0;
            }

            let mut sums = vec![[0f64; 3]; centers.len()];
            let mut weights = vec![0f64; centers.len()];
            for (label, point) in labels.iter().zip(points) {
                for c in 0..3 {
                    sums[*label][c] += point.value[c] * point.weight;
                }
                weights[*label] += point.weight;
            }

            let mut shift = 0.0;
            for (i, center) in centers.iter_mut().enumerate() {
                if weights[i] <= 0.0 {
                    continue;
                }
                let updated = [
                    sums[i][0] / weights[i],
                    sums[i][1] / weights[i],
                    sums[i][2] / weights[i],
                ];
                shift += squared_distance(center, &updated);
                *center = updated;
            }

            if shift <= threshold {
                break;
            }
        }

        let mut weights = vec![0f64; centers.len()];
        let mut inertia = 0.0;
        for point in points {
            let (label, distance) = nearest(&centers, &point.value);
            weights[label] += point.weight;
            inertia += distance * point.weight;
        }

        let clusters = centers
            .into_iter()
            .zip(weights)
            .map(|(center, weight)| Cluster { center, weight })
            .collect();
        (inertia, clusters)
    }
}

/// k-means++ seeding: the first centre is drawn by weight, each following
/// one by weight times squared distance to the nearest chosen centre.
fn seed_centers(points: &[WeightedPoint], k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let mut centers = vec![points[weighted_pick(points.iter().map(|p| p.weight), rng)].value];

    while centers.len() < k {
        let scores: Vec<f64> = points
            .iter()
            .map(|p| p.weight * nearest(&centers, &p.value).1)
            .collect();
        if scores.iter().sum::<f64>() <= 0.0 {
            break;
        }
        centers.push(points[weighted_pick(scores.into_iter(), rng)].value);
    }

    centers
}

fn weighted_pick(weights: impl Iterator<Item = f64> + Clone, rng: &mut StdRng) -> usize {
    let total: f64 = weights.clone().sum();
    let target = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, weight) in weights.enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = i;
        if target < cumulative {
            return i;
        }
    }
    last_positive
}

fn nearest(centers: &[[f64; 3]], value: &[f64; 3]) -> (usize, f64) {
    centers
        .iter()
        .enumerate()
        .map(|(i, c)| (i, squared_distance(c, value)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (0..3).map(|c| (a[c] - b[c]).powi(2)).sum()
}

fn mean_variance(points: &[WeightedPoint], total_weight: f64) -> f64 {
    let mut mean = [0f64; 3];
    for p in points {
        for c in 0..3 {
            mean[c] += p.value[c] * p.weight / total_weight;
        }
    }
    let mut variance = 0.0;
    for p in points {
        variance += squared_distance(&p.value, &mean) * p.weight / total_weight;
    }
    variance / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(clusters: usize) -> KMeans {
        KMeans {
            clusters,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }

    fn point(value: [f64; 3], weight: f64) -> WeightedPoint {
        WeightedPoint { value, weight }
    }

    #[test]
    fn fewer_distinct_points_than_clusters_yields_one_cluster_each() {
        let points = vec![
            point([255.0, 255.0, 255.0], 40.0),
            point([0.0, 0.0, 0.0], 35.0),
            point([33.0, 150.0, 243.0], 25.0),
        ];
        let mut clusters = model(8).fit(&points);
        clusters.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].center, [255.0, 255.0, 255.0]);
        assert_eq!(clusters[2].weight, 25.0);
    }

    #[test]
    fn separates_two_groups() {
        let points = vec![
            point([10.0, 10.0, 10.0], 5.0),
            point([12.0, 10.0, 10.0], 5.0),
            point([240.0, 240.0, 240.0], 3.0),
            point([244.0, 240.0, 240.0], 3.0),
        ];
        let mut clusters = model(2).fit(&points);
        clusters.sort_by(|a, b| a.center[0].partial_cmp(&b.center[0]).unwrap());
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].center[0], 11.0);
        assert_eq!(clusters[1].center[0], 242.0);
        assert_eq!(clusters[1].weight, 6.0);
    }

    #[test]
    fn same_seed_same_clusters() {
        let points: Vec<WeightedPoint> = (0..60)
            .map(|i| point([(i * 7 % 255) as f64, (i * 13 % 255) as f64, (i * 29 % 255) as f64], 1.0 + (i % 3) as f64))
            .collect();
        assert_eq!(model(5).fit(&points), model(5).fit(&points));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(model(8).fit(&[]).is_empty());
    }
}
