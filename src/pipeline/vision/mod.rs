//! Low-level image routines shared by the extraction stages.
pub mod circles;
pub mod contours;
pub mod edges;
pub mod kmeans;
pub mod lines;
pub mod morphology;
pub mod threshold;

pub use circles::{detect_circles, Circle, CircleRules};
pub use contours::{
    approximate_closed_polygon, arc_length, bounding_rect, contour_area, external_contours,
    BoundingRect,
};
pub use edges::{edge_map, region_mean};
pub use kmeans::{Cluster, KMeans, WeightedPoint};
pub use lines::{count_segments, SegmentRules};
pub use morphology::{open_with_line, Orientation};
pub use threshold::adaptive_gaussian_threshold;
