/// Splitting a triangle soup into spatially separated objects
use nalgebra::{distance, Point3};
use tracing::debug;

use crate::geometry::{Mesh, MeshGroup};

/// Every n-th vertex is considered as a potential center.
pub const DEFAULT_SAMPLE_STRIDE: usize = 100;

/// Minimum distance between two accepted centers, in model units.
pub const DEFAULT_MIN_CENTER_DISTANCE: f32 = 10.0;

/// Tuning for the greedy clusterer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterConfig {
    pub sample_stride: usize,
    pub min_center_distance: f32,
}

impl ClusterConfig {
    pub fn new(sample_stride: usize, min_center_distance: f32) -> Self {
        Self {
            sample_stride,
            min_center_distance,
        }
    }

    pub fn with_sample_stride(mut self, sample_stride: usize) -> Self {
        self.sample_stride = sample_stride;
        self
    }

    pub fn with_min_center_distance(mut self, min_center_distance: f32) -> Self {
        self.min_center_distance = min_center_distance;
        self
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_STRIDE, DEFAULT_MIN_CENTER_DISTANCE)
    }
}

/// Partitions a vertex buffer into object groups.
///
/// Implementations must place every input vertex in exactly one group.
pub trait ClusterStrategy {
    fn cluster(&self, mesh: &Mesh) -> Vec<MeshGroup>;
}

/// Greedy center sampling followed by nearest-center assignment.
///
/// The result depends on vertex order: the first sample is always a center
/// and later samples only become centers if they are far from all earlier ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyCenters {
    pub config: ClusterConfig,
}

impl GreedyCenters {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }
}

impl ClusterStrategy for GreedyCenters {
    fn cluster(&self, mesh: &Mesh) -> Vec<MeshGroup> {
        let samples = sample_positions(mesh, self.config.sample_stride);
        let centers = select_centers(samples, self.config.min_center_distance);
        debug!(centers = centers.len(), "found object centers");

        let groups = assign_to_centers(mesh, &centers);
        debug!(
            sizes = ?groups.iter().map(MeshGroup::vertex_count).collect::<Vec<_>>(),
            "mesh group sizes"
        );
        groups
    }
}

/// Cluster with the default stride and distance.
pub fn cluster(mesh: &Mesh) -> Vec<MeshGroup> {
    GreedyCenters::default().cluster(mesh)
}

/// Positions of vertices `0, stride, 2 * stride, ...`.
///
/// Meshes with fewer vertices than `stride` are sampled in full, as is any
/// mesh when the stride is zero.
pub fn sample_positions(mesh: &Mesh, stride: usize) -> Vec<Point3<f32>> {
    let stride = if mesh.vertex_count() < stride {
        1
    } else {
        stride.max(1)
    };
    mesh.vertices
        .iter()
        .step_by(stride)
        .map(|v| v.position)
        .collect()
}

/// Accept samples, in order, that are at least `min_distance` away from every accepted center.
pub fn select_centers<I>(samples: I, min_distance: f32) -> Vec<Point3<f32>>
where
    I: IntoIterator<Item = Point3<f32>>,
{
    let mut centers: Vec<Point3<f32>> = Vec::new();
    for sample in samples {
        let too_close = centers
            .iter()
            .any(|center| distance(&sample, center) < min_distance);
        if !too_close {
            centers.push(sample);
        }
    }
    centers
}

/// Index of the nearest center; the lowest index wins ties.
pub fn nearest_center(position: &Point3<f32>, centers: &[Point3<f32>]) -> usize {
    let mut nearest = 0;
    let mut min_dist = f32::INFINITY;
    for (index, center) in centers.iter().enumerate() {
        let dist = distance(position, center);
        if dist < min_dist {
            min_dist = dist;
            nearest = index;
        }
    }
    nearest
}

/// Move every vertex into the group of its nearest center.
///
/// One group is returned per center, in center order, even when a group ends
/// up empty. Vertices keep their relative order within a group.
pub fn assign_to_centers(mesh: &Mesh, centers: &[Point3<f32>]) -> Vec<MeshGroup> {
    let mut groups: Vec<MeshGroup> = centers.iter().copied().map(MeshGroup::new).collect();
    if groups.is_empty() {
        return groups;
    }

    for vertex in &mesh.vertices {
        let index = nearest_center(&vertex.position, centers);
        groups[index].mesh.push_vertex(*vertex);
    }
    groups
}
