//! Property tests for decoding and clustering invariants.

mod common;

use common::{binary_stl, Facet};
use proptest::prelude::*;
use stlsplit_core::geometry::{Mesh, Vertex};
use stlsplit_core::stl::{parse_binary_stl, BINARY_HEADER_LEN, BINARY_FACET_LEN};
use stlsplit_core::{ClusterConfig, ClusterStrategy, GreedyCenters};

fn coord() -> impl Strategy<Value = f32> {
    -200.0f32..200.0
}

fn point() -> impl Strategy<Value = [f32; 3]> {
    [coord(), coord(), coord()]
}

fn facet() -> impl Strategy<Value = Facet> {
    (point(), [point(), point(), point()])
}

fn mesh_from(points: &[[f32; 3]]) -> Mesh {
    points
        .iter()
        .map(|p| Vertex::new(p[0], p[1], p[2], 0.0, 1.0, 0.0))
        .collect()
}

proptest! {
    #[test]
    fn clustering_partitions_every_vertex(
        points in prop::collection::vec(point(), 0..300),
        stride in 0usize..20,
        min_distance in 0.5f32..80.0,
    ) {
        let mesh = mesh_from(&points);
        let groups = GreedyCenters::new(ClusterConfig::new(stride, min_distance)).cluster(&mesh);

        let total: usize = groups.iter().map(|g| g.vertex_count()).sum();
        prop_assert_eq!(total, mesh.vertex_count());
        prop_assert_eq!(groups.is_empty(), mesh.is_empty());

        // Tag each vertex with its index through the texcoord and check each shows up once.
        let mut tagged = mesh.clone();
        for (i, vertex) in tagged.vertices.iter_mut().enumerate() {
            vertex.tex_coord.x = i as f32;
        }
        let groups = GreedyCenters::new(ClusterConfig::new(stride, min_distance)).cluster(&tagged);
        let mut seen = vec![0u32; tagged.vertex_count()];
        for group in &groups {
            let mut last = None;
            for vertex in &group.mesh.vertices {
                let index = vertex.tex_coord.x as usize;
                seen[index] += 1;
                // Input order is preserved inside a group.
                prop_assert!(last.map_or(true, |prev| prev < index));
                last = Some(index);
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn centers_are_pairwise_far_apart(
        points in prop::collection::vec(point(), 1..200),
        min_distance in 0.5f32..80.0,
    ) {
        let samples = points.iter().map(|p| nalgebra::Point3::new(p[0], p[1], p[2]));
        let centers = stlsplit_core::cluster::select_centers(samples, min_distance);

        prop_assert!(!centers.is_empty());
        for (i, a) in centers.iter().enumerate() {
            for b in &centers[i + 1..] {
                prop_assert!(nalgebra::distance(a, b) >= min_distance);
            }
        }
    }

    #[test]
    fn truncated_binary_never_fails(
        facets in prop::collection::vec(facet(), 1..20),
        cut in 1usize..BINARY_FACET_LEN,
    ) {
        let declared = facets.len() as u32;
        let mut data = binary_stl(declared, &facets);
        data.truncate(data.len() - cut);

        let stl = parse_binary_stl(&data).unwrap();
        prop_assert_eq!(stl.mesh.vertex_count() % 3, 0);
        prop_assert!(stl.mesh.vertex_count() < 3 * facets.len());
        prop_assert_eq!(stl.triangles, (data.len() - BINARY_HEADER_LEN) / BINARY_FACET_LEN);
    }
}
