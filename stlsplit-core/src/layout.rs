/// Packing mesh groups into one upload with per-group draw ranges
use crate::geometry::{MeshGroup, VERTEX_STRIDE};

/// Fallback RGBA colours, one per texture slot, for when a texture is unavailable.
pub const FALLBACK_COLORS: [[u8; 4]; 10] = [
    [255, 200, 0, 255],   // yellow
    [180, 180, 180, 255], // gray
    [255, 180, 100, 255], // orange
    [80, 120, 220, 255],  // blue
    [220, 100, 50, 255],  // red
    [200, 180, 130, 255], // tan
    [230, 200, 150, 255], // pale yellow
    [100, 180, 230, 255], // cyan
    [50, 80, 200, 255],   // deep blue
    [180, 180, 200, 255], // light gray
];

/// A contiguous range of vertices inside a combined buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub first: usize,
    pub count: usize,
}

impl DrawRange {
    pub fn end(&self) -> usize {
        self.first + self.count
    }
}

/// Interleaved vertex data for all groups plus one draw range per group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackedGroups {
    pub data: Vec<f32>,
    pub ranges: Vec<DrawRange>,
}

impl PackedGroups {
    pub fn vertex_count(&self) -> usize {
        self.data.len() / VERTEX_STRIDE
    }
}

/// Concatenate groups in order. Empty groups get a zero-length range so that
/// range indices keep matching group indices.
pub fn pack_groups(groups: &[MeshGroup]) -> PackedGroups {
    let total: usize = groups.iter().map(MeshGroup::vertex_count).sum();
    let mut packed = PackedGroups {
        data: Vec::with_capacity(total * VERTEX_STRIDE),
        ranges: Vec::with_capacity(groups.len()),
    };

    let mut first = 0;
    for group in groups {
        let count = group.vertex_count();
        for vertex in &group.mesh.vertices {
            packed.data.extend_from_slice(&vertex.to_interleaved());
        }
        packed.ranges.push(DrawRange { first, count });
        first += count;
    }
    packed
}

/// Texture slot for a group; wraps when there are more groups than textures.
pub fn texture_slot(group_index: usize, texture_count: usize) -> Option<usize> {
    (texture_count > 0).then(|| group_index % texture_count)
}

pub fn fallback_color(slot: usize) -> [u8; 4] {
    FALLBACK_COLORS[slot % FALLBACK_COLORS.len()]
}
