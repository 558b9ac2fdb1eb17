/// stlsplit web - WASM bindings for the browser renderer
///
/// Decodes fetched STL bytes and hands back per-object vertex data ready for
/// a single buffer upload followed by one draw call per object.

use stlsplit_core::{
    parse_stl, pack_groups, texture_slot, ClusterConfig, ClusterStrategy, GreedyCenters,
    PackedGroups,
};
use wasm_bindgen::prelude::*;

/// A decoded STL scene split into objects
#[wasm_bindgen]
pub struct SolarSystemMesh {
    packed: PackedGroups,
    triangles: usize,
}

#[wasm_bindgen]
impl SolarSystemMesh {
    /// Decode and split with the default sampling stride and center distance.
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<SolarSystemMesh, JsValue> {
        Self::with_config(bytes, ClusterConfig::default(), false)
    }

    /// Decode and split with explicit clustering parameters.
    pub fn with_params(
        bytes: &[u8],
        sample_stride: usize,
        min_center_distance: f32,
        spherical_uv: bool,
    ) -> Result<SolarSystemMesh, JsValue> {
        let config = ClusterConfig::new(sample_stride, min_center_distance);
        Self::with_config(bytes, config, spherical_uv)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles
    }

    pub fn vertex_count(&self) -> usize {
        self.packed.vertex_count()
    }

    pub fn group_count(&self) -> usize {
        self.packed.ranges.len()
    }

    /// All vertices, group after group, as one interleaved buffer.
    pub fn vertices(&self) -> Vec<f32> {
        self.packed.data.clone()
    }

    /// Interleaved vertices of a single group; empty when `index` is out of range.
    pub fn group(&self, index: usize) -> Vec<f32> {
        match self.packed.ranges.get(index) {
            Some(range) => {
                let stride = stlsplit_core::VERTEX_STRIDE;
                self.packed.data[range.first * stride..range.end() * stride].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// First vertex of a group inside `vertices()`.
    pub fn group_first(&self, index: usize) -> usize {
        self.packed.ranges.get(index).map_or(0, |range| range.first)
    }

    /// Vertex count of a group.
    pub fn group_vertex_count(&self, index: usize) -> usize {
        self.packed.ranges.get(index).map_or(0, |range| range.count)
    }

    /// Texture for a group, wrapping when there are fewer textures than groups.
    /// Returns -1 when no textures are loaded.
    pub fn texture_slot(&self, index: usize, texture_count: usize) -> i32 {
        texture_slot(index, texture_count).map_or(-1, |slot| slot as i32)
    }
}

impl SolarSystemMesh {
    fn with_config(
        bytes: &[u8],
        config: ClusterConfig,
        spherical_uv: bool,
    ) -> Result<SolarSystemMesh, JsValue> {
        let stl = parse_stl(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut groups = GreedyCenters::new(config).cluster(&stl.mesh);
        if spherical_uv {
            for group in &mut groups {
                group.mesh.apply_spherical_uvs();
            }
        }

        log(&format!(
            "STL parsed: {} triangles, {} objects",
            stl.triangles,
            groups.len()
        ));

        Ok(SolarSystemMesh {
            packed: pack_groups(&groups),
            triangles: stl.triangles,
        })
    }
}

fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
