/// Geometry primitives for decoded STL meshes
use nalgebra::{Point3, Vector2, Vector3};

/// Number of `f32` values per vertex in the interleaved layout:
/// position (3), normal (3), texture coordinate (2).
pub const VERTEX_STRIDE: usize = 8;

/// A vertex with position, normal and texture coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub tex_coord: Vector2<f32>,
}

impl Vertex {
    /// Create a vertex with a zero texture coordinate.
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self::with_normal(Point3::new(x, y, z), Vector3::new(nx, ny, nz))
    }

    pub fn with_normal(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position,
            normal,
            tex_coord: Vector2::zeros(),
        }
    }

    /// Read one vertex from an interleaved record of `VERTEX_STRIDE` floats.
    pub fn from_interleaved(record: &[f32; VERTEX_STRIDE]) -> Self {
        Self {
            position: Point3::new(record[0], record[1], record[2]),
            normal: Vector3::new(record[3], record[4], record[5]),
            tex_coord: Vector2::new(record[6], record[7]),
        }
    }

    pub fn to_interleaved(&self) -> [f32; VERTEX_STRIDE] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.normal.x,
            self.normal.y,
            self.normal.z,
            self.tex_coord.x,
            self.tex_coord.y,
        ]
    }
}

/// A triangle face defined by three vertices sharing one facet normal
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Build a flat-shaded facet: every corner gets `normal`.
    pub fn flat(normal: Vector3<f32>, corners: [Point3<f32>; 3]) -> Self {
        Self {
            vertices: corners.map(|corner| Vertex::with_normal(corner, normal)),
        }
    }
}

/// A flat vertex buffer; every three consecutive vertices form a triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Reserve room for `triangles` triangles.
    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.vertices.extend_from_slice(&triangle.vertices);
    }

    pub fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of complete triangles in the buffer.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex]> + '_ {
        self.vertices.chunks_exact(3)
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Flatten into the interleaved `px,py,pz,nx,ny,nz,tu,tv` layout.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * VERTEX_STRIDE);
        for vertex in &self.vertices {
            data.extend_from_slice(&vertex.to_interleaved());
        }
        data
    }

    /// Rebuild a mesh from interleaved floats. A trailing partial record is dropped.
    pub fn from_interleaved(data: &[f32]) -> Self {
        let vertices = data
            .chunks_exact(VERTEX_STRIDE)
            .map(|chunk| {
                let mut record = [0.0; VERTEX_STRIDE];
                record.copy_from_slice(chunk);
                Vertex::from_interleaved(&record)
            })
            .collect();
        Self { vertices }
    }
}

impl FromIterator<Vertex> for Mesh {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        Self {
            vertices: iter.into_iter().collect(),
        }
    }
}

/// One detected object: the seed position it grew from and the vertices assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGroup {
    pub center: Point3<f32>,
    pub mesh: Mesh,
}

impl MeshGroup {
    pub fn new(center: Point3<f32>) -> Self {
        Self {
            center,
            mesh: Mesh::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }
}
