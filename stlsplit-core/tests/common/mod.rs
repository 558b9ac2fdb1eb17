//! Builders for STL fixtures shared by the integration tests.

pub type Facet = ([f32; 3], [[f32; 3]; 3]);

fn push_vec3(buf: &mut Vec<u8>, v: &[f32; 3]) {
    for c in v {
        buf.extend_from_slice(&c.to_le_bytes());
    }
}

/// Binary STL with a zeroed header and the given declared count.
pub fn binary_stl(declared: u32, facets: &[Facet]) -> Vec<u8> {
    let mut data = vec![0u8; 80];
    data.extend_from_slice(&declared.to_le_bytes());
    for (normal, corners) in facets {
        push_vec3(&mut data, normal);
        for corner in corners {
            push_vec3(&mut data, corner);
        }
        data.extend_from_slice(&[0, 0]);
    }
    data
}

pub fn ascii_stl(name: &str, facets: &[Facet]) -> String {
    let mut out = format!("solid {name}\n");
    for (normal, corners) in facets {
        out.push_str(&format!(
            "  facet normal {} {} {}\n",
            normal[0], normal[1], normal[2]
        ));
        out.push_str("    outer loop\n");
        for c in corners {
            out.push_str(&format!("      vertex {} {} {}\n", c[0], c[1], c[2]));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// A small triangle whose first corner sits at `origin`.
pub fn facet_at(origin: [f32; 3]) -> Facet {
    let [x, y, z] = origin;
    (
        [0.0, 0.0, 1.0],
        [[x, y, z], [x + 1.0, y, z], [x, y + 1.0, z]],
    )
}
