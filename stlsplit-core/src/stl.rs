/// STL decoder for binary and ASCII formats
use nalgebra::{Point3, Vector3};
use nom::{
    branch::alt,
    bytes::complete::{tag, take},
    character::complete::multispace1,
    combinator::value,
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};
use tracing::{debug, warn};

use crate::error::{StlError, StlResult};
use crate::geometry::{Mesh, Triangle, Vertex};

/// Size of the binary header plus the triangle count.
pub const BINARY_HEADER_LEN: usize = 84;

/// Size of one binary facet record: normal, three corners, attribute count.
pub const BINARY_FACET_LEN: usize = 50;

/// How many leading bytes are inspected when guessing the format.
const DETECTION_WINDOW: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

/// A decoded STL file together with decode diagnostics.
#[derive(Debug, Clone)]
pub struct StlMesh {
    pub mesh: Mesh,
    pub format: StlFormat,
    /// Triangle count from the binary header; `None` for ASCII input.
    pub declared_triangles: Option<u32>,
    /// Triangles actually emitted into `mesh`.
    pub triangles: usize,
}

impl StlMesh {
    /// True when a binary file declared more triangles than it contained.
    pub fn is_truncated(&self) -> bool {
        self.declared_triangles
            .is_some_and(|declared| (declared as usize) > self.triangles)
    }
}

/// Guess the format from the first 100 bytes.
///
/// Any occurrence of "solid" (case-insensitive) selects ASCII. Binary files
/// whose header happens to contain that word are routed to the ASCII path.
pub fn detect_format(data: &[u8]) -> StlFormat {
    let window = &data[..data.len().min(DETECTION_WINDOW)];
    let text = String::from_utf8_lossy(window).to_lowercase();
    if text.contains("solid") {
        StlFormat::Ascii
    } else {
        StlFormat::Binary
    }
}

/// Detect and parse an STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> StlResult<StlMesh> {
    match detect_format(data) {
        StlFormat::Ascii => {
            debug!("detected ASCII STL");
            parse_ascii_stl(&String::from_utf8_lossy(data))
        }
        StlFormat::Binary => {
            debug!("detected binary STL");
            parse_binary_stl(data)
        }
    }
}

/// Decode an STL buffer into its flat vertex list.
pub fn decode(data: &[u8]) -> StlResult<Mesh> {
    parse_stl(data).map(|stl| stl.mesh)
}

/// Parse a binary STL file
///
/// Stops at the last complete facet when the buffer is shorter than the
/// declared triangle count implies. Bytes past the declared facets are ignored.
pub fn parse_binary_stl(data: &[u8]) -> StlResult<StlMesh> {
    if data.len() < BINARY_HEADER_LEN {
        return Err(StlError::TooShort { len: data.len() });
    }

    let (mut remaining, declared) =
        binary_header(data).map_err(|_| StlError::TooShort { len: data.len() })?;
    debug!(triangles = declared, "binary STL header");

    let expected = BINARY_HEADER_LEN as u64 + u64::from(declared) * BINARY_FACET_LEN as u64;
    if (data.len() as u64) < expected {
        warn!(
            expected,
            actual = data.len(),
            "binary STL is shorter than its triangle count implies"
        );
    }

    let available = remaining.len() / BINARY_FACET_LEN;
    let mut mesh = Mesh::with_capacity(available.min(declared as usize));
    let mut triangles = 0;

    for index in 0..declared {
        let Ok((rest, triangle)) = binary_facet(remaining) else {
            warn!(triangle = index, "reached end of binary STL data");
            break;
        };
        mesh.add_triangle(triangle);
        triangles += 1;
        remaining = rest;
    }

    debug!(vertices = mesh.vertex_count(), "binary STL parsed");
    Ok(StlMesh {
        mesh,
        format: StlFormat::Binary,
        declared_triangles: Some(declared),
        triangles,
    })
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(take(80usize), le_u32)(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Triangle> {
    let (input, normal) = le_vector3(input)?;
    let (input, (a, b, c)) = tuple((le_vector3, le_vector3, le_vector3))(input)?;
    let (input, _attribute_bytes) = le_u16(input)?;
    Ok((
        input,
        Triangle::flat(normal, [Point3::from(a), Point3::from(b), Point3::from(c)]),
    ))
}

fn le_vector3(input: &[u8]) -> IResult<&[u8], Vector3<f32>> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Keyword {
    FacetNormal,
    Vertex,
}

/// Parse an ASCII STL file
///
/// Only `facet normal` and `vertex` lines are consumed; every vertex takes the
/// most recent facet normal. A keyword line whose numbers do not parse fails
/// the whole decode.
pub fn parse_ascii_stl(input: &str) -> StlResult<StlMesh> {
    let mut mesh = Mesh::new();
    let mut normal = Vector3::zeros();

    for (index, line) in input.split('\n').enumerate() {
        let line = line.trim();
        let Ok((rest, keyword)) = ascii_keyword(line) else {
            continue;
        };

        let coords = parse_vector3(rest)
            .map(|(_, coords)| coords)
            .map_err(|_| StlError::MalformedLine {
                line: index + 1,
                reason: format!("expected three numbers in `{line}`"),
            })?;

        match keyword {
            Keyword::FacetNormal => normal = coords,
            Keyword::Vertex => mesh.push_vertex(Vertex::with_normal(Point3::from(coords), normal)),
        }
    }

    debug!(vertices = mesh.vertex_count(), "ASCII STL parsed");
    let triangles = mesh.triangle_count();
    Ok(StlMesh {
        mesh,
        format: StlFormat::Ascii,
        declared_triangles: None,
        triangles,
    })
}

fn ascii_keyword(line: &str) -> IResult<&str, Keyword> {
    alt((
        value(
            Keyword::FacetNormal,
            tuple((tag("facet"), multispace1, tag("normal"))),
        ),
        value(Keyword::Vertex, tag("vertex")),
    ))(line)
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Vector3::new(x, y, z)))
}
