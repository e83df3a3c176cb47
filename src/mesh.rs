//! Triangle geometry and the Wavefront OBJ loader.
//!
//! Geometry reaches the renderer as a flat list of [`Triangle`]s, each carrying
//! its own three (position, UV) pairs. No index buffer is kept: models are
//! small, immutable after load and read linearly once per frame.

use std::fmt;
use std::fs;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use log::{debug, info, warn};

use crate::math::{Vec2, Vec3};

/// UVs substituted when the source has no texture coordinates.
pub const DEFAULT_UVS: [Vec2; 3] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
];

/// A model-space position with its texture coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub const fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }
}

/// Exactly three vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub const fn new(vertices: [Vertex; 3]) -> Self {
        Self { vertices }
    }

    /// Triangle with the default UV triple.
    pub fn untextured(positions: [Vec3; 3]) -> Self {
        Self::new([
            Vertex::new(positions[0], DEFAULT_UVS[0]),
            Vertex::new(positions[1], DEFAULT_UVS[1]),
            Vertex::new(positions[2], DEFAULT_UVS[2]),
        ])
    }

    pub fn positions(&self) -> [Vec3; 3] {
        self.vertices.map(|v| v.position)
    }

    pub fn uvs(&self) -> [Vec2; 3] {
        self.vertices.map(|v| v.uv)
    }
}

/// Errors that can occur while loading geometry.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Obj(tobj::LoadError),
    /// The source parsed but produced no triangles.
    NoTriangles,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read model: {e}"),
            LoadError::Obj(e) => write!(f, "failed to parse OBJ: {e}"),
            LoadError::NoTriangles => write!(f, "model contains no triangles"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Obj(e) => Some(e),
            LoadError::NoTriangles => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// Load every object in an OBJ file as one triangle list.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Triangle>, LoadError> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let triangles = parse_obj(BufReader::new(file))?;
    info!(
        "Loaded {} ({} triangles)",
        path.display(),
        triangles.len()
    );
    Ok(triangles)
}

/// Parse OBJ text into triangles.
///
/// Lines that cannot be interpreted are dropped before parsing; polygons are
/// fan-triangulated. Materials are ignored.
pub fn parse_obj<R: BufRead>(reader: R) -> Result<Vec<Triangle>, LoadError> {
    let (clean, skipped) = sanitize(reader)?;
    if skipped > 0 {
        warn!("Skipped {} malformed OBJ line(s)", skipped);
    }

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: true, // Unifies indices for position/UV
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj_buf(
        &mut Cursor::new(clean),
        &load_options,
        |_| Err(tobj::LoadError::OpenFileFailed),
    )?;

    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let has_texcoords = !mesh.texcoords.is_empty();
        if !has_texcoords {
            debug!(
                "Object '{}' has no texture coordinates, using defaults",
                model.name
            );
        }

        for corners in mesh.indices.chunks_exact(3) {
            let mut vertices = [Vertex::default(); 3];
            for (corner, (&index, vertex)) in corners.iter().zip(vertices.iter_mut()).enumerate() {
                let i = index as usize;
                vertex.position = Vec3::new(
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                );
                vertex.uv = match mesh.texcoords.get(i * 2..i * 2 + 2) {
                    Some(&[u, v]) => Vec2::new(u, v),
                    _ => DEFAULT_UVS[corner],
                };
            }
            triangles.push(Triangle::new(vertices));
        }
    }

    if triangles.is_empty() {
        return Err(LoadError::NoTriangles);
    }
    Ok(triangles)
}

/// Texture coordinates prepended when faces with and without UVs are mixed.
const DEFAULT_UV_LINES: &str = "vt 0 0\nvt 1 0\nvt 0 1\n";
const DEFAULT_UV_COUNT: i64 = 3;

/// A face corner whose indices passed the range check.
struct Corner {
    position: String,
    uv: Option<i64>,
    normal: Option<String>,
}

impl Corner {
    fn write(&self, out: &mut String, uv: Option<i64>) {
        out.push_str(&self.position);
        match (uv, &self.normal) {
            (Some(t), Some(n)) => out.push_str(&format!("/{t}/{n}")),
            (Some(t), None) => out.push_str(&format!("/{t}")),
            (None, Some(n)) => out.push_str(&format!("//{n}")),
            (None, None) => {}
        }
    }
}

enum ObjLine {
    Text(String),
    Face(Vec<Corner>),
}

/// Copy the input, dropping lines the OBJ parser would reject.
/// Returns the cleaned text and the number of dropped lines.
///
/// With single-index loading tobj only emits texture coordinates for corners
/// that have them, so a mesh mixing both kinds of face would misalign. In
/// that case the default triple is prepended and every UV-less face is
/// fan-split into triangles pointing at it.
fn sanitize<R: BufRead>(reader: R) -> Result<(String, usize), LoadError> {
    let mut lines = Vec::new();
    let mut skipped = 0;
    // Running element counts, needed to resolve face indices
    let (mut positions, mut texcoords, mut normals) = (0usize, 0usize, 0usize);
    let (mut textured_faces, mut bare_faces) = (false, false);

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let kept = match tokens.next() {
            Some("v") => {
                let kept = match floats(tokens).as_deref() {
                    Some([_, _, _] | [_, _, _, _]) => Some(ObjLine::Text(line.clone())),
                    // Vertex colors are unused
                    Some([x, y, z, _, _, _]) => Some(ObjLine::Text(format!("v {x} {y} {z}"))),
                    _ => None,
                };
                positions += kept.is_some() as usize;
                kept
            }
            Some("vt") => {
                let kept = match floats(tokens).as_deref() {
                    Some([u]) => Some(ObjLine::Text(format!("vt {u} 0"))),
                    Some([_, _] | [_, _, _]) => Some(ObjLine::Text(line.clone())),
                    _ => None,
                };
                texcoords += kept.is_some() as usize;
                kept
            }
            Some("vn") => {
                let kept = match floats(tokens).as_deref() {
                    Some([_, _, _]) => Some(ObjLine::Text(line.clone())),
                    _ => None,
                };
                normals += kept.is_some() as usize;
                kept
            }
            Some("f") => parse_face(tokens, positions, texcoords, normals).map(|corners| {
                if corners[0].uv.is_some() {
                    textured_faces = true;
                } else {
                    bare_faces = true;
                }
                ObjLine::Face(corners)
            }),
            _ => Some(ObjLine::Text(line.clone())),
        };

        match kept {
            Some(kept) => lines.push(kept),
            None => skipped += 1,
        }
    }

    let fill_defaults = textured_faces && bare_faces;
    let mut out = String::new();
    if fill_defaults {
        debug!("Mixed textured and untextured faces, filling default UVs");
        out.push_str(DEFAULT_UV_LINES);
    }

    for line in &lines {
        match line {
            ObjLine::Text(text) => {
                out.push_str(text);
                out.push('\n');
            }
            ObjLine::Face(corners) if fill_defaults && corners[0].uv.is_none() => {
                for i in 1..corners.len() - 1 {
                    out.push('f');
                    for (k, corner) in [&corners[0], &corners[i], &corners[i + 1]]
                        .into_iter()
                        .enumerate()
                    {
                        out.push(' ');
                        corner.write(&mut out, Some(k as i64 + 1));
                    }
                    out.push('\n');
                }
            }
            ObjLine::Face(corners) => {
                out.push('f');
                for corner in corners {
                    out.push(' ');
                    // Negative indices are relative and unaffected by the prefix
                    let uv = match corner.uv {
                        Some(t) if fill_defaults && t > 0 => Some(t + DEFAULT_UV_COUNT),
                        uv => uv,
                    };
                    corner.write(&mut out, uv);
                }
                out.push('\n');
            }
        }
    }
    Ok((out, skipped))
}

/// The tokens, if every one of them is a number.
fn floats<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<Vec<&'a str>> {
    tokens
        .map(|token| token.parse::<f32>().ok().map(|_| token))
        .collect()
}

fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    positions: usize,
    texcoords: usize,
    normals: usize,
) -> Option<Vec<Corner>> {
    let mut corners: Vec<Corner> = Vec::new();
    for token in tokens {
        let mut parts = token.split('/');
        let position = parts.next().unwrap_or("");
        let uv = parts.next().unwrap_or("");
        let normal = parts.next().unwrap_or("");

        resolve_index(position, positions)?;
        let uv = match uv {
            "" => None,
            uv => Some(resolve_index(uv, texcoords)?),
        };
        let normal = match normal {
            "" => None,
            normal => {
                resolve_index(normal, normals)?;
                Some(normal.to_string())
            }
        };
        // Mixing corners with and without UVs breaks single-index unification
        if corners.first().is_some_and(|c| c.uv.is_some() != uv.is_some()) {
            return None;
        }
        corners.push(Corner {
            position: position.to_string(),
            uv,
            normal,
        });
    }
    (corners.len() >= 3).then_some(corners)
}

/// OBJ indices are 1-based; negative values count back from the end.
fn resolve_index(token: &str, count: usize) -> Option<i64> {
    match token.parse::<i64>() {
        Ok(i) if i > 0 && i as usize <= count => Some(i),
        Ok(i) if i < 0 && i.unsigned_abs() as usize <= count => Some(i),
        _ => None,
    }
}

// Unit cube corners, shared by the face table below.
const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

// Quads as (a, b, c, d) corner indices, split into (a, b, c) + (a, c, d).
const CUBE_QUADS: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // front
    [3, 2, 4, 5], // right
    [5, 4, 6, 7], // back
    [7, 6, 1, 0], // left
    [1, 6, 4, 2], // top
    [5, 7, 0, 3], // bottom
];

/// A 2x2x2 cube centered on the origin, each face mapped to the full texture.
pub fn cube() -> Vec<Triangle> {
    let uv = [
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
    ];
    CUBE_QUADS
        .iter()
        .flat_map(|&[a, b, c, d]| {
            let v = |i: usize, t: usize| Vertex::new(CUBE_VERTICES[i], uv[t]);
            [
                Triangle::new([v(a, 0), v(b, 1), v(c, 2)]),
                Triangle::new([v(a, 0), v(c, 2), v(d, 3)]),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<Vec<Triangle>, LoadError> {
        parse_obj(Cursor::new(src))
    }

    #[test]
    fn parses_textured_triangle() {
        let tris = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0.5 1\nf 1/1 2/2 3/3\n",
        )
        .unwrap();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].positions()[1], Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(tris[0].uvs()[2], Vec2::new(0.5, 1.0));
    }

    #[test]
    fn missing_uvs_get_default_triple() {
        let tris = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(tris[0].uvs(), DEFAULT_UVS);
    }

    #[test]
    fn quads_are_triangulated() {
        let tris = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
        assert_eq!(tris.len(), 2);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let src = "\
v 0 0 0
v 1 0 0
v nope 0 0
v 0 1 0
f 1 2
f 1 2 9
f 1 2 x
f 1 2 3
";
        let tris = parse(src).unwrap();
        assert_eq!(tris.len(), 1);
        assert_eq!(tris[0].positions()[2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn negative_indices_resolve() {
        let tris = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(tris[0].positions()[0], Vec3::ZERO);
    }

    #[test]
    fn empty_source_is_an_error() {
        assert!(matches!(parse("# nothing\n"), Err(LoadError::NoTriangles)));
    }

    #[test]
    fn sanitize_counts_dropped_lines() {
        let (clean, skipped) = sanitize(Cursor::new("v 1 2\nvt 0 0\nf 1 2 3\n")).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(clean, "vt 0 0\n");
    }

    #[test]
    fn mixed_faces_keep_their_own_uvs() {
        let src = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 5 5 5
v 6 5 5
v 5 6 5
v 6 6 5
vt 0.1 0.2
vt 0.3 0.4
vt 0.5 0.6
f 4 5 6
f 1/1 2/2 3/3
f 4 5 7 6
f 1/-3 2/-2 3/-1
";
        let tris = parse(src).unwrap();
        assert_eq!(tris.len(), 5);

        assert_eq!(tris[0].positions()[0], Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(tris[0].uvs(), DEFAULT_UVS);

        let textured = [Vec2::new(0.1, 0.2), Vec2::new(0.3, 0.4), Vec2::new(0.5, 0.6)];
        assert_eq!(tris[1].positions()[0], Vec3::ZERO);
        assert_eq!(tris[1].uvs(), textured);

        // Each half of the untextured quad gets the whole default triple
        assert_eq!(tris[2].positions()[2], Vec3::new(6.0, 6.0, 5.0));
        assert_eq!(tris[2].uvs(), DEFAULT_UVS);
        assert_eq!(tris[3].positions()[1], Vec3::new(6.0, 6.0, 5.0));
        assert_eq!(tris[3].uvs(), DEFAULT_UVS);

        assert_eq!(tris[4].uvs(), textured);
    }

    #[test]
    fn odd_vertex_lines_are_skipped_or_trimmed() {
        let src = "\
v 0 0 0 1 1
v 0 0 1
v 1 0 1 1
v 0 1 1 0.5 0.5 0.5
v 1 1 1 0 0 0 0
f 1 2 3
";
        let (_, skipped) = sanitize(Cursor::new(src)).unwrap();
        assert_eq!(skipped, 2);

        let tris = parse(src).unwrap();
        assert_eq!(tris.len(), 1);
        assert_eq!(
            tris[0].positions(),
            [
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
            ]
        );
    }

    #[test]
    fn single_component_texcoords_are_padded() {
        let tris = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.25\nvt 1\nvt 0.5 1\nf 1/1 2/2 3/3\n")
            .unwrap();
        assert_eq!(
            tris[0].uvs(),
            [Vec2::new(0.25, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)]
        );
    }

    #[test]
    fn cube_has_twelve_unit_triangles() {
        let tris = cube();
        assert_eq!(tris.len(), 12);
        for tri in &tris {
            for p in tri.positions() {
                assert_eq!(p.x.abs(), 1.0);
                assert_eq!(p.y.abs(), 1.0);
                assert_eq!(p.z.abs(), 1.0);
            }
        }
    }
}
