/// Command-line front end: load an STL file, split it into objects, report the groups
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;
use stlsplit_core::{ClusterConfig, ClusterStrategy, GreedyCenters, MeshGroup, StlMesh};
use tracing::info;

pub mod report;

pub use report::write_report;

/// Texture slots available to the renderer by default.
pub const DEFAULT_TEXTURE_COUNT: usize = 10;

pub const USAGE: &str =
    "Usage: stlsplit <file.stl> [--stride N] [--min-distance D] [--textures N] [--spherical-uv]";

/// Parsed command-line options
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub path: PathBuf,
    pub config: ClusterConfig,
    pub textures: usize,
    pub spherical_uv: bool,
}

impl Options {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut path = None;
        let mut config = ClusterConfig::default();
        let mut textures = DEFAULT_TEXTURE_COUNT;
        let mut spherical_uv = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--stride" => {
                    let value = flag_value(&mut args, "--stride")?;
                    config = config.with_sample_stride(
                        value.parse().with_context(|| format!("invalid stride `{value}`"))?,
                    );
                }
                "--min-distance" => {
                    let value = flag_value(&mut args, "--min-distance")?;
                    config = config.with_min_center_distance(
                        value
                            .parse()
                            .with_context(|| format!("invalid distance `{value}`"))?,
                    );
                }
                "--textures" => {
                    let value = flag_value(&mut args, "--textures")?;
                    textures = value
                        .parse()
                        .with_context(|| format!("invalid texture count `{value}`"))?;
                }
                "--spherical-uv" => spherical_uv = true,
                flag if flag.starts_with("--") => bail!("unknown option `{flag}`\n{USAGE}"),
                _ if path.is_some() => bail!("unexpected argument `{arg}`\n{USAGE}"),
                _ => path = Some(PathBuf::from(&arg)),
            }
        }

        let Some(path) = path else {
            bail!("no STL file given\n{USAGE}");
        };
        Ok(Self {
            path,
            config,
            textures,
            spherical_uv,
        })
    }
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("`{flag}` needs a value\n{USAGE}"))
}

/// A decoded file and the objects found in it
#[derive(Debug, Clone)]
pub struct SplitModel {
    pub stl: StlMesh,
    pub groups: Vec<MeshGroup>,
}

impl SplitModel {
    /// Decode `data` and split it with the configured clusterer.
    pub fn from_bytes(data: &[u8], options: &Options) -> Result<Self> {
        let stl = stlsplit_core::parse_stl(data).context("failed to parse STL")?;
        let mut groups = GreedyCenters::new(options.config).cluster(&stl.mesh);
        if options.spherical_uv {
            for group in &mut groups {
                group.mesh.apply_spherical_uvs();
            }
        }
        Ok(Self { stl, groups })
    }
}

/// Read and split the file named in `options`.
pub fn load(options: &Options) -> Result<SplitModel> {
    info!(path = %options.path.display(), "loading STL file");
    let data = fs::read(&options.path)
        .with_context(|| format!("failed to read STL file {}", options.path.display()))?;
    info!(bytes = data.len(), "read STL file");

    let model = SplitModel::from_bytes(&data, options)?;
    info!(
        vertices = model.stl.mesh.vertex_count(),
        groups = model.groups.len(),
        "split mesh into objects"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let options = Options::parse(args(&["model.stl"])).unwrap();
        assert_eq!(options.path, PathBuf::from("model.stl"));
        assert_eq!(options.config, ClusterConfig::default());
        assert_eq!(options.textures, DEFAULT_TEXTURE_COUNT);
        assert!(!options.spherical_uv);
    }

    #[test]
    fn test_parse_flags() {
        let options = Options::parse(args(&[
            "--stride",
            "1",
            "model.stl",
            "--min-distance",
            "2.5",
            "--textures",
            "4",
            "--spherical-uv",
        ]))
        .unwrap();
        assert_eq!(options.config, ClusterConfig::new(1, 2.5));
        assert_eq!(options.textures, 4);
        assert!(options.spherical_uv);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Options::parse(args(&[])).is_err());
        assert!(Options::parse(args(&["a.stl", "b.stl"])).is_err());
        assert!(Options::parse(args(&["a.stl", "--stride"])).is_err());
        assert!(Options::parse(args(&["a.stl", "--stride", "x"])).is_err());
        assert!(Options::parse(args(&["a.stl", "--bogus"])).is_err());
    }

    #[test]
    fn test_split_ascii_bytes() {
        let text = "solid two\n\
            facet normal 0 0 1\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendfacet\n\
            facet normal 0 0 1\nvertex 90 0 0\nvertex 91 0 0\nvertex 90 1 0\nendfacet\n\
            endsolid two\n";
        let options = Options::parse(args(&["two.stl", "--spherical-uv"])).unwrap();
        let model = SplitModel::from_bytes(text.as_bytes(), &options).unwrap();

        assert_eq!(model.groups.len(), 2);
        let uv = model.groups[0].mesh.vertices[0].tex_coord;
        assert!((uv.x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file() {
        let options = Options::parse(args(&["/nonexistent/definitely/missing.stl"])).unwrap();
        let err = load(&options).unwrap_err();
        assert!(err.to_string().contains("failed to read STL file"));
    }
}
