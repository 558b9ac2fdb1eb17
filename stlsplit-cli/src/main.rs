/// stlsplit - split an STL scene into separate objects
///
/// Usage: stlsplit <file.stl> [--stride N] [--min-distance D] [--textures N] [--spherical-uv]
///
/// Set RUST_LOG=debug to see decoder and clustering diagnostics.

use anyhow::Result;
use std::io::stdout;
use stlsplit_cli::{load, write_report, Options};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = Options::parse(std::env::args().skip(1))?;
    let model = load(&options)?;

    write_report(&mut stdout().lock(), &model, options.textures)?;
    Ok(())
}
