use std::path::PathBuf;

use anyhow::{bail, Context};
use floorscan::{init_logging, Session, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: floorscan <session.json>");
    };
    tracing::info!("floorscan {} (built {})", VERSION, BUILD_DATE);

    let session = Session::load_from_file(&path)
        .with_context(|| format!("failed to read session {}", path.display()))?;
    let controller = session
        .into_controller()
        .context("failed to replay session")?;

    let Some(manifest) = controller.export_manifest() else {
        bail!("nothing to export: every floor must be accepted and at least one calibrated");
    };
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}
