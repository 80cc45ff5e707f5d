use std::path::Path;

use crate::{core::Summary, prelude::*};

pub fn write_path(summary: &Summary, path: &Path) -> Result {
    std::fs::write(path, toml::to_string_pretty(summary)?)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(path = %path.display(), "saved the summary");
    Ok(())
}
