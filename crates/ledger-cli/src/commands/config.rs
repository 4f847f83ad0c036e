use std::path::Path;

use anyhow::bail;
use ledger_core::{AppKind, LedgerConfig};

/// Write a `ledger.toml` scaffold into `path`. Never overwrites.
pub fn init(path: &str, app: AppKind) -> anyhow::Result<()> {
    let output = Path::new(path).join("ledger.toml");
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    let config = LedgerConfig::scaffold(app);
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
