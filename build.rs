use anyhow::{Context, Result};
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;
use std::env;
use std::path::PathBuf;

// Star sprite and the web configuration are served from `assets/`; mirror
// them into OUT_DIR so packaging steps find them next to the build output.
fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let assets = manifest_dir.join("assets");
    if !assets.exists() {
        return Ok(());
    }

    let out_dir = env::var("OUT_DIR")?;
    let mut options = CopyOptions::new();
    options.overwrite = true;
    copy_items(&[&assets], &out_dir, &options)
        .with_context(|| format!("copying {} to {}", assets.display(), out_dir))?;
    Ok(())
}
