use std::path::PathBuf;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: lightbox <scenario.json>")?;
    let replay = lightbox::run(&path)?;
    println!("{}", serde_json::to_string_pretty(&replay)?);
    Ok(())
}
