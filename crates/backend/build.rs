use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Каталог профиля (target/debug или target/release), куда попадает бинарник
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source_config = workspace_root.join("config.toml");
    if !source_config.exists() {
        println!(
            "cargo:warning=config.toml not found at {:?}, the embedded default will be used",
            source_config
        );
        return;
    }

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=cannot locate target profile directory, config.toml not copied");
        return;
    };

    let dest_config = target_dir.join("config.toml");
    if let Err(e) = fs::copy(&source_config, &dest_config) {
        println!("cargo:warning=failed to copy config.toml to {:?}: {}", dest_config, e);
    }
}
