//! # Install Subcommand
//!
//! Copies the built library into a host application's library directory
//! and registers the library's resource root in the host `manifest.json`.
//!
//! Both steps fail the command: a copy error stops before the manifest is
//! touched, and a manifest error is reported after the copy has landed.
//! Neither step rolls back.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};

/// Key holding namespace-to-path mappings inside the manifest section.
pub const RESOURCE_ROOTS_KEY: &str = "resourceRoots";

/// Arguments for the `formval install` subcommand.
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Build output directory to copy.
    #[arg(long, value_name = "DIR", default_value = "dist/resources")]
    pub source: PathBuf,

    /// Host application root; holds `manifest.json`.
    #[arg(long, value_name = "DIR", default_value = "../../webapp")]
    pub app_root: PathBuf,

    /// Library directory, relative to the application root.
    #[arg(long, value_name = "DIR", default_value = "lib")]
    pub lib_dir: PathBuf,

    /// Resource namespace to register.
    #[arg(long, default_value = "form.validator")]
    pub namespace: String,

    /// Manifest section that holds `resourceRoots`.
    #[arg(long, default_value = "sap.ui5")]
    pub section: String,

    /// Copy only; leave the manifest untouched.
    #[arg(long)]
    pub skip_manifest: bool,
}

/// Execute the install subcommand.
pub fn run_install(args: &InstallArgs, base: &Path) -> Result<u8> {
    let source = crate::resolve_path(&args.source, base);
    let app_root = crate::resolve_path(&args.app_root, base);
    let destination = app_root.join(&args.lib_dir);

    let copied = copy_dir_recursive(&source, &destination).map_err(|e| {
        tracing::error!(
            source = %source.display(),
            destination = %destination.display(),
            error = %e,
            "copy failed"
        );
        e
    })?;
    println!(
        "Copied {copied} file(s) from {} to {}",
        source.display(),
        destination.display()
    );

    if args.skip_manifest {
        return Ok(0);
    }

    let manifest = app_root.join("manifest.json");
    let root = resource_root(&args.lib_dir, &args.namespace);
    patch_manifest(&manifest, &args.section, &args.namespace, &root).map_err(|e| {
        tracing::error!(manifest = %manifest.display(), error = %e, "manifest update failed");
        e
    })?;
    println!("Registered {} -> {} in {}", args.namespace, root, manifest.display());

    Ok(0)
}

/// Relative path the namespace resolves to: `./<lib_dir>/<namespace as path>`.
pub fn resource_root(lib_dir: &Path, namespace: &str) -> String {
    let lib = lib_dir.to_string_lossy().replace('\\', "/");
    let lib = lib.trim_matches('/');
    let ns = namespace.replace('.', "/");
    if lib.is_empty() {
        format!("./{ns}")
    } else {
        format!("./{lib}/{ns}")
    }
}

/// Recursively copy `source` into `destination`, creating directories as
/// needed and overwriting existing files. Returns the number of files copied.
pub fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<u64> {
    if !source.is_dir() {
        bail!("source directory {} does not exist", source.display());
    }
    std::fs::create_dir_all(destination)
        .with_context(|| format!("cannot create {}", destination.display()))?;

    let mut copied = 0u64;
    let entries = std::fs::read_dir(source)
        .with_context(|| format!("cannot read {}", source.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot read {}", source.display()))?;
        let path = entry.path();
        let target = destination.join(entry.file_name());
        if path.is_dir() {
            copied += copy_dir_recursive(&path, &target)?;
        } else {
            std::fs::copy(&path, &target).with_context(|| {
                format!("cannot copy {} to {}", path.display(), target.display())
            })?;
            tracing::debug!(file = %target.display(), "copied");
            copied += 1;
        }
    }
    Ok(copied)
}

/// Set `<section>.resourceRoots.<namespace> = <root>` in the manifest at
/// `path`, keeping every other entry.
pub fn patch_manifest(path: &Path, section: &str, namespace: &str, root: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read manifest {}", path.display()))?;
    let mut manifest: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?;

    let Some(top) = manifest.as_object_mut() else {
        bail!("manifest {} is not a JSON object", path.display());
    };
    let section_value = top
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(section_obj) = section_value.as_object_mut() else {
        bail!("manifest section \"{section}\" is not an object");
    };
    let roots = section_obj
        .entry(RESOURCE_ROOTS_KEY.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(roots) = roots.as_object_mut() else {
        bail!("\"{section}\".{RESOURCE_ROOTS_KEY} is not an object");
    };
    roots.insert(namespace.to_string(), Value::String(root.to_string()));

    let mut out = serde_json::to_string_pretty(&manifest)?;
    out.push('\n');
    std::fs::write(path, out)
        .with_context(|| format!("cannot write manifest {}", path.display()))?;
    tracing::info!(manifest = %path.display(), namespace, root, "manifest updated");
    Ok(())
}
