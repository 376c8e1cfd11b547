//! Package manifest env declarations.
//!
//! Tier 2 of the precedence chain: projects can declare mode-keyed env
//! values under a `"vite-env"` field in their `package.json` instead of
//! shipping a separate env file.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::source::{EnvMap, SourceConfig};

/// File name of the project manifest probed at the root.
pub const MANIFEST_FILE: &str = "package.json";

/// The manifest, reduced to the single field this crate reads.
#[derive(Debug, Default, Deserialize)]
struct PackageManifest {
    #[serde(rename = "vite-env", default)]
    vite_env: Option<SourceConfig>,
}

/// Merge the manifest's `vite-env` field into the map, if present.
///
/// Manifests commonly lack the field entirely or carry unrelated
/// problems, so every failure here — missing file, unreadable file,
/// malformed JSON, a field of the wrong shape — degrades to a no-op
/// instead of aborting the hook. This is the one forgiving step in the
/// chain.
pub fn load_manifest_config(map: &mut EnvMap, root: &Path) {
    let path = root.join(MANIFEST_FILE);
    if !path.exists() {
        return;
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("Ignoring unreadable manifest {}: {}", path.display(), e);
            return;
        }
    };

    match serde_json::from_str::<PackageManifest>(&content) {
        Ok(manifest) => map.apply(manifest.vite_env.as_ref()),
        Err(e) => {
            tracing::debug!("Ignoring malformed manifest {}: {}", path.display(), e);
        }
    }
}
