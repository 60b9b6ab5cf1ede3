//! Location of `reshady.sh` inside the plugin directory.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SCRIPT_NAME: &str = "reshady.sh";

/// Resolved once at startup and shared read-only for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPath {
    plugin_dir: PathBuf,
    path: PathBuf,
}

impl ScriptPath {
    pub fn resolve(plugin_dir: impl Into<PathBuf>) -> Self {
        let plugin_dir = plugin_dir.into();
        let path = plugin_dir.join(SCRIPT_NAME);
        Self { plugin_dir, path }
    }

    pub fn plugin_dir(&self) -> &Path {
        &self.plugin_dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// The script path as the first element of an argument vector, byte for byte.
    pub fn as_arg(&self) -> OsString {
        self.path.clone().into_os_string()
    }

    /// Adds the execute bit for every permission class that can already read
    /// the script. Existing bits are never cleared.
    ///
    /// Returns `Ok(true)` when the mode was changed and `Ok(false)` when it was
    /// already executable or the script does not exist.
    #[cfg(unix)]
    pub fn ensure_executable(&self) -> io::Result<bool> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };

        let mut permissions = metadata.permissions();
        let mode = permissions.mode();
        let wanted = executable_mode(mode);
        if wanted == mode {
            return Ok(false);
        }

        permissions.set_mode(wanted);
        fs::set_permissions(&self.path, permissions)?;
        tracing::info!("Marked {} executable ({:o} -> {:o})", self.path.display(), mode, wanted);
        Ok(true)
    }

    #[cfg(not(unix))]
    pub fn ensure_executable(&self) -> io::Result<bool> {
        Ok(false)
    }
}

/// Mirrors each read bit (0o444) onto the matching execute bit (0o111).
pub fn executable_mode(mode: u32) -> u32 {
    mode | ((mode & 0o444) >> 2)
}
