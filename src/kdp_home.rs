use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use anyhow::Context;

use crate::util::{create_dir_all_with_mode, create_if_not_exist};

/// Environment variable that overrides the default `~/.kdp` location.
pub const KDP_HOME_ENV: &str = "KDP_HOME";

pub const DEFAULT_DIR_NAME: &str = ".kdp";

/// Mode for the home root itself.
pub const HOME_DIR_MODE: u32 = 0o750;

const CENTERS: &str = "centers";
const CAPABILITIES: &str = "capabilities";
const REPO_CONFIG: &str = "centers/config.yaml";
const CURRENT_ENV: &str = "curenv";
const TMP: &str = ".tmp";

/// The resolved kdp home directory.
///
/// Resolve it once at startup and pass it to whatever needs a path under it.
/// Derived paths are plain joins and are recomputed on every call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KdpHome {
    pub root: PathBuf,
}

impl KdpHome {
    /// Wrap an already known root. Nothing is created on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the home root and make sure it exists.
    ///
    /// Precedence: a non-empty `override_path`, then a non-empty `$KDP_HOME`,
    /// then `~/.kdp`.
    pub fn resolve(override_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let home = match override_path.filter(|p| !p.as_os_str().is_empty()) {
            Some(p) => Self::new(p),
            None => Self::resolve_from(std::env::var_os(KDP_HOME_ENV), dirs::home_dir())?,
        };
        home.ensure()?;
        Ok(home)
    }

    /// Pick the root from an env value and the user's home directory without
    /// touching the filesystem.
    pub fn resolve_from(
        env: Option<OsString>,
        user_home: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        if let Some(env) = env {
            if !env.is_empty() {
                return Ok(Self::new(env));
            }
        }

        let home = user_home.context("resolve home dir (needed for ~/.kdp)")?;
        Ok(Self::new(home.join(DEFAULT_DIR_NAME)))
    }

    /// Create the root (and missing parents) with mode 0750 if needed.
    pub fn ensure(&self) -> anyhow::Result<()> {
        create_dir_all_with_mode(&self.root, HOME_DIR_MODE)
            .with_context(|| format!("create kdp home {}", self.root.display()))?;
        tracing::trace!(root = %self.root.display(), "kdp home ready");
        Ok(())
    }

    pub fn cap_center_dir(&self) -> PathBuf {
        self.root.join(CENTERS)
    }

    pub fn capability_dir(&self) -> PathBuf {
        self.root.join(CAPABILITIES)
    }

    /// Path of the capability-center repo config. Only the path; the file is
    /// owned by whoever writes it.
    pub fn repo_config(&self) -> PathBuf {
        self.root.join(REPO_CONFIG)
    }

    /// File recording the currently selected environment.
    pub fn current_env_path(&self) -> PathBuf {
        self.root.join(CURRENT_ENV)
    }

    /// Capabilities first, then centers. Stops at the first failure.
    pub fn init_dirs(&self) -> io::Result<()> {
        self.init_capability_dir()?;
        self.init_cap_center_dir()
    }

    /// Creates `centers/.tmp`, and with it `centers`.
    pub fn init_cap_center_dir(&self) -> io::Result<()> {
        create_if_not_exist(self.cap_center_dir().join(TMP))?;
        Ok(())
    }

    pub fn init_capability_dir(&self) -> io::Result<()> {
        create_if_not_exist(self.capability_dir())?;
        Ok(())
    }
}

// Per-call accessors. Each one re-reads the environment and re-creates the
// home root if it went missing.

pub fn home_dir() -> anyhow::Result<PathBuf> {
    Ok(KdpHome::resolve(None)?.root)
}

pub fn cap_center_dir() -> anyhow::Result<PathBuf> {
    Ok(KdpHome::resolve(None)?.cap_center_dir())
}

pub fn capability_dir() -> anyhow::Result<PathBuf> {
    Ok(KdpHome::resolve(None)?.capability_dir())
}

pub fn repo_config() -> anyhow::Result<PathBuf> {
    Ok(KdpHome::resolve(None)?.repo_config())
}

pub fn current_env_path() -> anyhow::Result<PathBuf> {
    Ok(KdpHome::resolve(None)?.current_env_path())
}

pub fn init_dirs() -> anyhow::Result<()> {
    KdpHome::resolve(None)?.init_dirs()?;
    Ok(())
}

pub fn init_cap_center_dir() -> anyhow::Result<()> {
    KdpHome::resolve(None)?.init_cap_center_dir()?;
    Ok(())
}

pub fn init_capability_dir() -> anyhow::Result<()> {
    KdpHome::resolve(None)?.init_capability_dir()?;
    Ok(())
}
