use serde::Serialize;
use std::path::PathBuf;

use crate::kdp_home::KdpHome;

/// Every well-known path under a resolved home, as reported by `kdp-home show`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HomeLayout {
    pub home: PathBuf,
    pub cap_center_dir: PathBuf,
    pub capability_dir: PathBuf,
    pub repo_config: PathBuf,
    pub current_env_path: PathBuf,
    /// `Some(true)` once `init` has put the directories in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialized: Option<bool>,
}

impl HomeLayout {
    pub fn from_home(home: &KdpHome) -> Self {
        Self {
            home: home.root.clone(),
            cap_center_dir: home.cap_center_dir(),
            capability_dir: home.capability_dir(),
            repo_config: home.repo_config(),
            current_env_path: home.current_env_path(),
            initialized: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PathKind {
    Home,
    Centers,
    Capabilities,
    RepoConfig,
    Curenv,
}

impl PathKind {
    pub fn resolve(self, home: &KdpHome) -> PathBuf {
        match self {
            PathKind::Home => home.root.clone(),
            PathKind::Centers => home.cap_center_dir(),
            PathKind::Capabilities => home.capability_dir(),
            PathKind::RepoConfig => home.repo_config(),
            PathKind::Curenv => home.current_env_path(),
        }
    }
}
