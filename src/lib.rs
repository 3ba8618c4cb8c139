//! Resolve and lazily create the kdp home directory layout.
//!
//! ```text
//! <home>/            $KDP_HOME or ~/.kdp
//!   centers/
//!     .tmp/
//!     config.yaml
//!   capabilities/
//!   curenv
//! ```

pub mod kdp_home;
pub mod model;
pub mod util;

pub use kdp_home::{
    KDP_HOME_ENV, KdpHome, cap_center_dir, capability_dir, current_env_path, home_dir,
    init_cap_center_dir, init_capability_dir, init_dirs, repo_config,
};
pub use util::create_if_not_exist;
