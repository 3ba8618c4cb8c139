use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kdp_home::KdpHome;
use kdp_home::model::{HomeLayout, PathKind};

/// Used only when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "kdp_home=warn";

#[derive(Debug, Parser)]
#[command(
    name = "kdp-home",
    version,
    about = "Resolve and create the kdp home directory layout"
)]
struct Cli {
    /// Override KDP_HOME (default: $KDP_HOME or ~/.kdp).
    #[arg(long, global = true)]
    kdp_home: Option<std::path::PathBuf>,

    /// Output JSON instead of plain paths.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a single well-known path.
    Path {
        #[arg(value_enum, default_value = "home")]
        kind: PathKind,
    },
    /// Create capabilities/ and centers/.tmp/ under the home directory.
    Init,
    /// Print every well-known path (default).
    Show,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let home = KdpHome::resolve(cli.kdp_home.clone())?;
    tracing::debug!(root = %home.root.display(), "resolved kdp home");

    let out = match cli.command.unwrap_or(Command::Show) {
        Command::Path { kind } => {
            let p = kind.resolve(&home);
            if cli.json {
                serde_json::to_string_pretty(&p).context("serialize JSON path")?
            } else {
                p.display().to_string()
            }
        }
        Command::Init => {
            home.init_dirs()
                .with_context(|| format!("init dirs under {}", home.root.display()))?;
            let mut layout = HomeLayout::from_home(&home);
            layout.initialized = Some(true);
            render_layout(&layout, cli.json)?
        }
        Command::Show => render_layout(&HomeLayout::from_home(&home), cli.json)?,
    };

    let mut stdout = std::io::stdout();
    if let Err(e) = writeln!(stdout, "{out}") {
        // Common and harmless when piped to tools like `head`.
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            return Err(e.into());
        }
    }
    Ok(())
}

/// `RUST_LOG` directives win as given; the default applies only when they are
/// missing or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn render_layout(layout: &HomeLayout, json: bool) -> anyhow::Result<String> {
    if json {
        return serde_json::to_string_pretty(layout).context("serialize JSON layout");
    }

    let rows = [
        ("home", &layout.home),
        ("centers", &layout.cap_center_dir),
        ("capabilities", &layout.capability_dir),
        ("repo-config", &layout.repo_config),
        ("curenv", &layout.current_env_path),
    ];
    Ok(rows
        .iter()
        .map(|(name, p)| format!("{name:<13}{}", p.display()))
        .collect::<Vec<_>>()
        .join("\n"))
}
