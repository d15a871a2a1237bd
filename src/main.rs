mod config_file;
mod section;
mod settings;
mod snippet;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config_file::CodexConfig;
use crate::settings::{InstallSettings, Platform, DEFAULT_API_BASE, DEFAULT_USER_ID};

/// Register the OpenMemory MCP gateway in the Codex config.toml
#[derive(Debug, Parser)]
#[command(name = "openmemory-codex")]
#[command(about = "Configure Codex MCP endpoint for OpenMemory")]
struct Args {
    /// OpenMemory API base URL
    #[arg(long, env = "OPENMEMORY_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// User identifier for Codex session
    #[arg(long, env = "OPENMEMORY_USER_ID", default_value = DEFAULT_USER_ID)]
    user_id: String,

    /// Launcher flavour to write (defaults to the host platform)
    #[arg(long, value_enum)]
    platform: Option<Platform>,

    /// Print the patched config to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = InstallSettings::new(
        &args.api_base,
        &args.user_id,
        args.platform.unwrap_or_else(Platform::current),
    )?;
    let config = CodexConfig::from_home_dir()?;

    if args.dry_run {
        let (outcome, document) = config.preview(&settings)?;
        eprintln!(
            "Dry run: {} fingerprint {} -> {}",
            outcome.path.display(),
            outcome.before,
            outcome.after
        );
        print!("{}", document);
        return Ok(());
    }

    let outcome = config.apply(&settings)?;
    println!("Updated {}", outcome.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["openmemory-codex"]).unwrap();
        // Environment overrides would make this flaky, so only check when unset.
        if std::env::var_os("OPENMEMORY_API_BASE").is_none() {
            assert_eq!(args.api_base, "http://localhost:8765");
        }
        if std::env::var_os("OPENMEMORY_USER_ID").is_none() {
            assert_eq!(args.user_id, "default_user");
        }
        assert!(args.platform.is_none());
        assert!(!args.dry_run);
    }

    #[test]
    fn test_args_explicit() {
        let args = Args::try_parse_from([
            "openmemory-codex",
            "--api-base",
            "https://mem.example.com/",
            "--user-id",
            "alice",
            "--platform",
            "windows",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.api_base, "https://mem.example.com/");
        assert_eq!(args.user_id, "alice");
        assert_eq!(args.platform, Some(Platform::Windows));
        assert!(args.dry_run);
    }
}
