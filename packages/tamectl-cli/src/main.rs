//! tamectl - list and reboot AirTame devices from the command line
//!
//! This binary logs in to the AirTame cloud with an email and password and:
//! - Lists devices grouped by building, or as one flat list
//! - Reboots devices by ID
//! - Reboots every device that is currently online

mod commands;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::RunConfig;
use output::OutputFormat;
use std::ffi::OsString;
use tamectl_core::cloud;

#[derive(Parser)]
#[command(name = "tamectl")]
#[command(version)]
#[command(about = "List and reboot AirTame devices through the AirTame cloud")]
#[command(long_about = "
tamectl talks to the AirTame cloud API on behalf of an account. Every
command logs in first, does one thing and exits.

Examples:
  tamectl --email me@example.com --password ... devices
  tamectl --email me@example.com --password ... reboot 1201 1202
  tamectl --email me@example.com --password ... rebootall
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Account email
    #[arg(long, env = "TAMECTL_EMAIL", global = true)]
    pub email: Option<String>,

    /// Account password
    #[arg(long, env = "TAMECTL_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List devices grouped by building
    Devices,

    /// List all devices as a single list
    #[command(name = "flatdevices", alias = "flat-devices")]
    FlatDevices,

    /// Reboot the given devices
    Reboot {
        /// Numeric device IDs
        #[arg(allow_negative_numbers = true)]
        ids: Vec<String>,
    },

    /// Reboot every device that reports itself online
    #[command(name = "rebootall", alias = "reboot-all")]
    RebootAll,

    /// Show configuration paths and settings
    Config,

    #[command(external_subcommand)]
    External(Vec<String>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(lowercase_verb(std::env::args_os()));

    // Initialize logging; stdout is reserved for command output
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tamectl={},tamectl_core={}", log_level, log_level).into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let Some(command) = &cli.command else {
        print_usage();
        return Ok(());
    };

    let config = RunConfig {
        email: cli.email.clone(),
        password: cli.password.clone(),
        endpoint: cloud::load_cloud_config(),
        format: cli.format,
    };
    let mut out = std::io::stdout();

    match command {
        Commands::Devices => commands::cmd_devices(&config, &mut out).await,
        Commands::FlatDevices => commands::cmd_flat_devices(&config, &mut out).await,
        Commands::Reboot { ids } => commands::cmd_reboot(&config, ids).await,
        Commands::RebootAll => commands::cmd_reboot_all(&config).await,
        Commands::Config => commands::cmd_config(&config, &mut out),
        Commands::External(args) => {
            tracing::debug!("Unknown command: {:?}", args);
            print_usage();
            Ok(())
        }
    }
}

/// Global flags that consume the following argument as their value.
const VALUE_FLAGS: &[&str] = &["--email", "--password", "--format", "-f"];

/// Lowercase the verb (first positional argument) so `DEVICES` and
/// `RebootAll` select the same command as their lowercase forms. Flag
/// values and everything after the verb are left untouched.
fn lowercase_verb<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let mut i = 1;
    while i < args.len() {
        let Some(arg) = args[i].to_str() else {
            break;
        };
        if arg == "--" {
            break;
        }
        if arg.starts_with('-') {
            let takes_value = VALUE_FLAGS.contains(&arg)
                || (!arg.starts_with("--") && arg.len() > 2 && arg.ends_with('f'));
            i += if takes_value { 2 } else { 1 };
            continue;
        }
        let verb: OsString = arg.to_lowercase().into();
        args[i] = verb;
        break;
    }
    args
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_help());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(lowercase_verb(
            std::iter::once("tamectl").chain(args.iter().copied()),
        ))
        .unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_credentials_and_verbs() {
        let cli = parse(&["--email", "a@b.c", "--password", "pw", "flatdevices"]);
        assert_eq!(cli.email.as_deref(), Some("a@b.c"));
        assert_eq!(cli.password.as_deref(), Some("pw"));
        assert!(matches!(cli.command, Some(Commands::FlatDevices)));

        assert!(matches!(parse(&["devices"]).command, Some(Commands::Devices)));
        assert!(matches!(parse(&["rebootall"]).command, Some(Commands::RebootAll)));
        assert!(matches!(parse(&["reboot-all"]).command, Some(Commands::RebootAll)));
    }

    #[test]
    fn test_verbs_are_case_insensitive() {
        assert!(matches!(parse(&["DEVICES"]).command, Some(Commands::Devices)));
        assert!(matches!(parse(&["REBOOTALL"]).command, Some(Commands::RebootAll)));
        assert!(matches!(
            parse(&["--email", "Ops@Example.com", "-vf", "text", "FlatDevices"]).command,
            Some(Commands::FlatDevices)
        ));

        let cli = parse(&["--email", "Ops@Example.com", "--password", "PW", "Reboot", "ABC"]);
        assert_eq!(cli.email.as_deref(), Some("Ops@Example.com"));
        assert_eq!(cli.password.as_deref(), Some("PW"));
        match cli.command {
            Some(Commands::Reboot { ids }) => assert_eq!(ids, vec!["ABC"]),
            _ => panic!("expected reboot command"),
        }
    }

    #[test]
    fn test_lowercase_verb_leaves_flag_values_alone() {
        let args = lowercase_verb(["tamectl", "--password", "SECRET", "--format=json", "DEVICES"]);
        assert_eq!(
            args,
            vec!["tamectl", "--password", "SECRET", "--format=json", "devices"]
        );
    }

    #[test]
    fn test_reboot_accepts_negative_ids() {
        match parse(&["reboot", "-5", "10"]).command {
            Some(Commands::Reboot { ids }) => assert_eq!(ids, vec!["-5", "10"]),
            _ => panic!("expected reboot command"),
        }
    }

    #[test]
    fn test_reboot_keeps_raw_ids() {
        match parse(&["reboot", "10", "abc"]).command {
            Some(Commands::Reboot { ids }) => assert_eq!(ids, vec!["10", "abc"]),
            _ => panic!("expected reboot command"),
        }
        match parse(&["reboot"]).command {
            Some(Commands::Reboot { ids }) => assert!(ids.is_empty()),
            _ => panic!("expected reboot command"),
        }
    }

    #[test]
    fn test_unknown_or_missing_verb_is_not_an_error() {
        assert!(parse(&[]).command.is_none());
        match parse(&["frobnicate", "now"]).command {
            Some(Commands::External(args)) => assert_eq!(args, vec!["frobnicate", "now"]),
            _ => panic!("expected external command"),
        }
    }

    #[test]
    fn test_format_flag() {
        assert!(matches!(parse(&["devices"]).format, OutputFormat::Json));
        assert!(matches!(
            parse(&["--format", "text", "devices"]).format,
            OutputFormat::Text
        ));
    }
}
