//! `softcore` command line

use std::path::PathBuf;

use anyhow::Result;
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use softcore_cli::{run_check, run_patch, PatchArgs};
use softcore_engine::Reporter;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("softcore")
        .version(crate_version!())
        .about("Apply a SoftcoreRedux configuration to a host dataset dump")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("patch")
                .about("Patch a dataset dump")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Configuration file (JSON5)"),
                )
                .arg(
                    Arg::new("dataset")
                        .long("dataset")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Dataset dump: a JSON object keyed by table name"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("Where to write the patched dump [default: overwrite --dataset]"),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .action(ArgAction::SetTrue)
                        .help("Emit debug messages regardless of general.debug"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate a configuration and print the effective values")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Configuration file (JSON5)"),
                ),
        )
}

fn path(args: &ArgMatches, name: &str) -> Option<PathBuf> {
    args.get_one::<PathBuf>(name).cloned()
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("patch", args)) => {
            let patch = PatchArgs {
                config: path(args, "config").unwrap_or_default(),
                dataset: path(args, "dataset").unwrap_or_default(),
                output: path(args, "output"),
                debug: args.get_flag("debug"),
            };
            init_tracing(patch.debug);

            let summary = run_patch(&patch, Reporter::default())?;
            println!("{summary}");
            if summary.tally.failed > 0 {
                std::process::exit(2);
            }
        }
        Some(("check", args)) => {
            init_tracing(false);
            let config = path(args, "config").unwrap_or_default();
            println!("{}", run_check(&config)?);
        }
        _ => unreachable!("subcommand is required"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        cli().debug_assert();
    }

    #[test]
    fn patch_requires_dataset() {
        let result = cli().try_get_matches_from(["softcore", "patch", "--config", "c.json5"]);
        assert!(result.is_err());
    }

    #[test]
    fn patch_arguments() {
        let matches = cli()
            .try_get_matches_from([
                "softcore", "patch", "--config", "c.json5", "--dataset", "d.json", "--debug",
            ])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "patch");
        assert_eq!(path(args, "dataset"), Some(PathBuf::from("d.json")));
        assert_eq!(path(args, "output"), None);
        assert!(args.get_flag("debug"));
    }
}
