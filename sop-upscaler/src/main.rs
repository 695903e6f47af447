use anyhow::{anyhow, Result};
use clap::{arg, ArgGroup, ArgMatches, Command};
use sop_instances::{inspect, run, Instance, UpscaleConfig, UpscaleReport};
use sop_utils::{init_logging, jsonify_pretty, read_json_arg};
use std::path::{Path, PathBuf};
use tracing::info;

fn cli() -> Command {
    Command::new("sop-upscaler")
        .about("Builds larger sequential ordering instances for scalability benchmarks")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("upscale")
                .about("Tiles an instance up to a new size and writes it")
                .arg(
                    arg!(<FILE> "Path to the instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-t --times <TIMES> "Replicate the task weights TIMES x TIMES")
                        .required(false)
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-s --size <SIZE> "Target dimension including the two sentinels")
                        .required(false)
                        .value_parser(clap::value_parser!(usize)),
                )
                .group(
                    ArgGroup::new("mode")
                        .args(["times", "size"])
                        .required(true)
                        .multiple(false),
                )
                .arg(
                    arg!(-o --output <OUTPUT> "Output path (default: the rewritten instance NAME)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"forbidden-cost" <COST> "Cost of the direct start to end transition (default: 1000000)")
                        .required(false)
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("upscale_settings")
                .about("Runs an upscale described by a settings json")
                .arg(
                    arg!(<SETTINGS> "Settings json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("verify_instance")
                .about("Checks that an instance parses and has no dependency cycle")
                .arg(
                    arg!(<FILE> "Path to the instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: {}", e);
    }
    let matches = cli().get_matches();

    if let Err(e) = dispatch(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("upscale", sub_m)) => upscale(config_from_flags(sub_m)?),
        Some(("upscale_settings", sub_m)) => upscale_settings(
            sub_m
                .get_one::<String>("SETTINGS")
                .ok_or_else(|| anyhow!("Missing settings"))?,
        ),
        Some(("verify_instance", sub_m)) => verify_instance(
            sub_m
                .get_one::<PathBuf>("FILE")
                .ok_or_else(|| anyhow!("Missing instance file"))?,
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    }
}

fn config_from_flags(sub_m: &ArgMatches) -> Result<UpscaleConfig> {
    let input = sub_m
        .get_one::<PathBuf>("FILE")
        .cloned()
        .ok_or_else(|| anyhow!("Missing instance file"))?;
    let mut config = UpscaleConfig::from_flags(
        input,
        sub_m.get_one::<usize>("times").copied(),
        sub_m.get_one::<usize>("size").copied(),
        sub_m.get_one::<PathBuf>("output").cloned(),
    )?;
    if let Some(cost) = sub_m.get_one::<u64>("forbidden-cost") {
        config = config.with_forbidden_cost(*cost);
        config.validate()?;
    }
    Ok(config)
}

pub fn upscale(config: UpscaleConfig) -> Result<()> {
    info!(input = %config.input.display(), mode = %config.mode, "upscaling instance");
    let report = run(&config)?;
    print_report(&report);
    Ok(())
}

pub fn upscale_settings(settings: &str) -> Result<()> {
    let settings = read_json_arg(settings)
        .map_err(|e| anyhow!("Failed to read settings file '{}': {}", settings, e))?;
    let config = UpscaleConfig::from_json(&settings)?;
    upscale(config)
}

pub fn verify_instance(path: &Path) -> Result<()> {
    let instance = Instance::read(path)?;
    let summary = inspect(&instance);
    println!("{}", jsonify_pretty(&summary));
    if summary.acyclic {
        Ok(())
    } else {
        Err(anyhow!(
            "Instance '{}' has a dependency cycle",
            path.display()
        ))
    }
}

fn print_report(report: &UpscaleReport) {
    println!("{}", jsonify_pretty(report));
}
