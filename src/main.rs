use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use log::info;
use lsdb_sim::init::init_logging;
use lsdb_sim::read_config::load_config;
use lsdb_sim::{Driver, ReportFormat, Result};

/// Options de la ligne de commande
#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<String>,
    format: Option<ReportFormat>,
    script: Option<String>,
}

fn usage(program: &str) {
    eprintln!("Usage: {} [--config <path>] [--format text|json] [<script>]", program);
    eprintln!("  Sans <script>, les événements sont lus sur l'entrée standard.");
}

fn parse_args(args: &[String]) -> std::result::Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                parsed.config_path = Some(path.clone());
            }
            "--format" => {
                let name = iter.next().ok_or("--format needs a value")?;
                let format = ReportFormat::from_name(name)
                    .ok_or_else(|| format!("unknown format '{}'", name))?;
                parsed.format = Some(format);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path => {
                if parsed.script.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                parsed.script = Some(path.to_string());
            }
        }
    }
    Ok(parsed)
}

fn run(cli: CliArgs) -> Result<()> {
    let mut config = load_config(cli.config_path.as_deref())?;
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    init_logging(&config);

    let stdout = io::stdout();
    let mut driver = Driver::new(stdout.lock(), &config);
    let stats = match &cli.script {
        Some(path) => driver.run(BufReader::new(File::open(path)?))?,
        None => driver.run(io::stdin().lock())?,
    };

    info!(
        "Simulation done: {} lines, {} links applied, {} recomputations, {} reports, {} routers",
        stats.lines,
        stats.links_applied,
        stats.recomputes,
        stats.reports,
        driver.topology().len()
    );
    Ok(())
}

/// Point d'entrée principal du programme
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("lsdb-sim");

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("{}", msg);
            usage(program);
            process::exit(2);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("lsdb-sim").chain(list.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn test_parse_args() {
        let cli = parse_args(&args(&["--config", "sim.toml", "--format", "json", "events.txt"])).unwrap();
        assert_eq!(cli.config_path.as_deref(), Some("sim.toml"));
        assert_eq!(cli.format, Some(ReportFormat::Json));
        assert_eq!(cli.script.as_deref(), Some("events.txt"));

        let empty = parse_args(&args(&[])).unwrap();
        assert!(empty.script.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["--verbose"])).is_err());
        assert!(parse_args(&args(&["--format", "xml"])).is_err());
        assert!(parse_args(&args(&["--config"])).is_err());
        assert!(parse_args(&args(&["a.txt", "b.txt"])).is_err());
    }
}
