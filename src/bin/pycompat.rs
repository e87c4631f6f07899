use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};
use pycompat::builtins::{self, BUILTINS};
use pycompat::config::{Config, OutputFormat};
use pycompat::logging::{self, debug, Level};
use pycompat::{BuiltinError, Value};

#[derive(Parser)]
#[command(name = "pycompat")]
#[command(about = "Evaluate a Python builtin with Python semantics")]
#[command(version)]
struct Args {
    /// Config file (default: nearest pycompat.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of a Python repr
    #[arg(long)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// List the available builtins and exit
    #[arg(long)]
    list: bool,

    /// Builtin to call, e.g. divmod
    #[arg(required_unless_present = "list")]
    builtin: Option<String>,

    /// Arguments: JSON literals (42, -1.5, "s", [1,2]), inf/nan, or bare strings
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("cannot determine current directory")?;
            Config::discover(&cwd)?
        }
    };

    let mut log_config = config.log_config()?;
    match args.verbose {
        0 => {}
        1 => log_config.level = Level::DEBUG,
        _ => log_config.level = Level::TRACE,
    }
    let _guard = logging::init_logging(&log_config);

    if args.list {
        for name in BUILTINS {
            println!("{}", name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(name) = args.builtin.as_deref() else {
        anyhow::bail!("no builtin given");
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    match evaluate(name, &args.args) {
        Ok(value) => {
            println!("{}", render(&value, format)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            debug!(builtin = name, "exiting with error");
            eprintln!("{}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn evaluate(name: &str, raw_args: &[String]) -> Result<Value, BuiltinError> {
    let values = raw_args
        .iter()
        .map(|arg| Value::from_cli_arg(arg))
        .collect::<Result<Vec<_>, _>>()?;

    builtins::call(name, &values)
}

fn render(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Repr => value.to_string(),
        OutputFormat::Json => serde_json::to_string(value).context("cannot encode result")?,
    })
}
