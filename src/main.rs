use anyhow::{Context, Result};
use clap::Parser;
use pkgindex::{
    index::{OutputFormat, MALFORMED_TARGET},
    PackageIndex, PackageKey,
};
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Index a package CSV by (package, architecture, release) and look up one key.
#[derive(Debug, Parser)]
#[command(name = "pkgindex", version)]
struct Cli {
    /// CSV file whose header names `package`, `architecture` and `release`
    csv_file: PathBuf,

    #[arg(long, default_value = "openssl", conflicts_with = "key")]
    package: String,

    #[arg(long = "arch", default_value = "amd64", conflicts_with = "key")]
    architecture: String,

    #[arg(long, default_value = "22.04", conflicts_with = "key")]
    release: String,

    /// Full key as `package|architecture|release`
    #[arg(long)]
    key: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    fn query(&self) -> Result<PackageKey> {
        match &self.key {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(PackageKey::new(
                &self.package,
                &self.architecture,
                &self.release,
            )),
        }
    }
}

fn main() -> ExitCode {
    // usage errors exit 1; --help and --version still exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = init_logging() {
        eprintln!("error: {:#}", err);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, stdout is reserved for results. Malformed-row warnings stay
/// on even when `RUST_LOG` is stricter than `warn`.
fn init_logging() -> Result<()> {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"))
        .add_directive(
            format!("{}=warn", MALFORMED_TARGET)
                .parse()
                .context("building log filter")?,
        );
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let query = cli.query().context("parsing --key")?;

    let index = PackageIndex::from_path(&cli.csv_file)
        .with_context(|| format!("indexing {}", cli.csv_file.display()))?;
    println!("✅ Loaded {} unique entries.", index.len());

    let result = index.lookup(&query);
    info!(key = %query, found = result.is_found(), "lookup");
    println!("{}", result.render(index.headers(), cli.format));
    Ok(())
}
