use std::path::PathBuf;

use boletim::pipeline::{self, GenerateOptions};
use boletim::{BoletimError, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Generate(args) => execute_generate(args),
    }
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    if !args.input.exists() {
        return Err(BoletimError::MissingInput(args.input));
    }

    let options = GenerateOptions {
        input: args.input,
        output_dir: args.output_dir,
        school_name: args.school_name,
        logo: args.logo,
    };

    let summary = pipeline::generate_reports(&options)?;
    println!(
        "{} report(s) written, {} failed",
        summary.written, summary.failed
    );

    if summary.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| BoletimError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate per-student report-card PDFs from a grade spreadsheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate every sheet of the workbook and emit one PDF per student
    /// and class.
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Grade spreadsheet (.xlsx) to read.
    #[arg(long)]
    input: PathBuf,

    /// Directory receiving the generated PDFs.
    #[arg(long)]
    output_dir: PathBuf,

    /// School name printed at the top of every report.
    #[arg(long, default_value = "Educandário Ideal")]
    school_name: String,

    /// Optional school logo (jpg or png) placed on the first page.
    #[arg(long)]
    logo: Option<PathBuf>,
}
