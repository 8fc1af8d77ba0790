use clap::Parser;
use salesreport::{ReportConfig, ReportError, SalesReportGenerator, SqliteSalesData};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Generate a sales report document for one employee.
#[derive(Parser, Debug)]
#[command(name = "salesreport", version, about)]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database holding the sales person views
    #[arg(long, default_value = "sales.db")]
    database: PathBuf,

    /// Directory containing the template resources
    #[arg(long)]
    resources: Option<PathBuf>,

    /// Directory the report is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Sales person id
    employee_id: String,
}

fn build_generator(args: &Args) -> Result<SalesReportGenerator, ReportError> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    if let Some(dir) = &args.resources {
        config = config.with_resource_dir(dir);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    let config = config.resolved()?;

    let data = SqliteSalesData::open(&args.database, config.fiscal_years())?;
    SalesReportGenerator::builder()
        .with_config(config)
        .with_data_provider(Arc::new(data))
        .build()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let generator = match build_generator(&args) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    match generator.generate(&args.employee_id) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
