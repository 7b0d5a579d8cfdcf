use clap::{Parser, Subcommand, ValueEnum};
use hr_dashboard_lib::models::{PerformanceCategory, SchemaReport};
use hr_dashboard_lib::services::{decor, locator};
use hr_dashboard_lib::{
    build_view, global_cache, logging, Config, Dataset, DatasetStatus, Section, ViewFilters,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Load the HR workbooks and print dataset summaries or section views as JSON
#[derive(Parser, Debug)]
#[command(name = "hr-dashboard", version)]
struct Args {
    /// Directory holding the workbooks (overrides HR_DASHBOARD_DATA_DIR)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which workbooks are present and how each dataset loaded
    Load,
    /// Print one navigation section's view model
    View {
        #[arg(value_enum)]
        section: SectionArg,

        /// Case-insensitive search (Leave, Master File)
        #[arg(long)]
        search: Option<String>,

        /// Business unit filter, repeatable (Org Structure)
        #[arg(long = "bu", value_name = "BUSINESS_UNIT")]
        business_units: Vec<String>,

        /// Category filter (Performance)
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
    },
    /// Fetch the configured decorative payloads
    Decor,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SectionArg {
    Overview,
    Leave,
    Org,
    Movement,
    Recruitment,
    Performance,
    Master,
    Policies,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::Overview => Section::Overview,
            SectionArg::Leave => Section::Leave,
            SectionArg::Org => Section::OrgStructure,
            SectionArg::Movement => Section::Movement,
            SectionArg::Recruitment => Section::Recruitment,
            SectionArg::Performance => Section::Performance,
            SectionArg::Master => Section::MasterFile,
            SectionArg::Policies => Section::Policies,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CategoryArg {
    High,
    Average,
    Low,
    Pending,
}

impl From<CategoryArg> for PerformanceCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::High => PerformanceCategory::HighPerformer,
            CategoryArg::Average => PerformanceCategory::Average,
            CategoryArg::Low => PerformanceCategory::LowPerformer,
            CategoryArg::Pending => PerformanceCategory::Pending,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DatasetSummary<'a> {
    name: &'static str,
    records: usize,
    status: &'a DatasetStatus,
    schema: &'a SchemaReport,
}

fn summarize<'a, T>(name: &'static str, dataset: &'a Dataset<T>) -> DatasetSummary<'a> {
    DatasetSummary {
        name,
        records: dataset.len(),
        status: &dataset.status,
        schema: &dataset.schema,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let out = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", out);
    Ok(())
}

fn run(args: Args) -> Result<(), String> {
    let mut config = Config::from_env();
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    match args.command {
        Command::Load => {
            let data = global_cache().get_or_load(&config);
            let datasets = vec![
                summarize("active", &data.active),
                summarize("inactive", &data.inactive),
                summarize("recruitment", &data.recruitment),
                summarize("performance", &data.performance),
                summarize("leave", &data.leave),
            ];
            let summary = serde_json::json!({
                "sources": locator::locate(&config),
                "datasets": datasets,
                "warnings": &data.warnings,
            });
            print_json(&summary)
        }
        Command::View {
            section,
            search,
            business_units,
            category,
        } => {
            let data = global_cache().get_or_load(&config);
            for warning in &data.warnings {
                eprintln!("warning: {}", warning);
            }
            let filters = ViewFilters {
                search,
                business_units,
                category: category.map(PerformanceCategory::from),
            };
            let section = Section::from(section);
            let view = build_view(section, &data, &filters);
            print_json(&serde_json::json!({ "section": section.title(), "view": view }))
        }
        Command::Decor => print_json(&decor::fetch_all(&config)),
    }
}

fn main() -> ExitCode {
    logging::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
