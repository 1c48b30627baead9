use std::process::ExitCode;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use aadr_curator::config::ConfigLoader;
use aadr_curator::error::AadrError;
use aadr_curator::export;
use aadr_curator::filter::RowCountCheck;
use aadr_curator::linkcheck::{self, HttpLinkClient, LinkReportRow};
use aadr_curator::output::JsonOutput;
use aadr_curator::pipeline::{CleanReport, Pipeline};

#[derive(Parser)]
#[command(name = "aadr-curator")]
#[command(about = "Cleans and enriches AADR ancient-DNA annotation tables")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the cleaning and enrichment pipeline")]
    Clean(CleanArgs),
    #[command(about = "Check DOI link liveness for an exported table")]
    CheckLinks(CheckLinksArgs),
}

#[derive(Args)]
struct CleanArgs {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    output: Option<String>,
}

#[derive(Args)]
struct CheckLinksArgs {
    input: String,

    #[arg(long, default_value = "doi_link_check.csv")]
    output: String,

    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(aadr) = report.downcast_ref::<AadrError>() {
            return ExitCode::from(map_exit_code(aadr));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &AadrError) -> u8 {
    match error {
        AadrError::MissingConfig
        | AadrError::ConfigRead(_)
        | AadrError::ConfigParse(_)
        | AadrError::TableRead { .. }
        | AadrError::ColumnCount { .. }
        | AadrError::MissingColumn { .. } => 2,
        AadrError::LinkHttp(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Clean(args) => run_clean(args, cli.json),
        Commands::CheckLinks(args) => run_check_links(args, cli.json),
    }
}

fn run_clean(args: CleanArgs, json: bool) -> miette::Result<()> {
    let mut config = ConfigLoader::resolve(args.config.as_deref()).into_diagnostic()?;
    if let Some(output) = args.output {
        config.output = Utf8PathBuf::from(output);
    }
    let output_path = config.output.clone();

    let pipeline = Pipeline::new(config);
    let outcome = pipeline.run().into_diagnostic()?;
    export::write_csv(&output_path, &outcome.rows).into_diagnostic()?;

    if json {
        JsonOutput::print_clean(&outcome.report).into_diagnostic()?;
    } else {
        print_clean_summary(&outcome.report, &output_path);
    }
    Ok(())
}

fn run_check_links(args: CheckLinksArgs, json: bool) -> miette::Result<()> {
    let input = Utf8PathBuf::from(args.input);
    let output = Utf8PathBuf::from(args.output);

    let links = linkcheck::collect_doi_links(&input).into_diagnostic()?;
    let client =
        HttpLinkClient::new(Duration::from_secs(args.timeout_secs)).into_diagnostic()?;
    let rows = linkcheck::check_links(&client, &links);
    linkcheck::write_report(&output, &rows).into_diagnostic()?;

    if json {
        JsonOutput::print_links(&rows).into_diagnostic()?;
    } else {
        print_links_summary(&rows, &output);
    }
    Ok(())
}

fn print_clean_summary(report: &CleanReport, output: &Utf8Path) {
    let green = "\x1b[32m";
    let yellow = "\x1b[33m";
    let cyan = "\x1b[36m";
    let red = "\x1b[31m";
    let reset = "\x1b[0m";

    println!("{cyan}🧬 AADR clean summary{reset}");
    match report.row_count {
        RowCountCheck::Consistent { remaining } => {
            println!("{green}✅ row count consistent: {remaining} rows{reset}");
        }
        RowCountCheck::Mismatch {
            expected_remaining,
            remaining,
        } => {
            println!(
                "{red}❌ row count mismatch: {remaining} rows, expected {expected_remaining}{reset}"
            );
        }
        RowCountCheck::Unverified { remaining } => {
            println!("{yellow}⚠️ row count unverified: {remaining} rows{reset}");
        }
    }
    println!(
        "   removed {} reference rows, {} present-day rows (of {} loaded)",
        report.refs_removed, report.presents_removed, report.loaded_rows
    );
    println!(
        "   {} distinct sequence types: {}",
        report.sequence_types.len(),
        report.sequence_types.join(", ")
    );

    if !report.missing_coordinates.is_empty() {
        println!(
            "{yellow}⚠️ localities missing lat/lon: {}{reset}",
            report.missing_coordinates.join(", ")
        );
    }
    if !report.unresolved_regions.is_empty() {
        println!("{yellow}⚠️ rows missing region/sub-region:{reset}");
        for row in &report.unresolved_regions {
            println!(
                "   {} ({}) political_entity={}",
                row.gen_id,
                row.master_id.as_deref().unwrap_or("-"),
                row.political_entity.as_deref().unwrap_or("-")
            );
        }
    }
    if !report.missing_doi_publications.is_empty() {
        println!(
            "{yellow}⚠️ publications missing doi: {}{reset}",
            report.missing_doi_publications.join(", ")
        );
    }

    println!("{green}📁 wrote {output}{reset}");
}

fn print_links_summary(rows: &[LinkReportRow], output: &Utf8Path) {
    let green = "\x1b[32m";
    let yellow = "\x1b[33m";
    let cyan = "\x1b[36m";
    let reset = "\x1b[0m";

    let ok = rows
        .iter()
        .filter(|row| row.status.starts_with('2') || row.status.starts_with('3'))
        .count();
    println!("{cyan}🔗 DOI link check{reset}");
    println!("{green}✅ reachable: {ok}/{}{reset}", rows.len());
    for row in rows.iter().filter(|row| {
        !(row.status.starts_with('2') || row.status.starts_with('3'))
    }) {
        println!("{yellow}⚠️ {} -> {}{reset}", row.doi_link, row.status);
    }
    println!("{green}📁 wrote {output}{reset}");
}
