//! CLI tool to page through a JSON record file the way a history view does.
//!
//! Usage:
//!   view-run <records.json> [--search TEXT] [--filter field=V1,V2]... [--page N]
//!   view-run <records.json> --json -o page.json
//!
//! If no output file is specified, writes to stdout.

use clap::Parser;
use history_view::{
    JsonFileSource, RecordSource, Role, Selection, SessionContext, SessionUser, ViewConfig,
    ViewPage, ViewPipeline, ViewState,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Search, filter and paginate a JSON array of history records.
#[derive(Parser)]
#[command(name = "view-run")]
struct Cli {
    /// JSON file holding an array of records
    records: PathBuf,

    /// Case-insensitive substring to search for
    #[arg(short, long, default_value = "")]
    search: String,

    /// Categorical selection as field=VALUE[,VALUE...]; repeatable
    #[arg(short, long = "filter")]
    filters: Vec<Selection>,

    /// Page to show (clamped into range)
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    page: i64,

    /// Rows per page
    #[arg(long, env = "HISTORY_VIEW_PAGE_SIZE", default_value_t = 20)]
    page_size: usize,

    /// Number of page buttons in the pagination bar
    #[arg(long, env = "HISTORY_VIEW_WINDOW", default_value_t = 5)]
    window: usize,

    /// Emit the page as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// User id recorded in the session context
    #[arg(long)]
    user: Option<String>,

    /// Role recorded in the session context
    #[arg(long, default_value = "ADMIN")]
    role: String,

    /// Log stage row counts on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "info,history_view=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn session_for(cli: &Cli) -> SessionContext {
    match &cli.user {
        Some(id) => SessionContext::new(
            "",
            SessionUser {
                id: id.clone(),
                name: id.clone(),
                role: Role::from_token(&cli.role),
            },
        ),
        None => SessionContext::anonymous(),
    }
}

fn render_table(page: &ViewPage<'_>, pipeline: &ViewPipeline, window: usize) -> String {
    let vocabulary = pipeline.vocabulary();
    let mut out = String::new();

    for record in &page.items {
        let when = record
            .timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".repeat(19));
        let labels: Vec<String> = record
            .categories
            .iter()
            .map(|(field, token)| vocabulary.describe(field, token).label)
            .collect();
        let text: Vec<&str> = record.text.values().map(String::as_str).collect();
        out.push_str(&format!(
            "{when}  {:<28}  {}\n",
            labels.join(" / "),
            text.join(" | ")
        ));
    }

    if page.is_empty() {
        out.push_str("(no matching records)\n");
    }

    let buttons: Vec<String> = page
        .window(window)
        .map(|n| {
            if n == page.page_number {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    out.push_str(&format!(
        "\n{}    page {}/{}: {}\n",
        page.caption(),
        page.page_number,
        page.total_pages,
        buttons.join(" ")
    ));
    out
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ViewConfig {
        page_size: cli.page_size,
        window_width: cli.window,
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        process::exit(2);
    }

    let session = session_for(&cli);
    let records = match JsonFileSource::new(&cli.records).load(&session) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error reading records '{}': {e}", cli.records.display());
            process::exit(1);
        }
    };

    let mut state = config.initial_state();
    state.set_search_text(cli.search.clone());
    for selection in &cli.filters {
        state.set_selection(selection.field.clone(), selection.values.iter().cloned());
    }
    state.go_to_page(cli.page);

    let pipeline = ViewPipeline::new();
    let (page, traces) = pipeline.apply_traced(&records, &state.criteria, &state.page);
    if cli.verbose {
        for trace in &traces {
            eprintln!(
                "{:<8} {} -> {}",
                trace.stage_name, trace.input_count, trace.output_count
            );
        }
    }

    let output = if cli.json {
        match serde_json::to_string_pretty(&page) {
            Ok(json) => json + "\n",
            Err(e) => {
                eprintln!("Error encoding page: {e}");
                process::exit(1);
            }
        }
    } else {
        render_table(&page, &pipeline, config.window_width)
    };

    write_output(cli.output.as_deref(), &output);
    report(&state, &page, cli.verbose);
}

fn write_output(path: Option<&str>, output: &str) {
    if let Some(out_path) = path {
        if let Some(parent) = Path::new(out_path).parent()
            && !parent.as_os_str().is_empty()
            && fs::create_dir_all(parent).is_err()
        {
            eprintln!("Error creating output directory for '{out_path}'");
            process::exit(1);
        }
        if let Err(e) = fs::write(out_path, output) {
            eprintln!("Error writing output file '{out_path}': {e}");
            process::exit(1);
        }
    } else if let Err(e) = io::stdout().write_all(output.as_bytes()) {
        eprintln!("Error writing output: {e}");
        process::exit(1);
    }
}

fn report(state: &ViewState, page: &ViewPage<'_>, verbose: bool) {
    if verbose {
        eprintln!(
            "Requested page {} -> showing {} of {} ({} matching)",
            state.page.page_number, page.page_number, page.total_pages, page.total_matching
        );
    }
}
