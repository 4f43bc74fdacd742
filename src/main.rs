use clap::Parser;
use color_eyre::Result;
use log::info;
use postlens::cli::Args;
use postlens::config::AppConfig;
use postlens::dataset::{Dataset, LoadOptions};
use postlens::error::user_message;
use postlens::pages::AnalysisConfig;
use postlens::search::SearchQuery;
use postlens::{build_page, render, search, ConfigManager, APP_NAME};

fn load_options(config: &AppConfig, args: &Args) -> LoadOptions {
    let mut opts = config.file_loading.load_options();
    if let Some(delimiter) = args.delimiter {
        opts = opts.with_delimiter(delimiter);
    }
    if args.no_header {
        opts = opts.with_has_header(false);
    }
    if args.no_index_column {
        opts = opts.with_index_column(false);
    }
    opts
}

fn analysis_config(config: &AppConfig, args: &Args) -> AnalysisConfig {
    let mut analysis = config.analysis.analysis_config();
    if let Some(top_n) = args.top_n {
        analysis.top_n = top_n;
    }
    if let Some(bins) = args.bins {
        analysis.histogram_bins = bins;
    }
    analysis
}

fn run(args: &Args) -> Result<()> {
    let config = AppConfig::load(APP_NAME)?;

    let dataset = Dataset::from_csv(&args.path, &load_options(&config, args))?;
    info!(
        "loaded {} records, {} columns from {}",
        dataset.height(),
        dataset.column_names().len(),
        args.path.display()
    );

    let content = build_page(&dataset, args.page.into(), &analysis_config(&config, args))?;
    print!("{}", render::render_page(&content));

    // The search runs independently of page selection and renders after
    // the page's own content.
    if let Some(mode) = args.search_by {
        let raw = args.key.as_deref().unwrap_or("");
        match SearchQuery::parse(mode.into(), raw) {
            Some(query) => {
                let results = search(&dataset, &query)?;
                print!(
                    "{}",
                    render::render_search_results(&results, &config.display.search_columns)
                );
            }
            None => println!("\n== Search Results ==\n(no matching records)"),
        }
    }

    Ok(())
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.write_config {
        let manager = ConfigManager::new(APP_NAME)?;
        let path = manager.write_default_config(args.force)?;
        println!("Wrote default config to {}", path.display());
        return Ok(Some(()));
    }
    Ok(None)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();
    let args = Args::parse();

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    if let Err(report) = run(&args) {
        eprintln!("Error: {}", user_message(&report));
        std::process::exit(1);
    }
    Ok(())
}
