//! bikeshare - Explore US bike share trip data from the command line

use bikeshare::{
    analysis::Analyzer,
    cli::{Cli, Command},
    interactive::InteractiveSession,
    output::get_formatter,
};
use bikeshare_core::filters::FilterApplier;
use bikeshare_csv::CsvDataLoader;
use clap::Parser;
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> bikeshare::Result<()> {
    let cli = Cli::parse();

    // Quiet by default; --verbose opts into info and honours RUST_LOG
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bikeshare=info"))
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if !is_terminal::is_terminal(io::stdout()) {
        colored::control::set_override(false);
    }

    let config = cli.source_config()?;
    let show_progress = !cli.json && is_terminal::is_terminal(io::stderr());
    let loader = CsvDataLoader::new(config).with_progress(show_progress);
    let analyzer = Analyzer::new(loader).with_parallel(cli.parallel);
    let formatter = get_formatter(cli.json);

    match cli.command {
        Some(Command::Stats { filter }) => {
            let spec = filter.to_spec();
            info!("Running statistics for {}", spec);
            let report = analyzer.run(&spec)?;
            print!("{}", formatter.format_report(&report)?);
        }
        Some(Command::Raw {
            filter,
            offset,
            count,
        }) => {
            let spec = filter.to_spec();
            info!("Printing {} raw rows from offset {} ({})", count, offset, spec);
            let dataset = analyzer.load(spec.city)?;
            let view = FilterApplier::apply(&dataset, &spec);
            print!("{}", formatter.format_trips(view.slice(offset, count), offset)?);
        }
        Some(Command::Interactive) | None => {
            info!("Starting interactive session");
            let stdin = io::stdin();
            let stdout = io::stdout();
            InteractiveSession::new(&analyzer, formatter.as_ref(), stdin.lock(), stdout.lock())
                .run()?;
        }
    }

    io::stdout().flush()?;
    Ok(())
}
