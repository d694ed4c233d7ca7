mod app;
mod bootstrap;
mod csv_export;
mod table;

use clap::Parser;
use stats_core::settings::Settings;

fn main() {
    let settings = Settings::parse();

    if let Err(e) = bootstrap::setup_logging(&settings.log_level) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&settings) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> stats_core::error::Result<()> {
    let root = settings
        .root
        .clone()
        .unwrap_or_else(bootstrap::default_root);
    tracing::debug!("scanning {}", root.display());

    let report = app::build_report(&root, settings)?;

    println!("{}", table::render(&report.rows, &report.totals));

    if let Some(csv_path) = &settings.csv {
        csv_export::write_csv(csv_path, &report.rows)?;
        println!("Wrote CSV: {}", csv_path.display());
    }

    Ok(())
}
