//! Subcommand handlers. Each returns whether the process should exit
//! successfully.

use crate::cli::{ConvertArgs, ExportArgs};
use std::fmt::Write;
use std::path::Path;
use wikidump_config::Config;
use wikidump_convert::{ConvertSummary, convert_dir};
use wikidump_export::{ExportOptions, ExportSummary, Exporter};

pub async fn export(mut config: Config, args: ExportArgs) -> bool {
    args.apply(&mut config);
    let url = match config.validate_database().and_then(|()| config.database.url()) {
        Ok(url) => url,
        Err(error) => {
            eprintln!("Configuration error: {error:?}");
            return false;
        },
    };

    let mut exporter = Exporter::with_tracing(url).with_table_prefix(config.database.table_prefix.clone());
    if exporter.connect().await.is_err() {
        eprintln!("Failed to connect to database");
        return false;
    }

    let options = ExportOptions {
        output_dir: config.export.output_dir,
        namespace: config.export.namespace,
        limit: config.export.limit,
    };
    let outcome = tokio::select! {
        summary = exporter.export_pages(&options) => Some(summary),
        _ = tokio::signal::ctrl_c() => None,
    };
    exporter.disconnect().await;

    let Some(summary) = outcome else {
        println!("\nExport interrupted by user");
        return false;
    };
    print!("{}", export_report(&summary, &options.output_dir));
    !(summary.successful == 0 && summary.total > 0)
}

pub fn convert(mut config: Config, args: ConvertArgs) -> bool {
    args.apply(&mut config);
    match convert_dir(&config.convert.input_dir, &config.convert.output_dir) {
        Ok(summary) => {
            print!("{}", convert_report(&summary, &config.convert.output_dir));
            true
        },
        Err(error) => {
            eprintln!("Conversion failed: {error:?}");
            false
        },
    }
}

fn export_report(summary: &ExportSummary, output_dir: &Path) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "\nExport completed:");
    let _ = writeln!(report, "  Total pages processed: {}", summary.total);
    let _ = writeln!(report, "  Successfully exported: {}", summary.successful);
    let _ = writeln!(report, "  Failed: {}", summary.failed());
    let _ = writeln!(report, "  Output directory: {}", output_dir.display());
    report
}

fn convert_report(summary: &ConvertSummary, output_dir: &Path) -> String {
    let mut report = String::new();
    let _ = writeln!(report, "\nConversion completed:");
    let _ = writeln!(report, "  Total files processed: {}", summary.total);
    let _ = writeln!(report, "  Successfully converted: {}", summary.converted);
    let _ = writeln!(report, "  Failed: {}", summary.failed());
    let _ = writeln!(report, "  Output directory: {}", output_dir.display());
    report
}
