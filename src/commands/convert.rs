use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sheetcal_core::{
    ConvertOptions, ConvertReport, Dataset, DirectorySink, EventSink, MemorySink, Outcome, convert,
    source,
};

use crate::config::{Overrides, Settings};
use crate::render::Render;

pub struct ConvertRequest {
    pub input: PathBuf,
    pub config_file: Option<PathBuf>,
    pub overrides: Overrides,
    pub dry_run: bool,
}

pub fn run(request: ConvertRequest) -> Result<Outcome> {
    let settings = Settings::load(request.config_file.as_deref(), &request.overrides)?;
    tracing::debug!(?settings, "Resolved settings");

    // Options are validated before the input is even opened.
    let options = ConvertOptions::new(
        &settings.timezone,
        settings.alert_minutes,
        settings.travel_minutes,
    )?;

    let dataset = source::load(&request.input, settings.sheet.as_deref())
        .with_context(|| format!("Could not read {}", request.input.display()))?;

    println!(
        "\n📅 {} ({} {})",
        request.input.display(),
        dataset.len(),
        if dataset.len() == 1 { "row" } else { "rows" }
    );

    let report = if request.dry_run {
        let mut sink = MemorySink::default();
        let report = run_with_sink(&dataset, &options, &mut sink)?;
        println!("{}", "   (dry run, nothing written)".dimmed());
        report
    } else {
        let output_dir = settings.output_path();
        let mut sink = DirectorySink::create(&output_dir)?;
        run_with_sink(&dataset, &options, &mut sink)?
    };

    println!("\n{}", report.render());

    Ok(report.outcome())
}

fn run_with_sink(
    dataset: &Dataset,
    options: &ConvertOptions,
    sink: &mut dyn EventSink,
) -> Result<ConvertReport> {
    let report = convert(dataset, options, sink)?;

    for written in &report.written {
        println!("{}", written.render());
    }
    for failure in &report.skipped {
        println!("{}", failure.render());
    }

    Ok(report)
}
