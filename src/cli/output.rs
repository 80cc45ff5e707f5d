use std::{fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;

use crate::{chart, core::Trace, io, prelude::*};

#[derive(Parser)]
pub struct OutputArgs {
    /// Save the per-step trace as CSV.
    #[clap(long = "trace-csv", env = "TRACE_CSV_PATH")]
    pub trace: Option<PathBuf>,

    /// Save the summary as TOML.
    #[clap(long = "summary-toml", env = "SUMMARY_TOML_PATH")]
    pub summary: Option<PathBuf>,

    /// Save the power and state-of-charge chart as SVG.
    #[clap(long = "chart-svg", env = "CHART_SVG_PATH")]
    pub chart: Option<PathBuf>,

    #[clap(long = "chart-width", default_value = "1200", env = "CHART_WIDTH")]
    pub chart_width: u32,

    #[clap(long = "chart-height", default_value = "800", env = "CHART_HEIGHT")]
    pub chart_height: u32,
}

impl OutputArgs {
    pub fn save(&self, title: &str, trace: &Trace, critical_state_of_charge: f64) -> Result {
        if let Some(path) = &self.trace {
            let file = File::create(path)
                .with_context(|| format!("failed to create `{}`", path.display()))?;
            io::trace::write(trace, BufWriter::new(file))?;
            info!(path = %path.display(), "saved the trace");
        }
        if let Some(path) = &self.summary {
            io::summary::write_path(&trace.summarize(critical_state_of_charge), path)?;
        }
        if let Some(path) = &self.chart {
            let svg = chart::render_svg(
                trace,
                title,
                critical_state_of_charge,
                (self.chart_width, self.chart_height),
            )?;
            std::fs::write(path, svg)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            info!(path = %path.display(), "saved the chart");
        }
        Ok(())
    }
}
