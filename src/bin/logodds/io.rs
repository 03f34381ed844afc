use crate::experiment::ExperimentReport;
use anyhow::Result;
use csv::{Writer, WriterBuilder};
use log::{debug, info};
use logodds_utils::engine::ModelReport;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const MODEL_FIELDS: [&str; 9] = [
    "model",
    "mode",
    "sampled_mean",
    "sampled_sd",
    "q05",
    "q50",
    "q95",
    "exact_mean",
    "exact_posterior",
];

pub trait ReportWriter {
    fn write_header(&mut self) -> Result<()>;
    fn write_model(&mut self, report: &ModelReport) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

pub struct TsvReportWriter {
    file: File,
    writer: Writer<File>,
}

impl TsvReportWriter {
    pub fn new(file_path: &Path) -> Result<Self> {
        let file = File::create(file_path)?;
        let writer = WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(file.try_clone()?);
        Ok(Self { file, writer })
    }

    pub fn write_models_iter<'a, I>(&mut self, reports: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a ModelReport>,
    {
        self.write_header()?;
        for report in reports.into_iter() {
            self.write_model(report)?;
        }
        self.flush()?;
        Ok(())
    }
}

impl ReportWriter for TsvReportWriter {
    fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(MODEL_FIELDS)?;
        Ok(())
    }

    fn write_model(&mut self, report: &ModelReport) -> Result<()> {
        let fields = vec![
            report.model.to_string(),
            report.mode.to_string(),
            format!("{:.6}", report.sampled.mean),
            format!("{:.6}", report.sampled.sd),
            format!("{:.6}", report.sampled.q05),
            format!("{:.6}", report.sampled.q50),
            format!("{:.6}", report.sampled.q95),
            format!("{:.6}", report.exact_mean),
            format!("Beta({}, {})", report.exact_posterior.a, report.exact_posterior.b),
        ];
        self.writer.write_record(&fields)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.file.sync_all()?;
        Ok(())
    }
}

/// Two-column key/value summary of the simulated trials.
pub fn write_summary(path: &Path, report: &ExperimentReport) -> Result<()> {
    let mut writer = WriterBuilder::new().delimiter(b'\t').from_path(path)?;
    let summary = &report.summary;
    let rows = vec![
        ("n", summary.n.to_string()),
        ("successes", summary.successes.to_string()),
        ("mle", format!("{:.6}", summary.mle)),
        ("posterior", format!("Beta({}, {})", summary.posterior.a, summary.posterior.b)),
        ("posterior_mean", format!("{:.6}", summary.posterior_mean)),
        ("posterior_mode", summary.posterior_mode.to_string()),
    ];
    writer.write_record(["statistic", "value"])?;
    for (key, value) in rows {
        writer.write_record([key, value.as_str()])?;
    }
    writer.flush()?;
    debug!("Wrote summary to {}", path.display());
    Ok(())
}

pub fn write_json(path: &Path, report: &ExperimentReport) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    info!("Wrote JSON report to {}", path.display());
    Ok(())
}
