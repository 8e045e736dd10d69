use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use crate::analysis::FilterReport;

/// Supported verdict table formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Tsv,
    Json,
}

#[derive(Debug, Serialize)]
struct VerdictRow<'a> {
    gene: &'a str,
    variants: Option<usize>,
    status: &'static str,
    reason: &'a str,
}

/// Writes a [`FilterReport`] as one row per gene
pub struct ReportWriter {
    format: ReportFormat,
    only_compatible: bool,
}

impl ReportWriter {
    pub fn new(format: ReportFormat, only_compatible: bool) -> Self {
        Self {
            format,
            only_compatible,
        }
    }

    pub fn write<W: Write>(&self, report: &FilterReport, out: W) -> Result<()> {
        match self.format {
            ReportFormat::Tsv => self.write_tsv(report, out),
            ReportFormat::Json => self.write_json(report, out),
        }
    }

    fn rows<'a>(&self, report: &'a FilterReport) -> Vec<VerdictRow<'a>> {
        let verdicts = report
            .verdicts
            .iter()
            .filter(|v| v.compatible || !self.only_compatible)
            .map(|v| VerdictRow {
                gene: &v.gene,
                variants: Some(v.variants),
                status: if v.compatible {
                    "compatible"
                } else {
                    "incompatible"
                },
                reason: "",
            });
        let skipped = report
            .skipped
            .iter()
            .filter(|_| !self.only_compatible)
            .map(|s| VerdictRow {
                gene: &s.gene,
                variants: None,
                status: "error",
                reason: &s.reason,
            });
        verdicts.chain(skipped).collect()
    }

    fn write_tsv<W: Write>(&self, report: &FilterReport, out: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(out);
        for row in self.rows(report) {
            writer
                .serialize(&row)
                .with_context(|| format!("Failed to write verdict for {}", row.gene))?;
        }
        writer.flush().context("Failed to flush verdict table")?;
        Ok(())
    }

    fn write_json<W: Write>(&self, report: &FilterReport, mut out: W) -> Result<()> {
        let body = serde_json::json!({
            "pedigree": report.pedigree,
            "mode": report.mode,
            "genes": self.rows(report),
        });
        serde_json::to_writer_pretty(&mut out, &body).context("Failed to write JSON report")?;
        writeln!(out)?;
        Ok(())
    }
}
