use std::io::{self, Write};

use thiserror::Error;

/// Placeholder written in every statistic column of a row with no data.
pub const NA: &str = "NA";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TableFormat {
    #[default]
    Csv,
    #[value(name = "md")]
    Markdown,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("table output failed: {0}")]
    Io(#[from] io::Error),
}

pub enum TableWriter<W: Write> {
    Csv(csv::Writer<W>),
    Markdown(W),
}

impl<W: Write> TableWriter<W> {
    pub fn new(format: TableFormat, out: W) -> Self {
        match format {
            TableFormat::Csv => Self::Csv(csv::Writer::from_writer(out)),
            TableFormat::Markdown => Self::Markdown(out),
        }
    }

    pub fn write_header(&mut self, headers: &[&str]) -> Result<(), TableError> {
        self.write_row(headers)?;
        if let Self::Markdown(out) = self {
            let separator = vec!["---"; headers.len()].join("|");
            writeln!(out, "|{separator}|")?;
        }
        Ok(())
    }

    pub fn write_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<(), TableError> {
        match self {
            Self::Csv(writer) => writer.write_record(cells.iter().map(|c| c.as_ref()))?,
            Self::Markdown(out) => {
                let joined = cells
                    .iter()
                    .map(|c| c.as_ref())
                    .collect::<Vec<_>>()
                    .join(" | ");
                writeln!(out, "| {joined} |")?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), TableError> {
        match self {
            Self::Csv(writer) => writer.flush()?,
            Self::Markdown(out) => out.flush()?,
        }
        Ok(())
    }
}

pub fn fixed4(value: f64) -> String {
    format!("{value:.4}")
}
