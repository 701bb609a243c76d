//! Result tables and the sinks that render them (CSV file, tab-aligned console).

use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::stats::median;

/// Column stop width used by the aligned console output.
pub const TAB_WIDTH: usize = 8;

pub trait RecordSink {
    fn write_record(&mut self, record: &[String]) -> io::Result<()>;
    fn finish(self: Box<Self>) -> io::Result<()>;
}

pub struct CsvSink<W: Write> {
    w: csv::Writer<BufWriter<W>>,
}
impl<W: Write> CsvSink<W> {
    pub fn new(inner: W) -> Self {
        let w = csv::WriterBuilder::new().has_headers(false).from_writer(BufWriter::new(inner));
        Self { w }
    }
}
impl<W: Write> RecordSink for CsvSink<W> {
    fn write_record(&mut self, record: &[String]) -> io::Result<()> {
        self.w.write_record(record).map_err(|e| io::Error::other(e.to_string()))
    }
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        self.w.flush()
    }
}

/// Buffers records and writes them on `finish` with every non-final cell padded by tabs
/// to the next `TAB_WIDTH` stop past the widest cell of its column.
pub struct AlignedSink<W: Write> {
    w: W,
    rows: Vec<Vec<String>>,
}
impl<W: Write> AlignedSink<W> {
    pub fn new(inner: W) -> Self { Self { w: inner, rows: Vec::new() } }
}
impl<W: Write> RecordSink for AlignedSink<W> {
    fn write_record(&mut self, record: &[String]) -> io::Result<()> {
        self.rows.push(record.to_vec());
        Ok(())
    }
    fn finish(mut self: Box<Self>) -> io::Result<()> {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut stops = vec![0usize; cols];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                stops[i] = stops[i].max(cell.chars().count());
            }
        }
        for s in &mut stops {
            *s = (*s / TAB_WIDTH + 1) * TAB_WIDTH;
        }
        let mut line = String::new();
        for row in &self.rows {
            line.clear();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let width = cell.chars().count();
                    let tabs = (stops[i] - width).div_ceil(TAB_WIDTH);
                    line.extend(std::iter::repeat_n('\t', tabs));
                }
            }
            line.push('\n');
            self.w.write_all(line.as_bytes())?;
        }
        self.w.flush()
    }
}

/// Latencies for one query: one column per size class, one sample per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    sizes: Vec<usize>,
    samples: Vec<Vec<Duration>>,
}

impl ResultTable {
    pub fn new(sizes: &[usize]) -> Self {
        Self { sizes: sizes.to_vec(), samples: vec![Vec::new(); sizes.len()] }
    }

    /// Appends the next run's sample to the column at `col`.
    pub fn record(&mut self, col: usize, elapsed: Duration) {
        self.samples[col].push(elapsed);
    }

    pub fn sizes(&self) -> &[usize] { &self.sizes }

    pub fn samples(&self, col: usize) -> &[Duration] { &self.samples[col] }

    pub fn run_count(&self) -> usize {
        self.samples.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn medians(&self) -> Vec<Duration> {
        self.samples.iter().map(|s| median(s)).collect()
    }

    /// Header, one row per run (1-based) and a trailing `median` row; cells in whole milliseconds.
    pub fn records(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.run_count() + 2);
        let mut header = Vec::with_capacity(self.sizes.len() + 1);
        header.push("run".to_string());
        header.extend(self.sizes.iter().map(|sz| format!("{sz} B")));
        out.push(header);
        for run in 0..self.run_count() {
            let mut row = Vec::with_capacity(self.sizes.len() + 1);
            row.push((run + 1).to_string());
            for col in &self.samples {
                row.push(col.get(run).map(|d| d.as_millis().to_string()).unwrap_or_default());
            }
            out.push(row);
        }
        let mut med = Vec::with_capacity(self.sizes.len() + 1);
        med.push("median".to_string());
        med.extend(self.medians().iter().map(|d| d.as_millis().to_string()));
        out.push(med);
        out
    }

    pub fn write_to<S: RecordSink>(&self, mut sink: Box<S>) -> io::Result<()> {
        for rec in self.records() {
            sink.write_record(&rec)?;
        }
        sink.finish()
    }

    /// Creates or truncates `path` and writes the table as CSV.
    pub fn write_csv(&self, path: &Path) -> io::Result<()> {
        let f = std::fs::File::create(path)?;
        self.write_to(Box::new(CsvSink::new(f)))
    }

    pub fn write_aligned<W: Write>(&self, out: W) -> io::Result<()> {
        self.write_to(Box::new(AlignedSink::new(out)))
    }
}
