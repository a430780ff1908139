//! Visit table output
//!
//! Writes the visit table as JSON Lines or CSV. Rows are written exactly as
//! generated: no grouping, binning or time-unit extraction happens here.

use std::io::Write;
use tracing::debug;

use crate::events::{columns, VisitEvent, VisitRecord};
use crate::simulation::SimulationResult;
use crate::types::OutputFormat;

/// Timestamp layout shared by both formats
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Streaming writer for the visit table
#[derive(Debug)]
pub struct VisitWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    header_written: bool,
    rows_written: usize,
}

impl<W: Write> VisitWriter<W> {
    /// Create a writer for the given format
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format, header_written: false, rows_written: 0 }
    }

    /// Output format of this writer
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    fn write_header(&mut self) -> SimulationResult<()> {
        if self.format == OutputFormat::Csv && !self.header_written {
            writeln!(self.writer, "{}", columns::ALL.join(","))?;
        }
        self.header_written = true;
        Ok(())
    }

    /// Write a single visit as one row
    pub fn write_event(&mut self, event: &VisitEvent) -> SimulationResult<()> {
        self.write_header()?;

        match self.format {
            OutputFormat::Json => {
                let line = serde_json::to_string(&VisitRecord::from(event))?;
                writeln!(self.writer, "{}", line)?;
            }
            OutputFormat::Csv => {
                writeln!(
                    self.writer,
                    "{},{},{},{}",
                    event.timestamp.format(TIMESTAMP_FORMAT),
                    event.product,
                    event.buyer_age,
                    event.buyer_sex
                )?;
            }
        }

        self.rows_written += 1;
        Ok(())
    }

    /// Write every visit in order, returning the number of rows written
    pub fn write_all(&mut self, events: &[VisitEvent]) -> SimulationResult<usize> {
        for event in events {
            self.write_event(event)?;
        }
        debug!(rows = events.len(), format = %self.format, "Wrote visit rows");
        Ok(events.len())
    }

    /// Flush and hand back the underlying writer
    ///
    /// A CSV table with no rows still gets its header.
    pub fn finish(mut self) -> SimulationResult<W> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, Sex};
    use chrono::NaiveDate;

    fn events() -> Vec<VisitEvent> {
        let day = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
        vec![
            VisitEvent::new(day.and_hms_opt(9, 0, 0).unwrap(), Product::A, 31, Sex::Male),
            VisitEvent::new(day.and_hms_opt(14, 0, 0).unwrap(), Product::C, 70, Sex::Female),
        ]
    }

    #[test]
    fn test_json_lines_output() {
        let mut writer = VisitWriter::new(Vec::new(), OutputFormat::Json);
        assert_eq!(writer.write_all(&events()).unwrap(), 2);
        assert_eq!(writer.rows_written(), 2);

        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let record: VisitRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(record.product, Product::C);
        assert_eq!(record.age, 70);
        assert_eq!(record.sex, Sex::Female);
        assert!(lines[0].contains("\"来客時間\":\"2000-01-03T09:00:00\""));
    }

    #[test]
    fn test_csv_output() {
        let mut writer = VisitWriter::new(Vec::new(), OutputFormat::Csv);
        writer.write_all(&events()).unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "来客時間,購入商品,年齢,性別");
        assert_eq!(lines[1], "2000-01-03T09:00:00,商品A,31,男");
        assert_eq!(lines[2], "2000-01-03T14:00:00,商品C,70,女");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_csv_keeps_header() {
        let writer = VisitWriter::new(Vec::new(), OutputFormat::Csv);
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(text, "来客時間,購入商品,年齢,性別\n");
    }

    #[test]
    fn test_empty_json_is_empty() {
        let writer = VisitWriter::new(Vec::new(), OutputFormat::Json);
        assert!(writer.finish().unwrap().is_empty());
    }
}
