//! Sink that renders fixes onto any `Write` stream

use crate::api::formatting::{CsvFormatter, JsonFormatter, OutputFormat, TextFormatter};
use crate::core::FixRecord;
use crate::link::{FixSink, LinkError, LinkResult};
use std::io::Write;

/// Writes one formatted fix per line (or block, for full text)
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
    text: TextFormatter,
    json: JsonFormatter,
    csv: CsvFormatter,
    header_written: bool,
    sent: u64,
    connected: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            text: TextFormatter::compact(),
            json: JsonFormatter::new(),
            csv: CsvFormatter::new(),
            header_written: false,
            sent: 0,
            connected: true,
        }
    }

    /// Use the multi-line text layout
    pub fn with_full_text(mut self) -> Self {
        self.text = TextFormatter::new();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, fix: &FixRecord) -> LinkResult<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text.format_text(fix)),
            OutputFormat::Json => self.json.format_json(fix).map_err(|e| LinkError::EncodingFailed {
                details: e.to_string(),
            }),
            OutputFormat::Csv => {
                let row = self.csv.format_csv(fix);
                if self.csv.include_header && !self.header_written {
                    self.header_written = true;
                    Ok(format!("{}\n{}", self.csv.header(), row))
                } else {
                    Ok(row)
                }
            }
        }
    }
}

impl<W: Write> FixSink for WriterSink<W> {
    fn send_fix(&mut self, fix: &FixRecord) -> LinkResult<()> {
        if !self.connected {
            return Err(LinkError::Disconnected);
        }

        let line = self.render(fix)?;
        if let Err(e) = writeln!(self.writer, "{}", line.trim_end()) {
            let err = LinkError::from(e);
            if err == LinkError::Disconnected {
                self.connected = false;
            }
            return Err(err);
        }

        self.sent += 1;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn flush(&mut self) -> LinkResult<()> {
        self.writer.flush().map_err(LinkError::from)
    }

    fn sent_count(&self) -> u64 {
        self.sent
    }
}
