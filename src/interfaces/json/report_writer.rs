use crate::application::machine::MachineReport;
use crate::error::Result;
use std::io::Write;

/// Writes a machine report as pretty-printed JSON.
pub struct ReportWriter<W: Write> {
    sink: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write_report(&mut self, report: &MachineReport) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.sink, report)?;
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}
