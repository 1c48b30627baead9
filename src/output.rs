use std::io::{self, Write};

use serde::Serialize;

use crate::linkcheck::LinkReportRow;
use crate::pipeline::CleanReport;

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_clean(report: &CleanReport) -> io::Result<()> {
        Self::print_json(report)
    }

    pub fn print_links(rows: &[LinkReportRow]) -> io::Result<()> {
        Self::print_json(&rows)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
