//! CSV export of a run's timeseries.

use crate::ResultsResult;
use crate::types::TimeseriesRecord;
use std::fmt::Write as _;
use std::path::Path;

pub const CSV_HEADER: &str = "time_s,electronics_c,pcm_c";

pub fn to_csv_string(records: &[TimeseriesRecord]) -> String {
    let mut out = String::with_capacity(32 * (records.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in records {
        // Writing into a String cannot fail
        let _ = writeln!(out, "{},{},{}", r.time_s, r.electronics_c, r.pcm_c);
    }
    out
}

pub fn write_csv(path: &Path, records: &[TimeseriesRecord]) -> ResultsResult<()> {
    std::fs::write(path, to_csv_string(records))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_rows() {
        let records = [
            TimeseriesRecord {
                time_s: 0.0,
                electronics_c: 25.0,
                pcm_c: 25.0,
            },
            TimeseriesRecord {
                time_s: 0.1,
                electronics_c: 25.5,
                pcm_c: 24.75,
            },
        ];
        let csv = to_csv_string(&records);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, ["time_s,electronics_c,pcm_c", "0,25,25", "0.1,25.5,24.75"]);
    }

    #[test]
    fn empty_run_is_header_only() {
        assert_eq!(to_csv_string(&[]), "time_s,electronics_c,pcm_c\n");
    }
}
