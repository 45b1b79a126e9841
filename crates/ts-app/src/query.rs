//! Query helpers for extracting data from loaded runs.

use ts_results::TimeseriesRecord;

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and temperature extremes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub peak_electronics_c: f64,
    pub peak_electronics_time_s: f64,
    pub peak_pcm_c: f64,
    pub final_electronics_c: f64,
    pub final_pcm_c: f64,
}

/// Get run summary from timeseries records.
///
/// Ties for the electronics peak resolve to the earliest sample.
pub fn get_run_summary(records: &[TimeseriesRecord]) -> AppResult<RunSummary> {
    let (first, last) = match (records.first(), records.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AppError::InvalidInput("No records in run".to_string())),
    };

    let mut peak_e = first;
    let mut peak_pcm_c = first.pcm_c;
    for r in records {
        if r.electronics_c > peak_e.electronics_c {
            peak_e = r;
        }
        peak_pcm_c = peak_pcm_c.max(r.pcm_c);
    }

    Ok(RunSummary {
        time_range: (first.time_s, last.time_s),
        record_count: records.len(),
        peak_electronics_c: peak_e.electronics_c,
        peak_electronics_time_s: peak_e.time_s,
        peak_pcm_c,
        final_electronics_c: last.electronics_c,
        final_pcm_c: last.pcm_c,
    })
}

/// Extract `(time, value)` pairs for one temperature.
pub fn extract_series(
    records: &[TimeseriesRecord],
    variable: &str,
) -> AppResult<Vec<(f64, f64)>> {
    let pick: fn(&TimeseriesRecord) -> f64 = match variable {
        "electronics" | "electronics_c" | "t_e" => |r| r.electronics_c,
        "pcm" | "pcm_c" | "t_p" => |r| r.pcm_c,
        _ => {
            return Err(AppError::InvalidInput(format!(
                "Unknown variable: {}",
                variable
            )));
        }
    };
    Ok(records.iter().map(|r| (r.time_s, pick(r))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<TimeseriesRecord> {
        [(0.0, 25.0, 25.0), (1.0, 40.0, 24.0), (2.0, 40.0, 26.0), (3.0, 30.0, 25.5)]
            .into_iter()
            .map(|(time_s, electronics_c, pcm_c)| TimeseriesRecord {
                time_s,
                electronics_c,
                pcm_c,
            })
            .collect()
    }

    #[test]
    fn summary_picks_extremes() {
        let summary = get_run_summary(&records()).unwrap();
        assert_eq!(summary.time_range, (0.0, 3.0));
        assert_eq!(summary.record_count, 4);
        assert_eq!(summary.peak_electronics_c, 40.0);
        assert_eq!(summary.peak_electronics_time_s, 1.0);
        assert_eq!(summary.peak_pcm_c, 26.0);
        assert_eq!(summary.final_electronics_c, 30.0);
        assert_eq!(summary.final_pcm_c, 25.5);
    }

    #[test]
    fn empty_run_has_no_summary() {
        assert!(matches!(
            get_run_summary(&[]),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn series_by_name() {
        let recs = records();
        let pcm = extract_series(&recs, "pcm").unwrap();
        assert_eq!(pcm[1], (1.0, 24.0));
        assert_eq!(extract_series(&recs, "t_e").unwrap()[2], (2.0, 40.0));
        assert!(extract_series(&recs, "pressure").is_err());
    }
}
