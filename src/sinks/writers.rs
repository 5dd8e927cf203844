use std::fmt::Write as _;
use std::path::Path;

use crate::error::SinkError;
use crate::metrics::RunReport;

/// Writes the full report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub async fn write_json_report(path: &Path, report: &RunReport) -> Result<(), SinkError> {
    let json =
        serde_json::to_vec_pretty(report).map_err(|err| SinkError::SerializeJson { source: err })?;
    tokio::fs::write(path, json)
        .await
        .map_err(|err| SinkError::WriteJson {
            path: path.to_path_buf(),
            source: err,
        })
}

/// Writes one CSV row per endpoint with the headline statistics.
///
/// # Errors
///
/// Returns an error if formatting or the file write fails.
pub async fn write_csv_report(path: &Path, report: &RunReport) -> Result<(), SinkError> {
    let mut output = String::new();
    writeln!(
        output,
        "name,total_requests,successful_requests,failed_requests,success_rate,\
         min_latency_ms,avg_latency_ms,max_latency_ms,requests_per_second,\
         request_bytes,response_bytes,distinct_errors"
    )
    .map_err(|err| SinkError::FormatCsv { source: err })?;

    for stats in &report.endpoints {
        writeln!(
            output,
            "{},{},{},{},{:.4},{:.2},{:.2},{:.2},{:.2},{},{},{}",
            csv_field(&stats.name),
            stats.total_requests,
            stats.successful_requests,
            stats.failed_requests,
            stats.success_rate,
            stats.min_latency_ms,
            stats.avg_latency_ms,
            stats.max_latency_ms,
            stats.requests_per_second,
            stats.request_bytes,
            stats.response_bytes,
            stats.errors.len()
        )
        .map_err(|err| SinkError::FormatCsv { source: err })?;
    }

    tokio::fs::write(path, output)
        .await
        .map_err(|err| SinkError::WriteCsv {
            path: path.to_path_buf(),
            source: err,
        })
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
