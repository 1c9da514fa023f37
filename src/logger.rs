use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to `log_file`. The terminal belongs to the UI, so
/// nothing is written to stdout/stderr.
///
/// Keep the returned guard alive for the whole run; dropping it flushes the
/// background writer.
pub fn init(log_file: &Path, filter: &str) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| format!("Log path {} has no file name", log_file.display()))?;
    std::fs::create_dir_all(directory)?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    Ok(guard)
}
