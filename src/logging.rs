use std::{fs::File, io::Write, path::Path};

use env_logger::Builder;

use crate::error::EngineError;

/// Sends `log` output to a file, since stdout carries the rendered frames.
pub fn setup_logger(logfilepath: impl AsRef<Path>) -> Result<(), EngineError> {
    let log_file = File::create(logfilepath)?;
    Builder::new()
        .format_timestamp_secs()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] - {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter_level(log::LevelFilter::Debug)
        .try_init()
        .map_err(std::io::Error::other)?;
    Ok(())
}
