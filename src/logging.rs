use std::path::PathBuf;

use color_eyre::{Result, eyre::Context};

/// Wire up fern: console at one level, optional log file at another. Every
/// caught failure in the handlers funnels through `log::error!` into here.
pub fn setup_logging(
    console_level: log::LevelFilter,
    log_file: Option<PathBuf>,
    file_level: log::LevelFilter,
) -> Result<()> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(
            fern::Dispatch::new()
                .level(console_level)
                .chain(std::io::stderr()),
        );

    if let Some(path) = log_file {
        dispatch = dispatch.chain(
            fern::Dispatch::new().level(file_level).chain(
                fern::log_file(&path)
                    .context(format!("Failed to open log file: {}", path.display()))?,
            ),
        );
    }

    dispatch.apply().context("Failed to initialize logging")?;
    Ok(())
}
