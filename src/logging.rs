use env_logger::WriteStyle;
use log::LevelFilter;
use std::io::Write;

/// `RUST_LOG` still overrides the default `Info` filter.
pub(crate) fn try_init() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "[RACESIM | {} | {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .write_style(WriteStyle::Auto)
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .try_init()
}
