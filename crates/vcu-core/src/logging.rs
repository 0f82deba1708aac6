//! Logging setup

use crate::error::VcuError;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Install the global tracing subscriber.
///
/// `level` is a tracing level name (`error` to `trace`); `json` selects
/// line-delimited JSON output. Fails if a global subscriber is already set.
pub fn init_logging(level: &str, json: bool) -> Result<(), VcuError> {
    let level = Level::from_str(level)
        .map_err(|_| VcuError::Invalid(format!("unknown log level '{level}'")))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|err| VcuError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unknown_level() {
        assert!(matches!(
            init_logging("chatty", false),
            Err(VcuError::Invalid(_))
        ));
    }
}
