use crate::config::Logging;
use crate::error::{self, Result};
use snafu::ResultExt;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Layer, layer::Filter, prelude::*, registry::LookupSpan};

/// Installs the global tracing subscriber that writes to stderr.
///
/// If a global subscriber is already installed, it is kept.
pub fn init_logging(logging_config: &Logging) -> Result<()> {
    let console_filter = console_filter(&logging_config.log_spec)?;

    // get a new tracing subscriber registry to add all log and tracing layers to
    let registry =
        tracing_subscriber::Registry::default().with(console_layer_with_filter(console_filter));

    if registry.try_init().is_err() {
        tracing::debug!("a global tracing subscriber is already installed");
    }

    Ok(())
}

fn console_filter(log_spec: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_spec).context(error::InvalidLogSpec { log_spec })
}

fn console_layer_with_filter<S, F: Filter<S> + 'static>(filter: F) -> impl Layer<S>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .pretty()
        .with_file(false)
        .with_target(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_filter(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_accepts_log_specs() {
        assert!(console_filter("info").is_ok());
        assert!(console_filter("warn,cmviz_datatypes=debug").is_ok());
    }

    #[test]
    fn it_rejects_invalid_log_specs() {
        let err = console_filter("cmviz=loud").unwrap_err();

        assert!(matches!(
            err,
            error::Error::InvalidLogSpec { log_spec, .. } if log_spec == "cmviz=loud"
        ));
    }
}
