use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("Unable to render the confusion matrix: {}", source))]
    Render {
        source: cmviz_datatypes::RenderError,
    },

    #[snafu(display("Invalid configuration: {}", source))]
    Config { source: config::ConfigError },

    #[snafu(display("Unable to access the configuration"))]
    ConfigLockFailed,

    #[snafu(display("Invalid log spec `{}`: {}", log_spec, source))]
    InvalidLogSpec {
        log_spec: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[snafu(display("Unable to serialize plot: {}", source))]
    SerdeJson { source: serde_json::Error },
}

impl From<cmviz_datatypes::RenderError> for Error {
    fn from(source: cmviz_datatypes::RenderError) -> Self {
        Self::Render { source }
    }
}
