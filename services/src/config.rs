use crate::error::{self, Result};
use cmviz_datatypes::MatrixRenderer;
use cmviz_datatypes::primitives::{ClassLabels, ConfusionCounts};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use snafu::ResultExt;
use std::path::PathBuf;
use std::sync::{LazyLock, RwLock};

/// The defaults are compiled into the binary so that it runs without any settings file
const DEFAULT_SETTINGS: &str = include_str!("../../Settings-default.toml");

static SETTINGS: LazyLock<RwLock<Config>> = LazyLock::new(init_settings);

fn init_settings() -> RwLock<Config> {
    let mut settings =
        Config::builder().add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml));

    #[cfg(not(test))]
    {
        settings = settings.add_source(File::from(PathBuf::from("Settings.toml")).required(false));
    }

    // Override config with environment variables that start with `CMVIZ__`,
    // e.g. `CMVIZ__LOGGING__LOG_SPEC=debug`
    // Note: Since variables contain underscores, we need to use something different
    // for separating groups, for instance double underscores `__`
    settings = settings.add_source(Environment::with_prefix("cmviz").separator("__"));

    RwLock::new(
        settings
            .build()
            .expect("it should crash the program if this fails"),
    )
}

#[cfg(test)]
pub fn set_config<T>(key: &str, value: T) -> Result<()>
where
    T: Into<config::Value>,
{
    let mut settings = SETTINGS
        .write()
        .map_err(|_error| error::Error::ConfigLockFailed)?;

    let builder = Config::builder()
        .add_source(settings.clone())
        .set_override(key, value)
        .context(error::Config)?;

    *settings = builder.build().context(error::Config)?;
    Ok(())
}

pub fn get_config<'a, T>(key: &str) -> Result<T>
where
    T: Deserialize<'a>,
{
    SETTINGS
        .read()
        .map_err(|_error| error::Error::ConfigLockFailed)?
        .get::<T>(key)
        .context(error::Config)
}

pub fn get_config_element<'a, T>() -> Result<T>
where
    T: ConfigElement + Deserialize<'a>,
{
    get_config(T::KEY)
}

pub trait ConfigElement {
    const KEY: &'static str;
}

#[derive(Debug, Deserialize)]
pub struct Logging {
    pub log_spec: String,
}

impl ConfigElement for Logging {
    const KEY: &'static str = "logging";
}

#[derive(Debug, Deserialize)]
pub struct Plot {
    pub width_px: u32,
    pub height_px: u32,
}

impl Plot {
    pub fn renderer(&self) -> MatrixRenderer {
        MatrixRenderer::new(self.width_px, self.height_px)
    }
}

impl ConfigElement for Plot {
    const KEY: &'static str = "plot";
}

/// The matrix to render when nothing is given on the command line
#[derive(Debug, Deserialize)]
pub struct ConfusionMatrix {
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub true_positives: u64,
    pub title: String,
    pub output_file: PathBuf,
    #[serde(default)]
    pub labels: ClassLabels,
}

impl ConfusionMatrix {
    pub fn counts(&self) -> ConfusionCounts {
        ConfusionCounts::new(
            self.true_negatives,
            self.false_positives,
            self.false_negatives,
            self.true_positives,
        )
    }
}

impl ConfigElement for ConfusionMatrix {
    const KEY: &'static str = "confusion_matrix";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_are_the_evaluation_results() {
        let matrix: ConfusionMatrix = get_config_element().unwrap();

        assert_eq!(matrix.counts(), ConfusionCounts::new(286_285, 1, 3, 181));
        assert_eq!(
            matrix.title,
            "PERFORMANCES SET_1 USING E-VALUE THRESHOLD OF SET_2 - FULL SEQUENCES"
        );
        assert_eq!(
            matrix.output_file,
            PathBuf::from("full sequence, trained SET2, test SET1.png")
        );
        assert_eq!(matrix.labels, ClassLabels::default());
    }

    #[test]
    #[serial]
    fn default_plot_size() {
        let plot: Plot = get_config_element().unwrap();

        assert_eq!(plot.renderer(), MatrixRenderer::default());
    }

    #[test]
    #[serial]
    fn it_overrides_values() {
        let previous: u64 = get_config("confusion_matrix.false_positives").unwrap();

        set_config("confusion_matrix.false_positives", 42).unwrap();
        let matrix: ConfusionMatrix = get_config_element().unwrap();
        assert_eq!(matrix.false_positives, 42);

        set_config("confusion_matrix.false_positives", previous as i64).unwrap();
    }

    #[test]
    #[serial]
    fn it_reports_invalid_types() {
        assert!(matches!(
            get_config::<u64>("confusion_matrix.title"),
            Err(error::Error::Config { .. })
        ));
    }
}
