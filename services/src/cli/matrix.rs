use crate::config::ConfusionMatrix;
use clap::Args;
use cmviz_datatypes::primitives::ConfusionCounts;

/// Overrides of the configured confusion matrix
#[derive(Debug, Default, Args)]
pub struct MatrixArgs {
    /// Number of negatives that were predicted as negatives
    #[arg(long, value_name = "COUNT")]
    pub true_negatives: Option<u64>,

    /// Number of negatives that were predicted as positives
    #[arg(long, value_name = "COUNT")]
    pub false_positives: Option<u64>,

    /// Number of positives that were predicted as negatives
    #[arg(long, value_name = "COUNT")]
    pub false_negatives: Option<u64>,

    /// Number of positives that were predicted as positives
    #[arg(long, value_name = "COUNT")]
    pub true_positives: Option<u64>,

    /// Title above the matrix
    #[arg(long)]
    pub title: Option<String>,
}

impl MatrixArgs {
    /// Fills every count that was not given on the command line from `config`
    pub fn counts(&self, config: &ConfusionMatrix) -> ConfusionCounts {
        ConfusionCounts::new(
            self.true_negatives.unwrap_or(config.true_negatives),
            self.false_positives.unwrap_or(config.false_positives),
            self.false_negatives.unwrap_or(config.false_negatives),
            self.true_positives.unwrap_or(config.true_positives),
        )
    }

    pub fn title(&self, config: &ConfusionMatrix) -> String {
        self.title.clone().unwrap_or_else(|| config.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::get_config_element;
    use serial_test::serial;

    #[test]
    #[serial]
    fn it_keeps_configured_values() {
        let config: ConfusionMatrix = get_config_element().unwrap();

        let args = MatrixArgs::default();

        assert_eq!(args.counts(&config), config.counts());
        assert_eq!(args.title(&config), config.title);
    }

    #[test]
    #[serial]
    fn it_overrides_single_counts() {
        let config: ConfusionMatrix = get_config_element().unwrap();

        let args = MatrixArgs {
            false_negatives: Some(0),
            title: Some("Evaluation".to_string()),
            ..Default::default()
        };

        assert_eq!(
            args.counts(&config),
            ConfusionCounts::new(
                config.true_negatives,
                config.false_positives,
                0,
                config.true_positives
            )
        );
        assert_eq!(args.title(&config), "Evaluation");
    }
}
