#![allow(clippy::print_stdout)] // okay in CLI

use super::MatrixArgs;
use crate::config::{ConfusionMatrix, get_config_element};
use crate::error::{self, Result};
use clap::Parser;
use cmviz_datatypes::plots::{ConfusionMatrixHeatmap, Plot};
use snafu::ResultExt;

/// Outputs the confusion matrix as a Vega-Lite specification
#[derive(Debug, Default, Parser)]
pub struct VegaLiteGenerate {
    #[command(flatten)]
    pub matrix: MatrixArgs,
}

/// Outputs the Vega-Lite JSON to `STDOUT`
pub fn output_vega_lite_json(params: VegaLiteGenerate) -> Result<()> {
    println!("{}", vega_lite_json(&params)?);

    Ok(())
}

fn vega_lite_json(params: &VegaLiteGenerate) -> Result<String> {
    let matrix_config: ConfusionMatrix = get_config_element()?;

    let heatmap = ConfusionMatrixHeatmap::new(
        params.matrix.counts(&matrix_config).into(),
        matrix_config.labels.clone(),
        params.matrix.title(&matrix_config),
    );

    let plot_data = heatmap.to_vega_embeddable()?;
    let spec: serde_json::Value =
        serde_json::from_str(&plot_data.vega_string).context(error::SerdeJson)?;

    serde_json::to_string_pretty(&spec).context(error::SerdeJson)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn it_generates_json() {
        let json = vega_lite_json(&VegaLiteGenerate {
            matrix: MatrixArgs {
                true_positives: Some(7),
                title: Some("Evaluation".to_string()),
                ..Default::default()
            },
        })
        .unwrap();

        let spec: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(spec["title"], "Evaluation");
        assert_eq!(spec["encoding"]["x"]["axis"]["title"], "Prediction");
        assert_eq!(spec["encoding"]["y"]["axis"]["title"], "Actual");

        let values = spec["data"]["values"].as_array().unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values[3]["count"], 7);
        assert_eq!(values[3]["predicted"], "Predicted Positive");
        assert_eq!(values[3]["actual"], "Actual Positive");
    }
}
