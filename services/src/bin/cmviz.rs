use clap::{Parser, Subcommand};
use cmviz_services::cli::{
    RenderConfusionMatrix, VegaLiteGenerate, output_vega_lite_json, render_confusion_matrix,
};
use cmviz_services::config::{Logging, get_config_element};
use cmviz_services::error::Result;
use cmviz_services::logging::init_logging;

/// Renders binary classification results as confusion matrix heatmaps
#[derive(Debug, Parser)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(flatten)]
    render: RenderConfusionMatrix,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Renders the confusion matrix into an image file
    Render(RenderConfusionMatrix),

    /// Outputs the confusion matrix as Vega-Lite JSON
    #[command(name = "vega")]
    VegaLite(VegaLiteGenerate),
}

impl Commands {
    fn execute(self) -> Result<()> {
        match self {
            Commands::Render(params) => render_confusion_matrix(params).map(|_| ()),
            Commands::VegaLite(params) => output_vega_lite_json(params),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let logging_config: Logging = get_config_element()?;
    init_logging(&logging_config)?;

    // without a subcommand, the top level arguments describe the rendering
    cli.command
        .unwrap_or(Commands::Render(cli.render))
        .execute()
}

#[allow(clippy::print_stderr)]
fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
