use std::path::Path;

use crate::app::Config;
use crate::cli::output;
use crate::error::Result;

/// Validate the configuration file and print a summary.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Config", path.display());

    let config = Config::load(path)?;
    output::success("Configuration file is valid");

    output::section("Ensemble");
    for source in &config.ensemble.sources {
        output::field(source.source.as_str(), format!("{:.2}", source.weight));
    }
    output::field("Tolerance", config.ensemble.probability_tolerance);

    output::section("Edge");
    output::field("Min EV", format!("{}%", config.edge.min_ev));
    output::field("Min probability", config.edge.min_probability);
    output::field(
        "Odds range",
        format!("[{}, +{}]", config.edge.min_odds, config.edge.max_odds),
    );
    output::field("Require agreement", config.edge.require_agreement);

    output::section("Gate");
    output::field("Min EV", format!("{}%", config.gate.min_ev));
    output::field("Margin floor", config.gate.margin_floor);
    output::field(
        "Skepticism",
        format!(
            "EV >= {}% needs margin >= {}",
            config.gate.skeptic_ev, config.gate.skeptic_margin
        ),
    );
    output::field(
        "ATS upgrade",
        format!("margin >= {} at {}", config.gate.ats_margin, config.gate.ats_odds),
    );

    output::section("Files");
    output::field("Weights", config.weights_path.display());
    output::field("Store", config.store.path.display());
    output::field(
        "Retry",
        format!(
            "{} attempts, {}ms initial",
            config.store.retry_attempts, config.store.retry_initial_delay_ms
        ),
    );

    if !config.weights_path.exists() {
        println!();
        output::warning("Weights snapshot not found; built-in weights will be used");
        output::note(&format!(
            "Run {} to build one",
            output::highlight("courtedge aggregate --wagers <corpus.json>")
        ));
    }
    Ok(())
}
