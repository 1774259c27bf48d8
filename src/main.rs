//! placepage - replays place-page panel scenarios
//!
//! Loads a YAML scenario, runs it against in-memory ports and prints every
//! state transition and port call.

use anyhow::{Context, Result};
use clap::Parser;

use placepage::cli::CliArgs;
use placepage::persistence::PersistenceAdapter;
use placepage::scenario::{Scenario, ScenarioRunner};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    placepage::tracing::init(args.verbose);

    let run = args.into_config().map_err(anyhow::Error::msg)?;
    let scenario = Scenario::load(&run.scenario).map_err(anyhow::Error::msg)?;

    let mut runner = ScenarioRunner::new(&scenario, run.panel);

    if let Some(path) = &run.state_file {
        let saved = PersistenceAdapter::load_from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("restoring panel state from {}", path.display()))?;
        runner.restore(saved.as_ref());
    }

    runner.run(&scenario.steps);
    let (saved, transcript) = runner.finish();

    for line in &transcript {
        println!("{}", line);
    }

    if let Some(path) = &run.state_file {
        PersistenceAdapter::save_to_file(saved.as_ref(), path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("saving panel state to {}", path.display()))?;
    }

    Ok(())
}
