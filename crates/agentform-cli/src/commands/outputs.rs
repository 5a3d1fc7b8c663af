use std::path::Path;

use crate::commands::synth;

pub fn run(
    config_path: Option<&Path>,
    enable_planner: bool,
    model_id: Option<String>,
) -> anyhow::Result<()> {
    // Outputs read resolved identities only; staging the bundle would add
    // nothing but a digest, so it is skipped.
    let manifest = synth::resolve(config_path, enable_planner, model_id, true)?;

    for (key, value) in &manifest.outputs {
        println!("{key} = {value}");
    }

    Ok(())
}
