use std::path::Path;

use tracing::info;

use agentform_model::{CodeRef, Manifest, evaluate};
use agentform_stack::{StackConfig, blueprint, bundle};

/// Load configuration, apply flag overrides, and evaluate the blueprint.
pub(crate) fn resolve(
    config_path: Option<&Path>,
    enable_planner: bool,
    model_id: Option<String>,
    no_stage: bool,
) -> anyhow::Result<Manifest> {
    let mut config = StackConfig::load_or_default(config_path)?;
    if enable_planner {
        config.flags.enable_planner = true;
    }
    if model_id.is_some() {
        config.flags.model_id = model_id;
    }

    let code = if no_stage {
        CodeRef::unstaged(&config.code.path)
    } else {
        bundle::stage(&config.code)?
    };

    let manifest = evaluate(&blueprint(&config, code), &config.flags)?;
    info!(
        resources = manifest.resources.len(),
        units = manifest.units.len(),
        grants = manifest.grants.len(),
        "synthesized manifest"
    );
    Ok(manifest)
}

pub fn run(
    config_path: Option<&Path>,
    enable_planner: bool,
    model_id: Option<String>,
    out: Option<&Path>,
    no_stage: bool,
) -> anyhow::Result<()> {
    let manifest = resolve(config_path, enable_planner, model_id, no_stage)?;
    let json = serde_json::to_string_pretty(&manifest)?;

    match out {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("✓ Wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
