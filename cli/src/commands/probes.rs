use std::path::Path;

use anyhow::Context;
use tracing::info;
use wildsift_core::{probes, roots};

/// Prints `samples` random probe names per root, one per line.
pub fn probes(domains: &Path, samples: usize, output: Option<&Path>) -> anyhow::Result<()> {
    let roots = roots::read_roots(domains)?;
    let hosts: Vec<String> = probes::probe_hosts(&roots, samples, &mut rand::rng());
    let body: String = hosts.iter().map(|host| format!("{host}\n")).collect();

    match output {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("writing probe names to {}", path.display()))?;
            info!("Wrote {} probe names to {}", hosts.len(), path.display());
        }
        None => print!("{body}"),
    }
    Ok(())
}
