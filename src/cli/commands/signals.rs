//! Signals command implementation.

use anyhow::Result;
use quant_signals::GeneratorRegistry;

pub fn run() -> Result<()> {
    let registry = GeneratorRegistry::new();

    println!("Available signal generators:\n");

    let mut infos = registry.list();
    infos.sort_by(|a, b| a.name.cmp(&b.name));

    for info in infos {
        println!("  {}", info.name);
        println!("    {}", info.description);
        println!(
            "    default config: {}",
            serde_json::to_string(&info.default_config)?
        );
        println!();
    }

    Ok(())
}
