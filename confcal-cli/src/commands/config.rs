use std::path::Path;

use anyhow::Result;
use confcal_core::GeneratorConfig;
use owo_colors::OwoColorize;

pub fn run(config_path: &Path, config: &GeneratorConfig) -> Result<()> {
    let status = if config_path.exists() {
        "".to_string()
    } else {
        " (not found, using defaults)".dimmed().to_string()
    };

    println!("{}", "Paths".bold());
    println!("  Config:     {}{}", config_path.display(), status);
    println!("  Output:     {}", config.output_path().display());
    println!();
    println!("{}", "Generator".bold());
    println!("  UID domain: {}", config.uid_domain);
    println!("  Product ID: {}", config.product_id);
    println!("  Time zone:  {}", config.timezone);

    Ok(())
}
