use colored::Colorize;

use pnp_core::rules::preset;

pub fn run() -> Result<(), String> {
    for name in preset::available() {
        let system = preset::by_name(name).map_err(|e| e.to_string())?;
        let attributes: Vec<&str> = system
            .attributes()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        println!("  {} ({})", name.bold(), system.name());
        println!("    attributes: {}", attributes.join(", "));
        println!("    {}", system.roll_help().dimmed());
    }
    Ok(())
}
