//! List rules command implementation.

use puso::rules::{all_rules, Preset};
use puso::Config;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<22} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    let config = Config::default();
    for preset in Preset::ALL {
        let codes: Vec<&str> = preset.rules(&config).iter().map(|r| r.code()).collect();
        let marker = if preset == Preset::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {:<10} - {}{}", preset.name(), codes.join(", "), marker);
    }

    println!("\nUse --allow or --deny to filter rules, e.g.:");
    println!("  puso check --deny require-terminator");
    println!("  puso check --preset one-line --allow PS001,PS003");
}
