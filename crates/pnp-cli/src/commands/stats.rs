use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use pnp_core::{Character, Command, Reply, UserId};

pub fn run(ctx: &super::Context, player: Option<&str>) -> Result<(), String> {
    let command = Command::Stats {
        player: player.map(UserId::from),
    };
    let owner = player.map_or_else(|| ctx.requester.to_string(), str::to_string);

    match super::execute(ctx, command)? {
        Reply::Character(character) => {
            println!("  {} ({})", character.name().bold(), owner.dimmed());
            println!();
            print_sheet(&character);
            Ok(())
        }
        other => Err(format!("unexpected reply: {other:?}")),
    }
}

/// Render every attribute of a character as a table.
pub fn print_sheet(character: &Character) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Attribute", "Value", "Min", "Max", "Spendable"]);

    for attribute in character.attributes() {
        let (min, max) = if attribute.is_limited() {
            (attribute.minimum().to_string(), attribute.maximum().to_string())
        } else {
            ("—".to_string(), "—".to_string())
        };
        let spendable = if attribute.is_spendable() { "yes" } else { "no" };
        table.add_row(vec![
            attribute.name().to_string(),
            attribute.value().to_string(),
            min,
            max,
            spendable.to_string(),
        ]);
    }

    println!("{table}");
}
