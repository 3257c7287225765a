use colored::Colorize;

use pnp_core::{Command, Reply, UserId};

pub fn run(
    ctx: &super::Context,
    player: &str,
    name: &str,
    attributes: Vec<String>,
) -> Result<(), String> {
    let command = Command::Add {
        player: UserId::from(player),
        character: name.to_string(),
        attributes,
    };

    match super::execute(ctx, command)? {
        Reply::Character(character) => {
            println!("  Created {} for {}", character.name().bold(), player.cyan());
            println!();
            super::stats::print_sheet(&character);
            Ok(())
        }
        other => Err(format!("unexpected reply: {other:?}")),
    }
}
