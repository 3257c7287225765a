use colored::Colorize;

use pnp_core::{Command, Reply, UserId};

pub fn run(ctx: &super::Context, player: &str) -> Result<(), String> {
    let command = Command::Delete {
        player: UserId::from(player),
    };

    match super::execute(ctx, command)? {
        Reply::Deleted { player, character } => {
            println!("  Deleted {} ({})", character.bold(), player.to_string().dimmed());
            Ok(())
        }
        other => Err(format!("unexpected reply: {other:?}")),
    }
}
