pub mod add;
pub mod delete;
pub mod points;
pub mod roll;
pub mod set;
pub mod stats;
pub mod systems;

use colored::Colorize;

use pnp_core::{Attribute, Command, GameMaster, GmConfig, JsonFileStore, Reply, UserId};

/// Settings shared by every subcommand.
pub struct Context {
    pub config: GmConfig,
    pub requester: UserId,
}

/// Start a session against the configured store file.
fn open(ctx: &Context) -> Result<GameMaster<JsonFileStore>, String> {
    let store = JsonFileStore::new(&ctx.config.store_path);
    GameMaster::new(&ctx.config, store).map_err(|e| format!("failed to start session: {e}"))
}

/// Run one command. Roll errors carry the rule system's usage line.
fn execute(ctx: &Context, command: Command) -> Result<Reply, String> {
    let mut gm = open(ctx)?;
    gm.execute(&ctx.requester, command).map_err(|e| {
        if e.is_roll_error() {
            format!("{e}\n{}", gm.system().system().roll_help())
        } else {
            e.to_string()
        }
    })
}

/// Print an attribute after a change.
fn print_attribute(reply: Reply) -> Result<(), String> {
    match reply {
        Reply::Attribute {
            character,
            attribute,
        } => {
            println!(
                "  {}: {} = {}",
                character,
                attribute.name().bold(),
                format_value(&attribute)
            );
            Ok(())
        }
        other => Err(format!("unexpected reply: {other:?}")),
    }
}

/// `value`, `value/max`, or `min/value/max` when the minimum is not zero.
fn format_value(attribute: &Attribute) -> String {
    if attribute.is_limited() && attribute.minimum() != 0 {
        format!(
            "{}/{}/{}",
            attribute.minimum(),
            attribute.value(),
            attribute.maximum()
        )
    } else {
        attribute.to_string()
    }
}
