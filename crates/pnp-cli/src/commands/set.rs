use pnp_core::{Command, UserId};

pub fn run(ctx: &super::Context, player: &str, token: &str) -> Result<(), String> {
    let command = Command::Set {
        player: UserId::from(player),
        token: token.to_string(),
    };
    super::print_attribute(super::execute(ctx, command)?)
}
