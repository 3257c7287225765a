use pnp_core::Command;

pub fn spend(ctx: &super::Context, amount: i64, attribute: &str) -> Result<(), String> {
    let command = Command::Spend {
        amount,
        attribute: attribute.to_string(),
    };
    super::print_attribute(super::execute(ctx, command)?)
}

pub fn gain(ctx: &super::Context, amount: i64, attribute: &str) -> Result<(), String> {
    let command = Command::Gain {
        amount,
        attribute: attribute.to_string(),
    };
    super::print_attribute(super::execute(ctx, command)?)
}
