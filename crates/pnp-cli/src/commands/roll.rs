use colored::Colorize;

use pnp_core::{Command, Outcome, Reply};

pub fn run(ctx: &super::Context, args: Vec<String>) -> Result<(), String> {
    let outcome = match super::execute(ctx, Command::Roll { tokens: args })? {
        Reply::Roll(outcome) => outcome,
        other => return Err(format!("unexpected reply: {other:?}")),
    };

    let label = outcome.outcome.to_string();
    let label = match outcome.outcome {
        Outcome::CriticalSuccess => label.green().bold(),
        Outcome::Success => label.green(),
        Outcome::Failure => label.yellow(),
        Outcome::CriticalFailure => label.red().bold(),
    };
    let dice: Vec<String> = outcome
        .rolls
        .iter()
        .map(|r| {
            if r.success {
                r.value.to_string().green().to_string()
            } else {
                r.value.to_string().red().to_string()
            }
        })
        .collect();

    println!("  {label}");
    println!("  {}: [{}]", outcome.dice, dice.join(", "));
    let plural = if outcome.successes == 1 { "" } else { "es" };
    print!("  {} success{plural}", outcome.successes);
    if let Some(talent) = outcome.remaining_talent {
        print!(", {talent} talent left");
    }
    println!();

    Ok(())
}
