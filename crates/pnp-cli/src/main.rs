//! CLI frontend for the PnP game-master engine.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::Context;
use pnp_core::{GmConfig, UserId};

#[derive(Parser)]
#[command(
    name = "pnp",
    about = "Game master for pen-and-paper sessions: character sheets and dice",
    version,
    propagate_version = true
)]
struct Cli {
    /// Rule system to play (see `pnp systems`)
    #[arg(long, global = true)]
    system: Option<String>,

    /// Character store file
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Player issuing the command
    #[arg(long = "as", global = true, value_name = "PLAYER", default_value = "gm")]
    requester: String,

    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a character for a player
    Add {
        /// Owning player
        player: String,

        /// Character name
        name: String,

        /// Attributes as NAME=VALUE, NAME=VALUE/MAX or NAME=MIN/VALUE/MAX
        #[arg(required = true)]
        attributes: Vec<String>,
    },

    /// Delete a player's character
    Delete {
        /// Owning player
        player: String,
    },

    /// Overwrite one attribute of a player's character
    Set {
        /// Owning player
        player: String,

        /// NAME=VALUE, NAME=VALUE/MAX or NAME=MIN/VALUE/MAX
        attribute: String,
    },

    /// Show a character sheet (default: your own)
    Stats {
        /// Owning player
        player: Option<String>,
    },

    /// Spend points of one of your attributes
    Spend {
        /// Points to spend
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Attribute name
        attribute: String,
    },

    /// Regain points of one of your attributes
    Gain {
        /// Points to gain
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Attribute name
        attribute: String,
    },

    /// Roll dice under the active rule system
    Roll {
        /// Roll arguments, e.g. `3d20 10 11 12 5`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List the available rule systems
    Systems,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = GmConfig::default();
    if let Some(system) = cli.system {
        config = config.with_system(system);
    }
    if let Some(store) = cli.store {
        config = config.with_store_path(store);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let ctx = Context {
        config,
        requester: UserId::from(cli.requester),
    };

    let result = match cli.command {
        Commands::Add {
            player,
            name,
            attributes,
        } => commands::add::run(&ctx, &player, &name, attributes),
        Commands::Delete { player } => commands::delete::run(&ctx, &player),
        Commands::Set { player, attribute } => commands::set::run(&ctx, &player, &attribute),
        Commands::Stats { player } => commands::stats::run(&ctx, player.as_deref()),
        Commands::Spend { amount, attribute } => commands::points::spend(&ctx, amount, &attribute),
        Commands::Gain { amount, attribute } => commands::points::gain(&ctx, amount, &attribute),
        Commands::Roll { args } => commands::roll::run(&ctx, args),
        Commands::Systems => commands::systems::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
