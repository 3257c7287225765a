//! Game-master session: the command boundary for a dispatcher.
//!
//! A [`GameMaster`] owns the loaded rule system, the character store and
//! the RNG. The dispatcher hands it one [`Command`] at a time together
//! with the requesting player and renders the [`Reply`] or the error.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::GmConfig;
use crate::error::{PnpError, PnpResult};
use crate::resolution::RollOutcome;
use crate::rules::{LoadedSystem, preset};
use crate::sheet::{Attribute, Character};
use crate::store::{CharacterStore, Persistence, UserId};

/// A parsed game-master command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a character for a player.
    Add {
        /// Owning player.
        player: UserId,
        /// Character name.
        character: String,
        /// Raw `name=value` attribute tokens.
        attributes: Vec<String>,
    },
    /// Delete a player's character.
    Delete {
        /// Owning player.
        player: UserId,
    },
    /// Overwrite one attribute of a player's character.
    Set {
        /// Owning player.
        player: UserId,
        /// Raw `name=value` token.
        token: String,
    },
    /// Show a character. Defaults to the requester's.
    Stats {
        /// Owning player, if not the requester.
        player: Option<UserId>,
    },
    /// Spend points of one of the requester's attributes.
    Spend {
        /// Points to spend.
        amount: i64,
        /// Attribute name.
        attribute: String,
    },
    /// Regain points of one of the requester's attributes.
    Gain {
        /// Points to gain.
        amount: i64,
        /// Attribute name.
        attribute: String,
    },
    /// Roll dice under the active rule system.
    Roll {
        /// Raw roll tokens.
        tokens: Vec<String>,
    },
}

impl Command {
    /// Parse a chat line already split into tokens.
    ///
    /// The verb may carry a leading `!` and is matched ignoring case.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> PnpResult<Self> {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        let Some((verb, rest)) = tokens.split_first() else {
            return Err(PnpError::InvalidCommand(
                "add | delete | set | stats | spend | gain | roll".to_string(),
            ));
        };
        let verb = verb.strip_prefix('!').unwrap_or(*verb).to_lowercase();
        let owned = |s: &[&str]| s.iter().map(|t| t.to_string()).collect::<Vec<_>>();

        match (verb.as_str(), rest) {
            ("add", [player, character, attributes @ ..]) => Ok(Self::Add {
                player: UserId::from(*player),
                character: character.to_string(),
                attributes: owned(attributes),
            }),
            ("add", _) => Err(usage("add PLAYER NAME ATTR=VALUE...")),
            ("delete", [player]) => Ok(Self::Delete {
                player: UserId::from(*player),
            }),
            ("delete", _) => Err(usage("delete PLAYER")),
            ("set", [player, token]) => Ok(Self::Set {
                player: UserId::from(*player),
                token: token.to_string(),
            }),
            ("set", _) => Err(usage("set PLAYER NAME=VALUE")),
            ("stats", []) => Ok(Self::Stats { player: None }),
            ("stats", [player]) => Ok(Self::Stats {
                player: Some(UserId::from(*player)),
            }),
            ("stats", _) => Err(usage("stats [PLAYER]")),
            ("spend", [amount, attribute]) => Ok(Self::Spend {
                amount: parse_amount(amount, "spend AMOUNT ATTR")?,
                attribute: attribute.to_string(),
            }),
            ("spend", _) => Err(usage("spend AMOUNT ATTR")),
            ("gain", [amount, attribute]) => Ok(Self::Gain {
                amount: parse_amount(amount, "gain AMOUNT ATTR")?,
                attribute: attribute.to_string(),
            }),
            ("gain", _) => Err(usage("gain AMOUNT ATTR")),
            ("roll", args) => Ok(Self::Roll {
                tokens: owned(args),
            }),
            (other, _) => Err(PnpError::InvalidCommand(format!("unknown command '{other}'"))),
        }
    }
}

fn usage(text: &str) -> PnpError {
    PnpError::InvalidCommand(text.to_string())
}

fn parse_amount(token: &str, text: &str) -> PnpResult<i64> {
    token.parse().map_err(|_| usage(text))
}

/// The result of a successfully executed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A character snapshot (after `add` or for `stats`).
    Character(Character),
    /// One attribute after a change.
    Attribute {
        /// Name of the owning character.
        character: String,
        /// The attribute's new state.
        attribute: Attribute,
    },
    /// A deleted character.
    Deleted {
        /// Former owner.
        player: UserId,
        /// Name of the removed character.
        character: String,
    },
    /// A resolved roll.
    Roll(RollOutcome),
}

/// A running game-master session.
#[derive(Debug)]
pub struct GameMaster<P: Persistence> {
    system: LoadedSystem,
    store: CharacterStore<P>,
    rng: StdRng,
}

impl<P: Persistence> GameMaster<P> {
    /// Load the configured rule system and open the store.
    ///
    /// Any error here is a startup error; the session cannot run.
    pub fn new(config: &GmConfig, port: P) -> PnpResult<Self> {
        let system = preset::load(&config.system)?;
        let store = CharacterStore::open(port)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self { system, store, rng })
    }

    /// The loaded rule system.
    pub fn system(&self) -> &LoadedSystem {
        &self.system
    }

    /// The character store.
    pub fn store(&self) -> &CharacterStore<P> {
        &self.store
    }

    /// Execute one command on behalf of `requester`.
    pub fn execute(&mut self, requester: &UserId, command: Command) -> PnpResult<Reply> {
        debug!(%requester, ?command, "executing command");
        match command {
            Command::Add {
                player,
                character,
                attributes,
            } => self.add(player, character, &attributes),
            Command::Delete { player } => {
                let removed = self.store.remove(&player)?;
                Ok(Reply::Deleted {
                    player,
                    character: removed.name().to_string(),
                })
            }
            Command::Set { player, token } => self.set(&player, &token),
            Command::Stats { player } => {
                let player = player.as_ref().unwrap_or(requester);
                Ok(Reply::Character(self.store.get(player)?.clone()))
            }
            Command::Spend { amount, attribute } => {
                check_amount(amount)?;
                self.change(requester, &attribute, |attr| attr.spend(amount).map(drop))
            }
            Command::Gain { amount, attribute } => {
                check_amount(amount)?;
                self.change(requester, &attribute, |attr| match attr.gain(amount) {
                    Err(PnpError::Overflow { maximum, .. }) => attr.update(maximum),
                    other => other.map(drop),
                })
            }
            Command::Roll { tokens } => {
                let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
                let character = self.store.get(requester).ok();
                let outcome = self
                    .system
                    .roll(requester, character, &tokens, &mut self.rng)?;
                Ok(Reply::Roll(outcome))
            }
        }
    }

    fn add(&mut self, player: UserId, name: String, tokens: &[String]) -> PnpResult<Reply> {
        if let Ok(existing) = self.store.get(&player) {
            return Err(PnpError::CharacterExists {
                player: player.to_string(),
                character: existing.name().to_string(),
            });
        }
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let attributes = self.system.system().parse_attributes(&tokens)?;
        let character = Character::new(name, attributes)?;
        let stored = self.store.insert(player, character)?;
        Ok(Reply::Character(stored.clone()))
    }

    fn set(&mut self, player: &UserId, token: &str) -> PnpResult<Reply> {
        let source: Attribute = token.parse()?;
        if source.is_anonymous() {
            return Err(PnpError::AnonymousAttribute);
        }
        self.store.modify(player, |character| {
            let attribute = character.attribute_mut(source.name())?;
            attribute.update(source.clone())?;
            let attribute = attribute.clone();
            Ok(Reply::Attribute {
                character: character.name().to_string(),
                attribute,
            })
        })
    }

    fn change(
        &mut self,
        player: &UserId,
        name: &str,
        f: impl FnOnce(&mut Attribute) -> PnpResult<()>,
    ) -> PnpResult<Reply> {
        self.store.modify(player, |character| {
            let attribute = character.attribute_mut(name)?;
            f(attribute)?;
            let attribute = attribute.clone();
            Ok(Reply::Attribute {
                character: character.name().to_string(),
                attribute,
            })
        })
    }
}

fn check_amount(amount: i64) -> PnpResult<()> {
    if amount < 0 {
        return Err(PnpError::InvalidAmount(amount));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const DSA_KAEL: &str = "add alice Kael MU=12 KL=11 IN=13 CH=10 FF=9 GE=14 KO=12 KK=11 \
                            LeP=30/30 Aus=25/25 AsP=0 KaP=0";
    const HEX_VARA: &str = "!ADD bob Vara Vita=8/10 AP=3/5 Körper=4 Geist=3 Sozial=2";

    fn gm(system: &str) -> GameMaster<MemoryStore> {
        let config = GmConfig::default().with_system(system).with_seed(42);
        GameMaster::new(&config, MemoryStore::new()).unwrap()
    }

    fn run(gm: &mut GameMaster<MemoryStore>, requester: &str, line: &str) -> PnpResult<Reply> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        gm.execute(&UserId::from(requester), Command::parse(&tokens)?)
    }

    fn attribute(reply: Reply) -> Attribute {
        match reply {
            Reply::Attribute { attribute, .. } => attribute,
            other => panic!("expected attribute reply, got {other:?}"),
        }
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            Command::parse(&["!Stats"]).unwrap(),
            Command::Stats { player: None }
        );
        assert_eq!(
            Command::parse(&["spend", "3", "Vita"]).unwrap(),
            Command::Spend {
                amount: 3,
                attribute: "Vita".to_string()
            }
        );
        assert_eq!(
            Command::parse(&["roll", "3d20", "10"]).unwrap(),
            Command::Roll {
                tokens: vec!["3d20".to_string(), "10".to_string()]
            }
        );
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        let empty: [&str; 0] = [];
        assert!(matches!(Command::parse(&empty), Err(PnpError::InvalidCommand(_))));
        assert!(matches!(
            Command::parse(&["delete"]),
            Err(PnpError::InvalidCommand(u)) if u == "delete PLAYER"
        ));
        assert!(matches!(
            Command::parse(&["spend", "lots", "Vita"]),
            Err(PnpError::InvalidCommand(_))
        ));
        assert!(matches!(
            Command::parse(&["dance"]),
            Err(PnpError::InvalidCommand(u)) if u.contains("dance")
        ));
    }

    #[test]
    fn unknown_system_is_startup_error() {
        let config = GmConfig::default().with_system("fate");
        let err = GameMaster::new(&config, MemoryStore::new()).unwrap_err();
        assert!(err.is_startup_error());
    }

    #[test]
    fn add_and_stats() {
        let mut gm = gm("dsa");
        let reply = run(&mut gm, "gm", DSA_KAEL).unwrap();
        let Reply::Character(kael) = reply else {
            panic!("expected character");
        };
        assert_eq!(kael.name(), "Kael");
        assert_eq!(kael.len(), 12);
        assert_eq!(gm.store().port().saves(), 1);

        let Reply::Character(shown) = run(&mut gm, "alice", "stats").unwrap() else {
            panic!("expected character");
        };
        assert_eq!(shown, kael);
        assert!(run(&mut gm, "gm", "stats alice").is_ok());
        assert!(matches!(
            run(&mut gm, "gm", "stats"),
            Err(PnpError::CharacterNotFound(p)) if p == "gm"
        ));
    }

    #[test]
    fn add_twice_fails() {
        let mut gm = gm("dsa");
        run(&mut gm, "gm", DSA_KAEL).unwrap();
        assert!(matches!(
            run(&mut gm, "gm", DSA_KAEL),
            Err(PnpError::CharacterExists { .. })
        ));
        assert_eq!(gm.store().port().saves(), 1);
    }

    #[test]
    fn add_with_missing_attributes_fails_without_saving() {
        let mut gm = gm("dsa");
        let err = run(&mut gm, "gm", "add alice Kael MU=12").unwrap_err();
        assert!(matches!(err, PnpError::MissingAttributes(ref m) if m.len() == 11));
        assert!(gm.store().is_empty());
        assert_eq!(gm.store().port().saves(), 0);
    }

    #[test]
    fn set_enforces_bounds() {
        let mut gm = gm("dsa");
        run(&mut gm, "gm", DSA_KAEL).unwrap();

        let lep = attribute(run(&mut gm, "gm", "set alice lep=12").unwrap());
        assert_eq!(lep.name(), "LeP");
        assert_eq!(lep.value(), 12);

        assert!(matches!(
            run(&mut gm, "gm", "set alice LeP=31"),
            Err(PnpError::Overflow { .. })
        ));
        let widened = attribute(run(&mut gm, "gm", "set alice LeP=35/40").unwrap());
        assert_eq!((widened.value(), widened.maximum()), (35, 40));

        assert!(matches!(
            run(&mut gm, "gm", "set alice 12"),
            Err(PnpError::AnonymousAttribute)
        ));
        assert!(matches!(
            run(&mut gm, "gm", "set alice Charme=3"),
            Err(PnpError::AttributeNotFound { .. })
        ));
        assert_eq!(gm.store().port().saves(), 3);
    }

    #[test]
    fn dsa_attributes_are_not_spendable() {
        let mut gm = gm("dsa");
        run(&mut gm, "gm", DSA_KAEL).unwrap();
        assert!(matches!(
            run(&mut gm, "alice", "spend 3 LeP"),
            Err(PnpError::NotSpendable(name)) if name == "LeP"
        ));
    }

    #[test]
    fn spend_and_gain() {
        let mut gm = gm("hexdec");
        run(&mut gm, "gm", HEX_VARA).unwrap();

        let vita = attribute(run(&mut gm, "bob", "spend 3 vita").unwrap());
        assert_eq!(vita.value(), 5);

        assert!(matches!(
            run(&mut gm, "bob", "spend 9 Vita"),
            Err(PnpError::Underflow { .. })
        ));

        let vita = attribute(run(&mut gm, "bob", "gain 2 Vita").unwrap());
        assert_eq!(vita.value(), 7);

        // overflow clamps to the maximum
        let vita = attribute(run(&mut gm, "bob", "gain 50 Vita").unwrap());
        assert_eq!(vita.value(), 10);

        let geist = attribute(run(&mut gm, "bob", "gain 4 Geist").unwrap());
        assert_eq!(geist.value(), 7);

        assert!(matches!(
            run(&mut gm, "bob", "spend -1 Vita"),
            Err(PnpError::InvalidAmount(-1))
        ));
        assert!(matches!(
            run(&mut gm, "carol", "spend 1 Vita"),
            Err(PnpError::CharacterNotFound(_))
        ));
        assert_eq!(gm.store().port().saves(), 5);
    }

    #[test]
    fn delete() {
        let mut gm = gm("hexdec");
        run(&mut gm, "gm", HEX_VARA).unwrap();
        assert_eq!(
            run(&mut gm, "gm", "delete bob").unwrap(),
            Reply::Deleted {
                player: UserId::from("bob"),
                character: "Vara".to_string()
            }
        );
        assert!(matches!(
            run(&mut gm, "gm", "delete bob"),
            Err(PnpError::CharacterNotFound(_))
        ));
        assert_eq!(gm.store().port().saves(), 2);
    }

    #[test]
    fn roll_does_not_save() {
        let mut gm = gm("hexdec");
        run(&mut gm, "gm", HEX_VARA).unwrap();
        let Reply::Roll(outcome) = run(&mut gm, "bob", "roll 4d6 3").unwrap() else {
            panic!("expected roll");
        };
        assert_eq!(outcome.rolls.len(), 4);
        // players without a character may roll too
        assert!(run(&mut gm, "carol", "roll 1d20 10").is_ok());
        assert_eq!(gm.store().port().saves(), 1);
    }

    #[test]
    fn roll_errors() {
        let mut gm = gm("dsa");
        for line in ["roll", "roll 2d20 1 2 3 4", "roll 3d20 a 2 3 4", "roll d20 1 2 3 4"] {
            let err = run(&mut gm, "alice", line).unwrap_err();
            assert!(err.is_roll_error(), "{line}: {err}");
        }
    }

    #[test]
    fn seeded_sessions_roll_identically() {
        let mut a = gm("dsa");
        let mut b = gm("dsa");
        let line = "roll 3d20 12 12 12 4";
        assert_eq!(
            run(&mut a, "alice", line).unwrap(),
            run(&mut b, "alice", line).unwrap()
        );
    }
}
