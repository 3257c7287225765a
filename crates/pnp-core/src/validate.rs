//! Structural checks of a rule system's configuration.
//!
//! Errors make a system unusable (a template entry that no token could
//! name, or two entries that collide under case-insensitive lookup).
//! Warnings flag a system that loads but is unlikely to be useful.

use crate::rules::RuleSystem;

/// A warning or error found while validating a rule system.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// What the issue is about (the system or one of its attributes).
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a rule system's attribute template and roll help.
pub fn validate_system(system: &dyn RuleSystem) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let subject = format!("system '{}'", system.name());

    if system.attributes().is_empty() {
        issues.push(ValidationIssue {
            subject: subject.clone(),
            message: "no attributes defined".to_string(),
            is_error: false,
        });
    }

    if system.roll_help().trim().is_empty() {
        issues.push(ValidationIssue {
            subject: subject.clone(),
            message: "roll help is empty".to_string(),
            is_error: false,
        });
    }

    let mut seen: Vec<String> = Vec::new();
    for (index, template) in system.attributes().iter().enumerate() {
        let name = template.name.trim();
        if name.is_empty() {
            issues.push(ValidationIssue {
                subject: subject.clone(),
                message: format!("attribute #{} has an empty name", index + 1),
                is_error: true,
            });
            continue;
        }

        let lower = name.to_lowercase();
        if seen.contains(&lower) {
            issues.push(ValidationIssue {
                subject: format!("attribute '{name}'"),
                message: format!("defined more than once in {subject}"),
                is_error: true,
            });
        } else {
            seen.push(lower);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::PnpResult;
    use crate::resolution::RollOutcome;
    use crate::rules::{AttributeTemplate, RollArgs, RollSignature, preset};
    use crate::sheet::Character;
    use crate::store::UserId;

    #[derive(Debug)]
    struct Custom {
        attributes: Vec<AttributeTemplate>,
        help: &'static str,
    }

    impl RuleSystem for Custom {
        fn name(&self) -> &str {
            "custom"
        }

        fn attributes(&self) -> &[AttributeTemplate] {
            &self.attributes
        }

        fn roll_help(&self) -> &str {
            self.help
        }

        fn roll_signature(&self) -> RollSignature {
            RollSignature::standard()
        }

        fn handle_roll(
            &self,
            _requester: &UserId,
            _character: Option<&Character>,
            _args: &RollArgs,
            _rng: &mut StdRng,
        ) -> PnpResult<RollOutcome> {
            unimplemented!("never rolled in validation tests")
        }
    }

    fn custom(names: &[&str], help: &'static str) -> Custom {
        Custom {
            attributes: names.iter().copied().map(AttributeTemplate::new).collect(),
            help,
        }
    }

    #[test]
    fn presets_are_clean() {
        for name in preset::available() {
            let system = preset::by_name(name).unwrap();
            assert!(validate_system(system.as_ref()).is_empty(), "{name}");
        }
    }

    #[test]
    fn empty_template_warns() {
        let issues = validate_system(&custom(&[], "roll"));
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert_eq!(
            issues[0].to_string(),
            "warning: system 'custom': no attributes defined"
        );
    }

    #[test]
    fn empty_help_warns() {
        let issues = validate_system(&custom(&["MU"], "  "));
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
    }

    #[test]
    fn empty_name_is_error() {
        let issues = validate_system(&custom(&["MU", " "], "roll"));
        assert!(issues.iter().any(|i| i.is_error && i.message.contains("#2")));
    }

    #[test]
    fn case_insensitive_duplicate_is_error() {
        let issues = validate_system(&custom(&["MU", "mu"], "roll"));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error);
        assert_eq!(issues[0].subject, "attribute 'mu'");
    }

    #[test]
    fn loading_fails_on_first_error() {
        use crate::error::PnpError;
        use crate::rules::LoadedSystem;

        let err = LoadedSystem::new(Box::new(custom(&["MU", "Mu"], "roll"))).unwrap_err();
        assert!(matches!(err, PnpError::InvalidSystem(msg) if msg.contains("more than once")));
    }
}
