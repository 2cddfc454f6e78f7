//! Options controlling how definitions are checked.

use log::debug;

/// Environment variable switching type checking on or off.
pub const CHECK_TYPES_VAR: &str = "TYDEF_CHECK_TYPES";

/// Options for a [`Definer`](crate::Definer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefOptions {
    /// Whether arguments and return values are validated
    pub check_types: bool,

    /// Largest arity `def` accepts, enforced even without type checking
    pub max_arity: usize,
}

impl Default for DefOptions {
    fn default() -> Self {
        Self {
            check_types: true,
            max_arity: 9,
        }
    }
}

impl DefOptions {
    /// Defaults, with type checking overridden by `TYDEF_CHECK_TYPES` when set.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(flag) = std::env::var(CHECK_TYPES_VAR) {
            options.check_types = parse_flag(&flag).unwrap_or(options.check_types);
            debug!("{CHECK_TYPES_VAR}={flag}: type checking {}", options.check_types);
        }
        options
    }

    pub fn check_types(mut self, check_types: bool) -> Self {
        self.check_types = check_types;
        self
    }
}

fn parse_flag(flag: &str) -> Option<bool> {
    match flag.trim().to_ascii_lowercase().as_str() {
        "0" | "false" | "off" | "no" => Some(false),
        "1" | "true" | "on" | "yes" => Some(true),
        _ => None,
    }
}
