//! The option table behind `setoption`.

use std::fmt;

use super::error::OptionError;

/// Largest transposition table size accepted, in MB
pub const MAX_HASH_MB: i64 = 1024 * 1024;
/// Transposition table size when nothing else is configured, in MB
pub const DEFAULT_HASH_MB: i64 = 16;

/// Value placeholder the protocol uses for "no path"
pub const EMPTY_PATH: &str = "<empty>";

/// Type and bounds of a registered option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionKind {
    Button,
    Check { default: bool },
    Spin { default: i64, min: i64, max: i64 },
    String { default: &'static str },
}

impl OptionKind {
    fn default_value(&self) -> String {
        match self {
            OptionKind::Button => String::new(),
            OptionKind::Check { default } => default.to_string(),
            OptionKind::Spin { default, .. } => default.to_string(),
            OptionKind::String { default } => (*default).to_string(),
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            OptionKind::Button => true,
            _ if value.is_empty() => false,
            OptionKind::Check { .. } => value == "true" || value == "false",
            OptionKind::Spin { min, max, .. } => value
                .parse::<i64>()
                .map_or(false, |v| (*min..=*max).contains(&v)),
            OptionKind::String { .. } => true,
        }
    }
}

/// Side effect the caller must carry out after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionAction {
    ResizeHash(usize),
    ClearHash,
    InitTablebases(String),
}

/// One registered option and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UciOption {
    name: &'static str,
    kind: OptionKind,
    value: String,
}

impl UciOption {
    #[must_use]
    pub fn new(name: &'static str, kind: OptionKind) -> Self {
        let value = kind.default_value();
        UciOption { name, kind, value }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for UciOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option name {} type ", self.name)?;
        match &self.kind {
            OptionKind::Button => write!(f, "button"),
            OptionKind::Check { default } => write!(f, "check default {default}"),
            OptionKind::Spin { default, min, max } => {
                write!(f, "spin default {default} min {min} max {max}")
            }
            OptionKind::String { default } => write!(f, "string default {default}"),
        }
    }
}

/// Options keyed by name, compared ASCII case-insensitively.
///
/// Names are fixed at registration; writes never create new entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsMap {
    options: Vec<UciOption>,
}

impl Default for OptionsMap {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsMap {
    /// The engine's standard option set with default values
    #[must_use]
    pub fn new() -> Self {
        let mut map = OptionsMap::empty();
        map.register("Threads", OptionKind::Spin { default: 1, min: 1, max: 512 });
        map.register(
            "Hash",
            OptionKind::Spin {
                default: DEFAULT_HASH_MB,
                min: 1,
                max: MAX_HASH_MB,
            },
        );
        map.register("Clear Hash", OptionKind::Button);
        map.register("Ponder", OptionKind::Check { default: false });
        map.register("MultiPV", OptionKind::Spin { default: 1, min: 1, max: 500 });
        map.register("Move Overhead", OptionKind::Spin { default: 30, min: 0, max: 5000 });
        map.register("nodestime", OptionKind::Spin { default: 0, min: 0, max: 10000 });
        map.register("UCI_Chess960", OptionKind::Check { default: false });
        map.register("SyzygyPath", OptionKind::String { default: EMPTY_PATH });
        map.register("SyzygyProbeDepth", OptionKind::Spin { default: 1, min: 1, max: 100 });
        map.register("Syzygy50MoveRule", OptionKind::Check { default: true });
        map.register("SyzygyProbeLimit", OptionKind::Spin { default: 6, min: 0, max: 6 });
        map
    }

    /// A table with no options registered
    #[must_use]
    pub fn empty() -> Self {
        OptionsMap {
            options: Vec::new(),
        }
    }

    /// Register an option at its default value. Re-registering a name replaces it.
    pub fn register(&mut self, name: &'static str, kind: OptionKind) {
        let option = UciOption::new(name, kind);
        match self.position(name) {
            Some(i) => self.options[i] = option,
            None => self.options.push(option),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UciOption> {
        self.position(name).map(|i| &self.options[i])
    }

    /// Overwrite an option's value.
    ///
    /// Values that do not fit the option's type are rejected without change.
    pub fn set(&mut self, name: &str, value: &str) -> Result<Option<OptionAction>, OptionError> {
        let Some(i) = self.position(name) else {
            return Err(OptionError::NoSuchOption {
                name: name.to_string(),
            });
        };
        let option = &mut self.options[i];
        if !option.kind.accepts(value) {
            return Err(OptionError::InvalidValue {
                name: option.name.to_string(),
                value: value.to_string(),
            });
        }
        if option.kind != OptionKind::Button {
            option.value = value.to_string();
        }

        let name = option.name;
        let action = match name {
            "Hash" => Some(OptionAction::ResizeHash(self.hash_mb())),
            "Clear Hash" => Some(OptionAction::ClearHash),
            "SyzygyPath" => Some(OptionAction::InitTablebases(value.to_string())),
            _ => None,
        };
        Ok(action)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UciOption> {
        self.options.iter()
    }

    /// Current value of a spin option
    #[must_use]
    pub fn spin(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|o| o.value.parse().ok())
    }

    /// Current value of a check option
    #[must_use]
    pub fn check(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|o| o.value.parse().ok())
    }

    /// Current value of a string option
    #[must_use]
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).map(UciOption::value)
    }

    /// Configured transposition table size in MB
    #[must_use]
    pub fn hash_mb(&self) -> usize {
        let mb = self.spin("Hash").unwrap_or(DEFAULT_HASH_MB);
        usize::try_from(mb).unwrap_or(1).max(1)
    }

    /// Configured tablebase path (`<empty>` when unset)
    #[must_use]
    pub fn syzygy_path(&self) -> &str {
        self.string("SyzygyPath").unwrap_or(EMPTY_PATH)
    }

    /// Whether moves are shown in Chess960 castling notation
    #[must_use]
    pub fn chess960(&self) -> bool {
        self.check("UCI_Chess960").unwrap_or(false)
    }
}

impl fmt::Display for OptionsMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a OptionsMap {
    type Item = &'a UciOption;
    type IntoIter = std::slice::Iter<'a, UciOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Split `setoption` arguments into name and value.
///
/// The first token is the `name` marker and is skipped unchecked. Name tokens
/// run up to a `value` token; everything after it is the value. Both are
/// joined with single spaces.
#[must_use]
pub fn parse_setoption(args: &[&str]) -> (String, String) {
    let mut tokens = args.iter().copied().skip(1);
    let name = tokens
        .by_ref()
        .take_while(|&t| t != "value")
        .collect::<Vec<_>>()
        .join(" ");
    let value = tokens.collect::<Vec<_>>().join(" ");
    (name, value)
}
