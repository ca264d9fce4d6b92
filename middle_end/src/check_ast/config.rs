use std::fmt;

/// The structural checks, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    DuplicateUses,
    MissingDefs,
    Unresolveds,
    Primitives,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::DuplicateUses,
        CheckKind::MissingDefs,
        CheckKind::Unresolveds,
        CheckKind::Primitives,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CheckKind::DuplicateUses => "duplicate-uses",
            CheckKind::MissingDefs => "missing-defs",
            CheckKind::Unresolveds => "unresolveds",
            CheckKind::Primitives => "primitives",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which checks the driver runs at each verification point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyConfig {
    pub enabled: bool,
    pub skip: Vec<CheckKind>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            skip: Vec::new(),
        }
    }
}

impl VerifyConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            skip: Vec::new(),
        }
    }

    pub fn skipping(mut self, check: CheckKind) -> Self {
        if !self.skip.contains(&check) {
            self.skip.push(check);
        }
        self
    }

    pub fn runs(&self, check: CheckKind) -> bool {
        self.enabled && !self.skip.contains(&check)
    }
}
