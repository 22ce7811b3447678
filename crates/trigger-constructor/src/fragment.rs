//! Condition fragments entered in the trigger wizard.

/// Whether the item value must satisfy a fragment or must not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchKind {
    /// The macro reference must be non-zero: `<>0`
    Match,
    /// The macro reference must be zero: `=0`
    NoMatch,
}

impl MatchKind {
    /// Comparator appended to each macro reference, e.g. `<>0`.
    pub fn comparator(self) -> &'static str {
        match self {
            MatchKind::Match => "<>0",
            MatchKind::NoMatch => "=0",
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Match => write!(f, "match"),
            MatchKind::NoMatch => write!(f, "no match"),
        }
    }
}

/// One user-entered condition.
///
/// `value` is free text such as `regexp(error) and iregexp(disk)`; it is
/// checked only when the fragment is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionFragment {
    /// Boolean expression of pattern function calls.
    pub value: String,
    /// Match or no-match.
    pub kind: MatchKind,
}

impl ConditionFragment {
    /// Creates a fragment.
    pub fn new(value: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    /// Creates a fragment the value must match.
    pub fn matching(value: impl Into<String>) -> Self {
        Self::new(value, MatchKind::Match)
    }

    /// Creates a fragment the value must not match.
    pub fn not_matching(value: impl Into<String>) -> Self {
        Self::new(value, MatchKind::NoMatch)
    }
}

/// Boolean connector between two function calls or two fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// `and`
    And,
    /// `or`
    Or,
}

impl Connector {
    /// Keyword as written in expressions.
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::And => "and",
            Connector::Or => "or",
        }
    }
}

impl std::fmt::Display for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
