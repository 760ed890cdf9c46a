#[cfg(feature = "pretty-print")]
use std::fmt::{Display, Formatter};

/// The label on a transition: either a member of the caller's alphabet, or
/// epsilon, which is taken without reading any input.
#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Symbol<L> {
    Epsilon,
    Label(L),
}

impl<L> Symbol<L> {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The alphabet member, or `None` for epsilon.
    pub fn label(&self) -> Option<&L> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Label(l) => Some(l),
        }
    }

    /// Returns true if reading `input` may take a transition with this symbol.
    pub fn matches(&self, input: &L) -> bool
    where
        L: PartialEq,
    {
        self.label() == Some(input)
    }
}

impl<L> From<L> for Symbol<L> {
    fn from(value: L) -> Self {
        Symbol::Label(value)
    }
}

#[cfg(feature = "pretty-print")]
impl<L: Display> Display for Symbol<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Label(l) => write!(f, "{l}"),
        }
    }
}
