use std::collections::HashSet;
#[cfg(feature = "pretty-print")]
use std::fmt::{Display, Formatter};
use std::hash::Hash;
use std::rc::Rc;
use thompson_automata::{
    basic, concatenation, kleene_star, option, positive_closure, union, Fragment, Result, Symbol,
};

/// A regular expression over the alphabet `L`, already arranged as an
/// operator tree.
///
/// Precedence and associativity are whatever shape the tree was built with.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub enum Regex<L> {
    /// The empty string.
    Epsilon,
    /// A single member of the alphabet.
    Symbol(L),
    /// Kleene star, `E*`.
    Repeat(Rc<Regex<L>>),
    /// Positive closure, `E+`.
    Plus(Rc<Regex<L>>),
    /// `E?`.
    Optional(Rc<Regex<L>>),
    /// `E1 | E2`.
    Or(Rc<Regex<L>>, Rc<Regex<L>>),
    /// `E1 E2`.
    Concat(Rc<Regex<L>>, Rc<Regex<L>>),
}

impl<L> Regex<L> {
    /// A regex matching exactly `label`.
    pub fn symbol(label: L) -> Self {
        Regex::Symbol(label)
    }

    /// `inner*`
    pub fn repeat(inner: impl Into<Rc<Self>>) -> Self {
        Regex::Repeat(inner.into())
    }

    /// `inner+`
    pub fn plus(inner: impl Into<Rc<Self>>) -> Self {
        Regex::Plus(inner.into())
    }

    /// `inner?`
    pub fn optional(inner: impl Into<Rc<Self>>) -> Self {
        Regex::Optional(inner.into())
    }

    /// `l | r`
    pub fn or(l: impl Into<Rc<Self>>, r: impl Into<Rc<Self>>) -> Self {
        Regex::Or(l.into(), r.into())
    }

    /// `l r`
    pub fn concat(l: impl Into<Rc<Self>>, r: impl Into<Rc<Self>>) -> Self {
        Regex::Concat(l.into(), r.into())
    }

    /// Whether this regex matches the empty string.
    pub fn is_nullable(&self) -> bool {
        match self {
            Regex::Epsilon => true,
            Regex::Symbol(_) => false,
            Regex::Repeat(_) | Regex::Optional(_) => true,
            Regex::Plus(i) => i.is_nullable(),
            Regex::Or(l, r) => l.is_nullable() || r.is_nullable(),
            Regex::Concat(l, r) => l.is_nullable() && r.is_nullable(),
        }
    }

    /// All alphabet members that occur in this regex.
    pub fn alphabet(&self) -> HashSet<&L>
    where
        L: Hash + Eq,
    {
        let mut alphabet = HashSet::new();
        self.search_alphabet(&mut alphabet);
        alphabet
    }

    fn search_alphabet<'a>(&'a self, alphabet: &mut HashSet<&'a L>)
    where
        L: Hash + Eq,
    {
        match self {
            Regex::Epsilon => {}
            Regex::Symbol(s) => {
                alphabet.insert(s);
            }
            Regex::Repeat(i) | Regex::Plus(i) | Regex::Optional(i) => i.search_alphabet(alphabet),
            Regex::Or(l, r) | Regex::Concat(l, r) => {
                l.search_alphabet(alphabet);
                r.search_alphabet(alphabet);
            }
        }
    }
}

impl<L: Clone> Regex<L> {
    /// Builds the NFA fragment for this regex.
    ///
    /// Operands are built before the operator that combines them. Shared
    /// subtrees are built once per occurrence, and each occurrence gets its
    /// own states.
    pub fn compile(&self) -> Result<Fragment<L>> {
        let fragment = match self {
            Regex::Epsilon => basic(Symbol::Epsilon),
            Regex::Symbol(s) => basic(Symbol::Label(s.clone())),
            Regex::Repeat(i) => kleene_star(&i.compile()?)?,
            Regex::Plus(i) => positive_closure(&i.compile()?)?,
            Regex::Optional(i) => option(&i.compile()?)?,
            Regex::Or(l, r) => union(&l.compile()?, &r.compile()?)?,
            Regex::Concat(l, r) => concatenation(&l.compile()?, &r.compile()?)?,
        };

        log::trace!(
            "compiled {} node into {} states",
            self.kind(),
            fragment.state_count()
        );
        Ok(fragment)
    }

    fn kind(&self) -> &'static str {
        match self {
            Regex::Epsilon => "epsilon",
            Regex::Symbol(_) => "symbol",
            Regex::Repeat(_) => "repeat",
            Regex::Plus(_) => "plus",
            Regex::Optional(_) => "optional",
            Regex::Or(_, _) => "or",
            Regex::Concat(_, _) => "concat",
        }
    }
}

#[cfg(feature = "pretty-print")]
impl<L: Display> Display for Regex<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Regex::Epsilon => write!(f, "e"),
            Regex::Symbol(s) => write!(f, "{s}"),
            Regex::Repeat(r) => write!(f, "({r})*"),
            Regex::Plus(r) => write!(f, "({r})+"),
            Regex::Optional(r) => write!(f, "({r})?"),
            Regex::Or(a, b) => write!(f, "({a} | {b})"),
            Regex::Concat(a, b) => write!(f, "{a} {b}"),
        }
    }
}
