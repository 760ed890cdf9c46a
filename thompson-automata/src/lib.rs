//! Automaton fragments and Thompson's construction.
//!
//! A [`Fragment`] is a small NFA with a single entry (state `0`) and a single
//! accepting exit (its highest-indexed state). The functions in [`construct`]
//! build a fragment for one [`Symbol`] and combine fragments under the regular
//! expression operators. Combinators only read their operands: every call
//! allocates a fresh fragment, so an operand may be reused freely afterwards.
//!
//! ```rust
//! use thompson_automata::{basic, concatenation, kleene_star, Symbol};
//!
//! let a = basic(Symbol::Label('a'));
//! let b = basic(Symbol::Label('b'));
//!
//! let ab = concatenation(&a, &b).unwrap();
//! assert_eq!(ab.state_count(), 3);
//!
//! // `a` is untouched and can be used again.
//! let a_star = kleene_star(&a).unwrap();
//! assert_eq!(a_star.state_count(), 4);
//! ```

use thiserror::Error;

pub mod construct;
mod fragment;
mod symbol;

pub use construct::{
    basic, concatenation, kleene_star, option, positive_closure, union, Operator,
};
pub use fragment::{Fragment, State, StateID, Transition};
pub use symbol::Symbol;

/// Errors raised when a fragment is mutated or combined incorrectly.
///
/// All of these are contract violations by the caller (or a defect in the
/// fragment itself); none of them is recoverable by retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FragmentError {
    /// A state was added whose identifier is not the next contiguous one.
    #[error("state {found} cannot be added to a fragment with {expected} states")]
    InvalidState { expected: StateID, found: StateID },
    /// A state lookup beyond the end of the fragment.
    #[error("state {id} is out of range for a fragment with {count} states")]
    OutOfRange { id: StateID, count: usize },
    /// A combinator received a fragment without any states.
    #[error("{0} received an operand without states")]
    EmptyOperand(Operator),
    /// A fragment breaks the single-entry/single-exit invariants.
    #[error("malformed fragment at state {state}: {reason}")]
    Malformed { state: StateID, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, FragmentError>;
