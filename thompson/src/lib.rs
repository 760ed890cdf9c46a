#![warn(missing_docs)]
//! Thompson's construction from regular expression trees to NFA fragments.
//!
//! The fragment data structure and the construction functions live in
//! [`thompson_automata`] and are re-exported here. On top of them this crate
//! provides [`Regex`], an operator tree whose [`Regex::compile`] walks the
//! tree bottom-up and produces one [`Fragment`] for the whole expression.
//!
//! ```rust
//! use thompson::Regex;
//!
//! // (a | b)* c
//! let regex = Regex::concat(
//!     Regex::repeat(Regex::or(Regex::symbol('a'), Regex::symbol('b'))),
//!     Regex::symbol('c'),
//! );
//!
//! let nfa = regex.compile().unwrap();
//! assert_eq!(nfa.start(), 0);
//! assert_eq!(nfa.accepting_state(), Some(nfa.state_count() - 1));
//! ```
//!
//! ## Cargo features
//!
//! * `pretty-print` (default): `Display` for [`Regex`], [`Fragment`] and
//!   their parts.

pub use thompson_automata::*;

mod regex;
pub use regex::Regex;
