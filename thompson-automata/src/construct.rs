//! Thompson's construction.
//!
//! Every function here reads its operands and returns a new [`Fragment`].
//! Operands are never modified, so the same sub-result may be fed to several
//! combinators (as [`positive_closure`] does with its own operand).

use crate::{Fragment, FragmentError, Result, State, Symbol, Transition};
use std::fmt::{Display, Formatter};

/// The regular expression operators that combine fragments.
#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Union,
    Concatenation,
    KleeneStar,
    PositiveClosure,
    Option,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Union => write!(f, "union"),
            Operator::Concatenation => write!(f, "concatenation"),
            Operator::KleeneStar => write!(f, "kleene star"),
            Operator::PositiveClosure => write!(f, "positive closure"),
            Operator::Option => write!(f, "option"),
        }
    }
}

fn operand<L>(operator: Operator, fragment: &Fragment<L>) -> Result<&Fragment<L>> {
    if fragment.is_empty() {
        return Err(FragmentError::EmptyOperand(operator));
    }
    fragment.validate()?;
    Ok(fragment)
}

fn finish<L>(operator: Operator, fragment: Fragment<L>) -> Result<Fragment<L>> {
    fragment.validate()?;
    log::debug!(
        "{operator}: {} states, {} transitions",
        fragment.state_count(),
        fragment.transition_count()
    );
    Ok(fragment)
}

/// `s`: a start state with a single transition labelled `symbol` to an
/// accepting state.
pub fn basic<L>(symbol: Symbol<L>) -> Fragment<L> {
    let mut start = State::new(0);
    start.add_transition(Transition::new(1, symbol));
    Fragment::from_states(vec![start, State::accepting(1)])
}

/// `E*`: zero or more traversals of `fragment`.
///
/// ```text
///       ┌──────── ε ────────┐
///       │                   v
///  S ─ε─> [ E ] ─ε─────────> F
///          ^  │
///          └ε─┘
/// ```
pub fn kleene_star<L: Clone>(fragment: &Fragment<L>) -> Result<Fragment<L>> {
    let inner = operand(Operator::KleeneStar, fragment)?;

    let mut out = Fragment::new();
    let start = out.push_state(false);

    let inner_start = out.state_count();
    out.copy_states_from(inner, inner_start, 0)?;
    let inner_end = out.state_count() - 1;
    out.set_accepting(inner_end, false)?;

    let end = out.push_state(true);

    out.add_transition(start, inner_start, Symbol::Epsilon)?;
    out.add_transition(start, end, Symbol::Epsilon)?;
    // loop back for repetition
    out.add_transition(inner_end, inner_start, Symbol::Epsilon)?;
    out.add_transition(inner_end, end, Symbol::Epsilon)?;

    finish(Operator::KleeneStar, out)
}

/// `E+`: `E` followed by `E*`.
pub fn positive_closure<L: Clone>(fragment: &Fragment<L>) -> Result<Fragment<L>> {
    let once = operand(Operator::PositiveClosure, fragment)?;
    let out = concatenation(once, &kleene_star(once)?)?;
    finish(Operator::PositiveClosure, out)
}

/// `E?`: `E` or the empty path.
pub fn option<L: Clone>(fragment: &Fragment<L>) -> Result<Fragment<L>> {
    let inner = operand(Operator::Option, fragment)?;
    let out = union(inner, &basic(Symbol::Epsilon))?;
    finish(Operator::Option, out)
}

/// `E1 | E2`: a new start branching into both operands, which both lead into
/// a new accepting state.
pub fn union<L: Clone>(fragment1: &Fragment<L>, fragment2: &Fragment<L>) -> Result<Fragment<L>> {
    let left = operand(Operator::Union, fragment1)?;
    let right = operand(Operator::Union, fragment2)?;

    let mut out = Fragment::new();
    let start = out.push_state(false);

    let left_start = out.state_count();
    out.copy_states_from(left, left_start, 0)?;
    let left_end = out.state_count() - 1;

    let right_start = out.state_count();
    out.copy_states_from(right, right_start, 0)?;
    let right_end = out.state_count() - 1;

    out.set_accepting(left_end, false)?;
    out.set_accepting(right_end, false)?;
    let end = out.push_state(true);

    out.add_transition(start, left_start, Symbol::Epsilon)?;
    out.add_transition(start, right_start, Symbol::Epsilon)?;
    out.add_transition(left_end, end, Symbol::Epsilon)?;
    out.add_transition(right_end, end, Symbol::Epsilon)?;

    finish(Operator::Union, out)
}

/// `E1 E2`: the accepting state of `fragment1` and the start state of
/// `fragment2` are merged into a single junction state, so no epsilon hop is
/// needed at the seam.
pub fn concatenation<L: Clone>(
    fragment1: &Fragment<L>,
    fragment2: &Fragment<L>,
) -> Result<Fragment<L>> {
    let left = operand(Operator::Concatenation, fragment1)?;
    let right = operand(Operator::Concatenation, fragment2)?;

    let mut out = Fragment::new();
    out.copy_states_from(left, 0, 0)?;

    let junction = out.state_count() - 1;
    out.copy_states_from(right, junction, 1)?;
    out.copy_transitions_into(
        junction,
        right.get_state(right.start())?.transitions(),
        junction,
    )?;

    let end = out.state_count() - 1;
    out.set_accepting(junction, false)?;
    out.set_accepting(end, true)?;

    finish(Operator::Concatenation, out)
}
