use crate::{FragmentError, Result, Symbol};
#[cfg(feature = "pretty-print")]
use std::fmt::{Display, Formatter};

/// Position of a state inside its owning [`Fragment`].
///
/// Identifiers are only meaningful relative to one fragment: copying a state
/// into another fragment assigns it a new one.
pub type StateID = usize;

/// A directed edge, owned by its source state.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct Transition<L> {
    target: StateID,
    symbol: Symbol<L>,
}

impl<L> Transition<L> {
    pub fn new(target: StateID, symbol: Symbol<L>) -> Self {
        Self { target, symbol }
    }

    pub fn epsilon(target: StateID) -> Self {
        Self::new(target, Symbol::Epsilon)
    }

    pub fn target(&self) -> StateID {
        self.target
    }

    pub fn symbol(&self) -> &Symbol<L> {
        &self.symbol
    }

    /// `None` if the shifted target does not fit in a [`StateID`].
    fn shifted(&self, offset: StateID) -> Option<Self>
    where
        L: Clone,
    {
        Some(Self {
            target: self.target.checked_add(offset)?,
            symbol: self.symbol.clone(),
        })
    }
}

#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct State<L> {
    id: StateID,
    accepting: bool,
    transitions: Vec<Transition<L>>,
}

impl<L> State<L> {
    /// A non-accepting state without transitions.
    pub fn new(id: StateID) -> Self {
        Self {
            id,
            accepting: false,
            transitions: Vec::new(),
        }
    }

    pub fn accepting(id: StateID) -> Self {
        Self {
            accepting: true,
            ..Self::new(id)
        }
    }

    pub fn id(&self) -> StateID {
        self.id
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn transitions(&self) -> &[Transition<L>] {
        &self.transitions
    }

    pub fn add_transition(&mut self, transition: Transition<L>) {
        self.transitions.push(transition);
    }
}

/// An ordered collection of states, indexed `0..n`.
///
/// A well-formed fragment (see [`Fragment::validate`]) has its start at index
/// `0`, exactly one accepting state which is the highest index, and only
/// transitions that target states of the same fragment. Transitions refer to
/// states by index, so the back-edges introduced by Kleene closure are plain
/// numbers rather than shared ownership.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct Fragment<L> {
    states: Vec<State<L>>,
}

impl<L> Fragment<L> {
    /// Creates a fragment without any states.
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Wraps states whose identifiers are already contiguous from `0`.
    pub(crate) fn from_states(states: Vec<State<L>>) -> Self {
        debug_assert!(states.iter().enumerate().all(|(i, s)| s.id == i));
        Self { states }
    }

    /// Appends `state`, which must carry the next contiguous identifier.
    pub fn add_state(&mut self, state: State<L>) -> Result<StateID> {
        let expected = self.states.len();
        if state.id != expected {
            return Err(FragmentError::InvalidState {
                expected,
                found: state.id,
            });
        }

        self.states.push(state);
        Ok(expected)
    }

    /// Appends a fresh state, letting the fragment assign its identifier.
    pub fn push_state(&mut self, accepting: bool) -> StateID {
        let id = self.states.len();
        self.states.push(State {
            id,
            accepting,
            transitions: Vec::new(),
        });
        id
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get_state(&self, id: StateID) -> Result<&State<L>> {
        let count = self.states.len();
        self.states
            .get(id)
            .ok_or(FragmentError::OutOfRange { id, count })
    }

    fn get_state_mut(&mut self, id: StateID) -> Result<&mut State<L>> {
        let count = self.states.len();
        self.states
            .get_mut(id)
            .ok_or(FragmentError::OutOfRange { id, count })
    }

    /// Adds a transition between two states that already exist.
    pub fn add_transition(&mut self, from: StateID, to: StateID, symbol: Symbol<L>) -> Result<()> {
        self.get_state(to)?;
        self.get_state_mut(from)?
            .add_transition(Transition::new(to, symbol));
        Ok(())
    }

    pub fn set_accepting(&mut self, id: StateID, accepting: bool) -> Result<()> {
        self.get_state_mut(id)?.accepting = accepting;
        Ok(())
    }

    /// The entry state. Always `0`.
    pub fn start(&self) -> StateID {
        0
    }

    /// The highest-indexed state, if it is accepting.
    pub fn accepting_state(&self) -> Option<StateID> {
        self.states.last().filter(|s| s.accepting).map(|s| s.id)
    }

    pub fn states(&self) -> impl Iterator<Item = &State<L>> {
        self.states.iter()
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// Checks the single-entry/single-exit invariants.
    pub fn validate(&self) -> Result<()> {
        let Some(last) = self.states.len().checked_sub(1) else {
            return Err(FragmentError::Malformed {
                state: 0,
                reason: "fragment has no states",
            });
        };

        for (index, state) in self.states.iter().enumerate() {
            if state.id != index {
                return Err(FragmentError::Malformed {
                    state: index,
                    reason: "identifier does not match position",
                });
            }
            if state.accepting != (index == last) {
                return Err(FragmentError::Malformed {
                    state: index,
                    reason: if state.accepting {
                        "accepting state is not the final state"
                    } else {
                        "final state is not accepting"
                    },
                });
            }
            if state.transitions.iter().any(|t| t.target > last) {
                return Err(FragmentError::Malformed {
                    state: index,
                    reason: "transition targets a state outside the fragment",
                });
            }
            // the start and final states are merged with neighbouring
            // fragments, so they must have no loops through them
            if last == 0 && !state.transitions.is_empty() {
                return Err(FragmentError::Malformed {
                    state: index,
                    reason: "single-state fragment has transitions",
                });
            }
            if index == last && !state.transitions.is_empty() {
                return Err(FragmentError::Malformed {
                    state: index,
                    reason: "final state has outgoing transitions",
                });
            }
            if state.transitions.iter().any(|t| t.target == 0) {
                return Err(FragmentError::Malformed {
                    state: index,
                    reason: "transition targets the start state",
                });
            }
        }

        Ok(())
    }
}

impl<L: Clone> Fragment<L> {
    /// Copies every state of `source` after the first `skip` into `self`.
    ///
    /// The state originally at `i` becomes `offset + i`, not
    /// `offset + (i - skip)`: `skip` drops states without renumbering the
    /// rest. Transition targets move by the same `offset`, so with `skip = 1`
    /// anything that pointed at `source`'s start now points at `offset`, a
    /// state the receiver already owns. The first copied state, `offset +
    /// skip`, must land exactly at the end of `self`.
    ///
    /// Nothing is copied if an error is returned.
    pub fn copy_states_from(
        &mut self,
        source: &Fragment<L>,
        offset: StateID,
        skip: usize,
    ) -> Result<()> {
        log::trace!(
            "copying {} states at offset {offset} (skipping {skip})",
            source.state_count().saturating_sub(skip),
        );

        if skip >= source.state_count() {
            return Ok(());
        }

        let expected = self.states.len();
        if offset.checked_add(skip) != Some(expected) {
            return Err(FragmentError::InvalidState {
                expected,
                found: offset.saturating_add(skip),
            });
        }

        let count = source.state_count();
        let copied = source
            .states
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(index, state)| {
                let transitions = state
                    .transitions
                    .iter()
                    .map(|t| {
                        t.shifted(offset).ok_or(FragmentError::OutOfRange {
                            id: t.target,
                            count,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(State {
                    id: offset + index,
                    accepting: state.accepting,
                    transitions,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.states.extend(copied);
        Ok(())
    }

    /// Appends `transitions` to the state `target`, moving their targets by
    /// `offset`. Every moved target must be a state of `self`; otherwise
    /// `target` is left unchanged.
    pub fn copy_transitions_into(
        &mut self,
        target: StateID,
        transitions: &[Transition<L>],
        offset: StateID,
    ) -> Result<()> {
        log::trace!(
            "copying {} transitions onto state {target} at offset {offset}",
            transitions.len()
        );

        let count = self.states.len();
        self.get_state(target)?;

        let shifted = transitions
            .iter()
            .map(|t| {
                t.shifted(offset)
                    .filter(|s| s.target < count)
                    .ok_or(FragmentError::OutOfRange {
                        id: t.target.saturating_add(offset),
                        count,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        self.get_state_mut(target)?.transitions.extend(shifted);
        Ok(())
    }
}

impl<L> Default for Fragment<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "pretty-print")]
impl<L: Display> Display for Transition<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "-{}-> {}", self.symbol, self.target)
    }
}

#[cfg(feature = "pretty-print")]
impl<L: Display> Display for State<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marker = if self.accepting { "*" } else { " " };
        write!(f, "{marker}{}:", self.id)?;
        for t in &self.transitions {
            write!(f, " {t}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "pretty-print")]
impl<L: Display> Display for Fragment<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for state in &self.states {
            writeln!(f, "{state}")?;
        }
        Ok(())
    }
}
