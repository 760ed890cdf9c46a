#![allow(dead_code)]

use std::collections::BTreeSet;
use thompson::{Fragment, Regex, StateID};

#[ctor::ctor]
fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn epsilon_closure(
    nfa: &Fragment<char>,
    states: impl IntoIterator<Item = StateID>,
) -> BTreeSet<StateID> {
    let mut closure = BTreeSet::new();
    let mut stack: Vec<StateID> = states.into_iter().collect();

    while let Some(state) = stack.pop() {
        if !closure.insert(state) {
            continue;
        }
        for t in nfa.get_state(state).unwrap().transitions() {
            if t.symbol().is_epsilon() && !closure.contains(&t.target()) {
                stack.push(t.target());
            }
        }
    }

    closure
}

/// Simulates `nfa` on `input`, tracking the set of active states.
pub fn accepts(nfa: &Fragment<char>, input: &str) -> bool {
    let mut current = epsilon_closure(nfa, [nfa.start()]);

    for c in input.chars() {
        let next: Vec<StateID> = current
            .iter()
            .flat_map(|&s| nfa.get_state(s).unwrap().transitions())
            .filter(|t| t.symbol().matches(&c))
            .map(|t| t.target())
            .collect();

        current = epsilon_closure(nfa, next);
        if current.is_empty() {
            return false;
        }
    }

    current
        .iter()
        .any(|&s| nfa.get_state(s).unwrap().is_accepting())
}

fn ends(regex: &Regex<char>, input: &[char], pos: usize) -> BTreeSet<usize> {
    match regex {
        Regex::Epsilon => BTreeSet::from([pos]),
        Regex::Symbol(c) => {
            if input.get(pos) == Some(c) {
                BTreeSet::from([pos + 1])
            } else {
                BTreeSet::new()
            }
        }
        Regex::Or(l, r) => {
            let mut out = ends(l, input, pos);
            out.extend(ends(r, input, pos));
            out
        }
        Regex::Concat(l, r) => ends(l, input, pos)
            .into_iter()
            .flat_map(|p| ends(r, input, p))
            .collect(),
        Regex::Optional(r) => {
            let mut out = ends(r, input, pos);
            out.insert(pos);
            out
        }
        Regex::Repeat(r) => repeat_ends(r, input, BTreeSet::from([pos])),
        Regex::Plus(r) => repeat_ends(r, input, ends(r, input, pos)),
    }
}

fn repeat_ends(regex: &Regex<char>, input: &[char], from: BTreeSet<usize>) -> BTreeSet<usize> {
    let mut seen = from.clone();
    let mut work: Vec<usize> = from.into_iter().collect();

    while let Some(p) = work.pop() {
        for q in ends(regex, input, p) {
            if seen.insert(q) {
                work.push(q);
            }
        }
    }

    seen
}

/// Reference matcher working directly on the tree, used as an oracle.
pub fn matches(regex: &Regex<char>, input: &str) -> bool {
    let input: Vec<char> = input.chars().collect();
    ends(regex, &input, 0).contains(&input.len())
}

/// Every string over `alphabet` with at most `max_len` characters.
pub fn strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut last = vec![String::new()];

    for _ in 0..max_len {
        last = last
            .iter()
            .flat_map(|s| {
                alphabet.iter().map(move |c| {
                    let mut s = s.clone();
                    s.push(*c);
                    s
                })
            })
            .collect();
        all.extend(last.iter().cloned());
    }

    all
}
