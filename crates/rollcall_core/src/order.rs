//! Priority-list label ordering.
//!
//! # Responsibility
//! - Rank group/unit labels against a fixed priority list for report output.
//!
//! # Invariants
//! - Listed labels order strictly by their list index.
//! - Every listed label sorts before every unlisted label.
//! - Unlisted labels tie-break by first character code point only. This is an
//!   intentional simplification, not a general-purpose string sort: labels
//!   sharing a first character compare equal, and their relative order is
//!   whatever the caller's (stable) sort preserves.

use std::cmp::Ordering;

/// Compares two labels against `priority`.
pub fn priority_cmp(a: &str, b: &str, priority: &[&str]) -> Ordering {
    let rank_a = priority.iter().position(|entry| *entry == a);
    let rank_b = priority.iter().position(|entry| *entry == b);

    match (rank_a, rank_b) {
        (Some(ia), Some(ib)) => ia.cmp(&ib),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => first_char_cmp(a, b),
    }
}

fn first_char_cmp(a: &str, b: &str) -> Ordering {
    let ca = a.chars().next().map(u32::from).unwrap_or(0);
    let cb = b.chars().next().map(u32::from).unwrap_or(0);
    ca.cmp(&cb)
}
