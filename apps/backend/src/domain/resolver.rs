//! Plurality resolution of a closed round.

use std::collections::{BTreeMap, BTreeSet};

/// Result of resolving a round's tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    WinningMove { uci: String, votes: u32 },
    NoDecision,
}

/// Pick the community move from `tally`, restricted to `legal`.
///
/// The highest count wins. Equal counts are broken by the lexicographically
/// smallest UCI string. Entries with zero votes or outside `legal` never win.
pub fn resolve(tally: &BTreeMap<String, u32>, legal: &BTreeSet<String>) -> Resolution {
    let mut best: Option<(&String, u32)> = None;

    // BTreeMap iterates in ascending key order, so a strict `>` keeps the
    // smallest UCI among equal counts.
    for (uci, &votes) in tally {
        if votes == 0 || !legal.contains(uci) {
            continue;
        }
        match best {
            Some((_, top)) if votes <= top => {}
            _ => best = Some((uci, votes)),
        }
    }

    match best {
        Some((uci, votes)) => Resolution::WinningMove {
            uci: uci.clone(),
            votes,
        },
        None => Resolution::NoDecision,
    }
}
