use std::collections::HashSet;

use tracing::{debug, warn};

use crate::{
	data::{MatchResult, Pairing, Standing},
	error::TournamentError,
	standings::sort,
};

/// Upper bound on partial rounds tried before giving up on avoiding rematches.
const SEARCH_LIMIT: usize = 10_000;

/// Pairs every player exactly once for the next round.
///
/// Players are taken in standings order and each is matched with the highest
/// ranked remaining player they have not met yet, backing up when a choice
/// leaves someone further down without an opponent. When no pairing avoids
/// rematches, or none turns up within `SEARCH_LIMIT` steps, adjacent
/// players are paired regardless of history. The higher ranked player of
/// each pair is `id1`.
pub fn next_round(
	standings: &[Standing],
	history: &[MatchResult],
) -> Result<Vec<Pairing>, TournamentError> {
	if standings.len() % 2 != 0 {
		return Err(TournamentError::OddPlayerCount(standings.len()));
	}

	let mut ranked = standings.to_vec();
	sort(&mut ranked);
	let ranked: Vec<&Standing> = ranked.iter().collect();

	let played: HashSet<(i64, i64)> = history
		.iter()
		.map(|m| key(m.winner, m.loser))
		.collect();

	let mut pairs = Vec::with_capacity(ranked.len() / 2);
	let mut search = Search::new(Some(&played));
	if search.pair_off(&ranked, &mut pairs) {
		debug!(pairs = pairs.len(), steps = search.steps, "paired round without rematches");
		return Ok(pairs);
	}

	warn!(steps = search.steps, "no rematch-free round found, allowing rematches");
	pairs.clear();
	if Search::new(None).pair_off(&ranked, &mut pairs) {
		return Ok(pairs);
	}

	Err(TournamentError::NoPairing)
}

fn key(a: i64, b: i64) -> (i64, i64) {
	(a.min(b), a.max(b))
}

struct Search<'a> {
	played: Option<&'a HashSet<(i64, i64)>>,
	steps: usize,
}

impl<'a> Search<'a> {
	fn new(played: Option<&'a HashSet<(i64, i64)>>) -> Self {
		Search { played, steps: 0 }
	}

	fn allowed(&self, a: i64, b: i64) -> bool {
		self.played.map_or(true, |played| !played.contains(&key(a, b)))
	}

	/// Whether every remaining player still has at least one legal opponent.
	fn viable(&self, remaining: &[&Standing]) -> bool {
		remaining.iter().all(|a| {
			remaining
				.iter()
				.any(|b| a.id != b.id && self.allowed(a.id, b.id))
		})
	}

	fn pair_off(&mut self, remaining: &[&Standing], pairs: &mut Vec<Pairing>) -> bool {
		let Some((first, rest)) = remaining.split_first() else {
			return true;
		};

		if self.steps >= SEARCH_LIMIT || !self.viable(remaining) {
			return false;
		}
		self.steps += 1;

		for (i, opponent) in rest.iter().enumerate() {
			if !self.allowed(first.id, opponent.id) {
				continue;
			}

			let others: Vec<&Standing> = rest
				.iter()
				.enumerate()
				.filter(|(j, _)| *j != i)
				.map(|(_, s)| *s)
				.collect();

			pairs.push(Pairing::new(first, opponent));
			if self.pair_off(&others, pairs) {
				return true;
			}
			pairs.pop();
		}

		false
	}
}
