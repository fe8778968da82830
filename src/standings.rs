//! Standings and candidate pairs computed in memory from a [`Snapshot`].
//!
//! These mirror the `leader_board` view and the pairing self-join, so the
//! aggregation can be checked without going through SQLite.

use std::collections::HashMap;

use crate::data::{MatchRow, Pairing, Player, Standing};

/// Everything stored in a tournament at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
	pub players: Vec<Player>,
	pub matches: Vec<MatchRow>,
}

/// One standing per player, most wins first and ties broken by id.
/// Match rows for players that no longer exist are ignored.
pub fn compute(snapshot: &Snapshot) -> Vec<Standing> {
	let mut tally: HashMap<i64, (u32, u32)> = HashMap::new();
	for row in &snapshot.matches {
		let (wins, matches) = tally.entry(row.player_id).or_default();
		*matches += 1;
		if row.win {
			*wins += 1;
		}
	}

	let mut standings: Vec<Standing> = snapshot
		.players
		.iter()
		.map(|player| {
			let (wins, matches) = tally.get(&player.id).copied().unwrap_or_default();
			Standing {
				id: player.id,
				name: player.name.clone(),
				wins,
				matches,
			}
		})
		.collect();

	sort(&mut standings);
	standings
}

pub fn sort(standings: &mut [Standing]) {
	standings.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.id.cmp(&b.id)));
}

/// Every pair of players with equal wins, lower id first, ordered by ids.
pub fn candidate_pairs(standings: &[Standing]) -> Vec<Pairing> {
	let mut pairs = Vec::new();
	for a in standings {
		for b in standings {
			if a.wins == b.wins && a.id < b.id {
				pairs.push(Pairing::new(a, b));
			}
		}
	}

	pairs.sort_by_key(|p| (p.id1, p.id2));
	pairs
}
