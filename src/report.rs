use crate::data::{MatchResult, Pairing, Standing};

pub fn render_standings(standings: &[Standing]) -> String {
	let mut string = String::from("# Standings\n```");

	for (i, standing) in standings.iter().enumerate() {
		let rank = i + 1;
		let Standing {
			id,
			name,
			wins,
			matches,
		} = standing;

		string.push_str(&format!("\n{rank}: {name} (#{id}) {wins}/{matches}"));
	}

	string.push_str("\n```\n");
	string
}

pub fn render_pairings(pairings: &[Pairing]) -> String {
	let mut string = String::from("# Pairings\n```");

	for p in pairings {
		string.push_str(&format!(
			"\n{} (#{}) vs {} (#{})",
			p.name1, p.id1, p.name2, p.id2
		));
	}

	string.push_str("\n```\n");
	string
}

pub fn render_history(history: &[MatchResult]) -> String {
	let mut string = String::from("# Matches\n```");

	for m in history {
		string.push_str(&format!(
			"\n{}: #{} beat #{} at {}",
			m.match_id,
			m.winner,
			m.loser,
			m.reported_at.format("%Y-%m-%d %H:%M:%S")
		));
	}

	string.push_str("\n```\n");
	string
}

#[cfg(test)]
mod tests {
	use chrono::{TimeZone, Utc};

	use super::*;

	#[test]
	fn standings_are_ranked() {
		let standings = vec![
			Standing { id: 1, name: "Alice".into(), wins: 1, matches: 1 },
			Standing { id: 2, name: "Bob".into(), wins: 0, matches: 1 },
		];

		assert_eq!(
			render_standings(&standings),
			"# Standings\n```\n1: Alice (#1) 1/1\n2: Bob (#2) 0/1\n```\n"
		);
	}

	#[test]
	fn empty_standings_render_an_empty_block() {
		assert_eq!(render_standings(&[]), "# Standings\n```\n```\n");
	}

	#[test]
	fn pairings_list_both_players() {
		let pairings = vec![Pairing {
			id1: 1,
			name1: "Alice".into(),
			id2: 3,
			name2: "Carol".into(),
		}];

		assert_eq!(
			render_pairings(&pairings),
			"# Pairings\n```\nAlice (#1) vs Carol (#3)\n```\n"
		);
	}

	#[test]
	fn history_shows_timestamp() {
		let history = vec![MatchResult {
			match_id: 1,
			winner: 1,
			loser: 2,
			reported_at: Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap(),
		}];

		assert_eq!(
			render_history(&history),
			"# Matches\n```\n1: #1 beat #2 at 2024-03-01 18:30:00\n```\n"
		);
	}
}
