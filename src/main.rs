mod cli;

use std::{
	fs::File,
	io::{self, Write},
};

use clap::Parser;
use cli::{Cli, Commands};
use swisstrack::{
	report::{render_history, render_pairings, render_standings},
	Tournament, TournamentError,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TournamentError> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swisstrack=warn")),
		)
		.with_writer(io::stderr)
		.init();

	let cli = Cli::parse();

	let tournament = Tournament::open_file(&cli.database)?;

	let mut out = match cli.output.as_deref() {
		Some(path) => Box::new(File::create(path)?) as Box<dyn Write>,
		None => Box::new(io::stdout()) as Box<dyn Write>,
	};

	match cli.command {
		Commands::Register { name } => {
			let id = tournament.register_player(&name)?;
			writeln!(out, "{id}")?;
		}
		Commands::Report { winner, loser } => {
			let match_id = tournament.report_match(winner, loser)?;
			writeln!(out, "{match_id}")?;
		}
		Commands::Count => writeln!(out, "{}", tournament.count_players()?)?,
		Commands::Standings { csv: true } => tournament.export_standings(&mut out)?,
		Commands::Standings { csv: false } => {
			let string = render_standings(&tournament.player_standings()?);
			out.write_all(string.as_bytes())?;
		}
		Commands::Pairings => {
			let string = render_pairings(&tournament.swiss_pairings()?);
			out.write_all(string.as_bytes())?;
		}
		Commands::NextRound => {
			let string = render_pairings(&tournament.next_round()?);
			out.write_all(string.as_bytes())?;
		}
		Commands::History => {
			let string = render_history(&tournament.match_history()?);
			out.write_all(string.as_bytes())?;
		}
		Commands::Import { results } => {
			let imported = tournament.import_results(File::open(results)?)?;
			writeln!(out, "{imported}")?;
		}
		Commands::Reset { matches_only } => {
			tournament.delete_matches()?;
			if !matches_only {
				tournament.delete_players()?;
			}
		}
	}

	Ok(())
}
