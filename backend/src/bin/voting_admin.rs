//! Manage elections, parties and candidates in the voting database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use voting::domain::ports::ElectionRepository;
use voting::domain::{ElectionId, NewCandidate, NewElection, NewParty, PartyId};
use voting::outbound::persistence::{
    DbPool, DieselElectionRepository, PoolConfig, run_pending_migrations,
};
use voting::settings::VotingSettings;

/// `voting-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "voting-admin",
    about = "Administer elections, parties and candidates",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `VOTING_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Apply pending schema migrations.
    Migrate,
    /// Create an election open between two RFC 3339 timestamps.
    CreateElection {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, value_parser = parse_timestamp)]
        starts_at: DateTime<Utc>,
        #[arg(long, value_parser = parse_timestamp)]
        ends_at: DateTime<Utc>,
    },
    /// Create a party.
    CreateParty {
        #[arg(long)]
        name: String,
        /// Path or URL of the party symbol image.
        #[arg(long)]
        symbol: String,
    },
    /// Create a candidate standing for a party in an election.
    CreateCandidate {
        #[arg(long)]
        name: String,
        #[arg(long)]
        party_id: i64,
        #[arg(long)]
        election_id: i64,
        /// Path or URL of the candidate photo.
        #[arg(long, default_value = "")]
        photo: String,
        #[arg(long, default_value = "")]
        bio: String,
    },
    /// Print every election ordered by start time.
    ListElections,
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| format!("expected an RFC 3339 timestamp: {err}"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init();

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build admin runtime")?;
    runtime.block_on(run(args))
}

fn resolve_database_url(cli: Option<String>) -> Result<String> {
    if let Some(url) = cli.filter(|url| !url.trim().is_empty()) {
        return Ok(url);
    }
    let settings = VotingSettings::load_from_iter([OsString::from("voting-admin")])
        .wrap_err("failed to load settings")?;
    settings
        .database_url()
        .map(str::to_owned)
        .ok_or_else(|| eyre!("no database configured; pass --database-url or set VOTING_DATABASE_URL"))
}

async fn run(args: CliArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;

    if matches!(args.command, Command::Migrate) {
        let applied = run_pending_migrations(&database_url)
            .await
            .wrap_err("migration failed")?;
        println!("applied {applied} migration(s)");
        return Ok(());
    }

    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .wrap_err("failed to create database pool")?;
    let repo = DieselElectionRepository::new(pool);
    execute(&repo, args.command).await
}

async fn execute(repo: &impl ElectionRepository, command: Command) -> Result<()> {
    match command {
        Command::Migrate => Ok(()),
        Command::CreateElection {
            name,
            description,
            starts_at,
            ends_at,
        } => {
            let draft = NewElection::try_new(name, description, starts_at, ends_at)?;
            let election = repo.create_election(draft).await?;
            info!(election_id = %election.id(), "election created");
            println!("{}\t{}", election.id(), election.name());
            Ok(())
        }
        Command::CreateParty { name, symbol } => {
            let party = repo.create_party(NewParty::try_new(name, symbol)?).await?;
            info!(party_id = %party.id, "party created");
            println!("{}\t{}", party.id, party.name);
            Ok(())
        }
        Command::CreateCandidate {
            name,
            party_id,
            election_id,
            photo,
            bio,
        } => {
            let draft = NewCandidate::try_new(
                name,
                photo,
                bio,
                PartyId::new(party_id),
                ElectionId::new(election_id),
            )?;
            let candidate = repo.create_candidate(draft).await?;
            info!(candidate_id = %candidate.id, "candidate created");
            println!("{}\t{}", candidate.id, candidate.name);
            Ok(())
        }
        Command::ListElections => {
            for election in repo.list_elections().await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    election.id(),
                    election.name(),
                    election.starts_at().to_rfc3339(),
                    election.ends_at().to_rfc3339()
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("2026-05-01T08:00:00Z", Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0))]
    #[case("2026-05-01T13:30:00+05:30", Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0))]
    fn timestamps_are_normalised_to_utc(
        #[case] raw: &str,
        #[case] expected: chrono::LocalResult<DateTime<Utc>>,
    ) {
        assert_eq!(parse_timestamp(raw), Ok(expected.single().expect("valid")));
    }

    #[rstest]
    fn rejects_bare_dates() {
        assert!(parse_timestamp("2026-05-01").is_err());
    }

    #[rstest]
    fn parses_create_candidate() {
        let args = CliArgs::try_parse_from([
            "voting-admin",
            "--database-url",
            "postgres://localhost/voting",
            "create-candidate",
            "--name",
            "Asha",
            "--party-id",
            "2",
            "--election-id",
            "1",
        ])
        .expect("arguments parse");
        assert_eq!(
            args.database_url.as_deref(),
            Some("postgres://localhost/voting")
        );
        match args.command {
            Command::CreateCandidate {
                name,
                party_id,
                election_id,
                photo,
                ..
            } => {
                assert_eq!(name, "Asha");
                assert_eq!(party_id, 2);
                assert_eq!(election_id, 1);
                assert_eq!(photo, "");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[rstest]
    fn create_election_requires_window() {
        let result = CliArgs::try_parse_from(["voting-admin", "create-election", "--name", "General"]);
        assert!(result.is_err());
    }

    #[rstest]
    fn cli_url_wins_over_settings() {
        let url = resolve_database_url(Some("postgres://cli/voting".to_owned()))
            .expect("explicit url");
        assert_eq!(url, "postgres://cli/voting");
    }
}
