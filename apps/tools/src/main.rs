use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use scoring_core::{
    config::{load_settings_from, DEFAULT_CONFIG_FILE},
    Clock, ManualClock, MatchSession, MatchStateMachine, Settings, SystemClock,
};
use shared::{
    domain::{CourtEnd, ResetKind, ServeCourt, Side, ViewColumn},
    protocol::{LaunchPrompt, MatchView, PresentationInput, SessionOutput, SessionReply},
};
use storage::{FileBlobStore, SnapshotStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

type CliSession = MatchSession<FileBlobStore, Arc<ManualClock>>;

#[derive(Parser, Debug)]
#[command(name = "scorekeeper", about = "Drive the match scorer from the command line")]
struct Cli {
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Print replies as JSON instead of text.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the app: offers resume for a set-up match, otherwise prepares setup.
    Launch,
    /// Answer the launch prompt by resuming the stored match.
    Resume,
    /// Answer the launch prompt by starting over.
    NewMatch,
    /// Choose the starting server: me, opponent, 0 or 1.
    Setup { server: String },
    /// Score a confirmed point for a side (0 or 1).
    Point { side: usize },
    /// Replay raw taps as zone@ms pairs, e.g. `0@0 0@250 1@900`.
    Taps {
        #[arg(required = true)]
        taps: Vec<String>,
    },
    /// Reset with one of: new, new_setup, current, all.
    Reset { kind: String },
    /// Print the stored match without changing it.
    Show,
    /// Print the effective settings.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings =
        load_settings_from(Some(cli.config.as_path()), |name| std::env::var(name).ok());
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }

    let filter =
        EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let clock = Arc::new(ManualClock::new(SystemClock.now_ms()));
    let mut session = open_session(&settings, clock.clone());
    info!(data_dir = %settings.data_dir.display(), "scorekeeper: session opened");

    let inputs = match cli.command {
        Command::Launch => vec![PresentationInput::AppLaunching],
        Command::Resume => vec![PresentationInput::LaunchChoice { resume: true }],
        Command::NewMatch => vec![PresentationInput::LaunchChoice { resume: false }],
        Command::Setup { server } => vec![PresentationInput::SetupChosen {
            server: parse_server(&server)?,
        }],
        Command::Point { side } => {
            return score_point(&mut session, side, cli.json);
        }
        Command::Taps { taps } => {
            return replay_taps(&mut session, &clock, &taps, cli.json);
        }
        Command::Reset { kind } => vec![PresentationInput::ResetRequested {
            kind: kind.parse::<ResetKind>()?,
        }],
        Command::Show => {
            print_view(&session.machine().view(), cli.json)?;
            return Ok(());
        }
        Command::Config => {
            print!(
                "{}",
                toml::to_string(&settings).context("failed to render settings")?
            );
            return Ok(());
        }
    };

    let mut last = None;
    for input in inputs {
        last = Some(apply(&mut session, input, cli.json)?);
    }
    session.handle(PresentationInput::AppClosing)?;

    if let Some(output) = last {
        print_output(&output, cli.json)?;
    }
    Ok(())
}

fn open_session(settings: &Settings, clock: Arc<ManualClock>) -> CliSession {
    let snapshots = SnapshotStore::with_key(
        FileBlobStore::new(&settings.data_dir),
        settings.storage_key.clone(),
    );
    let mut machine = MatchStateMachine::with_snapshots(snapshots);
    machine.restore();
    MatchSession::new(machine, clock, settings.tap_window())
}

fn apply(session: &mut CliSession, input: PresentationInput, json: bool) -> Result<SessionOutput> {
    if json {
        match session.reply(input) {
            SessionReply::Ok(output) => Ok(output),
            err @ SessionReply::Error(_) => {
                println!("{}", serde_json::to_string_pretty(&err)?);
                Err(anyhow!("input rejected"))
            }
        }
    } else {
        Ok(session.handle(input)?)
    }
}

/// Taps the zone twice at the same instant. Fails when the debounce window does not confirm.
fn score_point(session: &mut CliSession, side: usize, json: bool) -> Result<()> {
    apply(session, PresentationInput::ZoneTap { zone: side }, json)?;
    let output = apply(session, PresentationInput::ZoneTap { zone: side }, json)?;
    session.handle(PresentationInput::AppClosing)?;

    if output.point_scored.is_none() {
        return Err(anyhow!(
            "point for side {side} was not confirmed; check that tap_window_ms is above zero"
        ));
    }
    print_output(&output, json)
}

fn replay_taps(
    session: &mut CliSession,
    clock: &ManualClock,
    taps: &[String],
    json: bool,
) -> Result<()> {
    let start_ms = clock.now_ms();
    let mut last = None;
    for raw in taps {
        let (zone, offset_ms) = parse_tap(raw)?;
        clock.set(start_ms.saturating_add(offset_ms));
        let output = apply(session, PresentationInput::ZoneTap { zone }, json)?;
        if let Some(winner) = output.point_scored {
            info!(tap = %raw, winner = %winner, "scorekeeper: point confirmed");
        }
        last = Some(output);
    }
    session.handle(PresentationInput::AppClosing)?;

    if let Some(output) = last {
        print_output(&output, json)?;
    }
    Ok(())
}

fn parse_server(raw: &str) -> Result<usize> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "me" => Ok(Side::B.index()),
        "opponent" | "opp" => Ok(Side::A.index()),
        other => other
            .parse::<usize>()
            .with_context(|| format!("unrecognised server '{raw}'; use me, opponent, 0 or 1")),
    }
}

fn parse_tap(raw: &str) -> Result<(usize, u64)> {
    let (zone, at) = raw
        .split_once('@')
        .ok_or_else(|| anyhow!("tap '{raw}' must look like zone@ms"))?;
    let zone = zone
        .trim()
        .parse::<usize>()
        .with_context(|| format!("invalid zone in tap '{raw}'"))?;
    let at = at
        .trim()
        .parse::<u64>()
        .with_context(|| format!("invalid time in tap '{raw}'"))?;
    Ok((zone, at))
}

fn print_output(output: &SessionOutput, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&SessionReply::Ok(*output))?
        );
        return Ok(());
    }

    if let Some(winner) = output.point_scored {
        println!("point   side {winner}");
    }
    print_view(&output.view, false)?;
    match output.prompt {
        Some(LaunchPrompt::OfferResume) => {
            println!("prompt  resume the stored match or start a new one")
        }
        Some(LaunchPrompt::RequireSetup) => println!("prompt  choose the starting server"),
        None => {}
    }
    Ok(())
}

fn print_view(view: &MatchView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    let [a, b] = view.scores.as_array();
    println!("score   A {a} - {b} B   (you are side {})", view.user_side);
    println!(
        "serve   side {} from the {} court ({} end, {} of view)",
        view.server,
        match view.serve.court {
            ServeCourt::Right => "right",
            ServeCourt::Left => "left",
        },
        match view.serve.end {
            CourtEnd::Far => "far",
            CourtEnd::Near => "near",
        },
        match view.serve.column {
            ViewColumn::Left => "left",
            ViewColumn::Right => "right",
        },
    );
    match (view.streak.side, view.streak.active) {
        (Some(side), true) => println!("streak  side {side} x{}", view.streak.count),
        _ => println!("streak  none"),
    }
    println!(
        "stats   matches={} wins={}",
        view.match_stats.matches, view.match_stats.wins
    );
    println!(
        "setup   {}",
        if view.setup_complete {
            "complete"
        } else {
            "required"
        }
    );
    Ok(())
}
