use clap::{Parser, ValueEnum};
use client::game::ArenaView;
use client::input::BotBrain;
use client::network::ArenaClient;
use client::spectator;
use log::{info, warn};
use shared::DEFAULT_TICK_MS;
use std::time::Duration;
use tokio::time::interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Register an agent and fight
    Bot,
    /// Watch the push channel
    Spectate,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the arena server
    #[arg(short = 's', long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Agent name
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Agent personality
    #[arg(short = 'p', long)]
    personality: Option<String>,

    #[arg(short = 'm', long, value_enum, default_value_t = Mode::Bot)]
    mode: Mode,

    /// Polls (bot) or snapshots (spectate) before exiting; unlimited if absent
    #[arg(short = 'r', long)]
    rounds: Option<u64>,

    /// Poll period in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    poll_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut arena = ArenaClient::new(&args.server)?;

    tokio::select! {
        result = run(&mut arena, &args) => result?,
        _ = tokio::signal::ctrl_c() => info!("Received Ctrl+C, leaving the arena"),
    }

    Ok(())
}

async fn run(arena: &mut ArenaClient, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.mode {
        Mode::Spectate => {
            let view = spectator::spectate(&arena.push_url(), args.rounds).await?;
            info!("Watched {} snapshots", view.updates);
        }
        Mode::Bot => {
            let registered = arena
                .register(args.name.as_deref(), args.personality.as_deref())
                .await?;
            info!("{} ({})", registered.message, registered.agent_id);

            let mut view = ArenaView::new(Some(registered.agent_id));
            let mut brain = BotBrain::new();
            let mut poll = interval(Duration::from_millis(args.poll_ms.max(1)));
            let mut rounds = 0u64;

            while args.rounds.map_or(true, |limit| rounds < limit) {
                poll.tick().await;
                rounds += 1;

                let state = match arena.state().await {
                    Ok(state) => state,
                    Err(e) => {
                        warn!("State poll failed: {}", e);
                        continue;
                    }
                };
                info!("{}", state.rich_description.replace('\n', " | "));
                view.apply_snapshot(state.agents);

                if let Some(action) = brain.decide(&view) {
                    if let Err(e) = arena.act(&action).await {
                        warn!("Action {:?} rejected: {}", action, e);
                    }
                }
            }

            info!("Made {} decisions over {} rounds", brain.decisions(), rounds);
        }
    }

    Ok(())
}
