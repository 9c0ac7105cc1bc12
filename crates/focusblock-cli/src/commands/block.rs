use std::path::PathBuf;

use clap::Subcommand;
use focusblock_core::block::CheckInSpec;
use focusblock_core::clock::{format_clock, now_ms};
use focusblock_core::error::Result;
use focusblock_core::storage::{self, Config, SessionStore};
use focusblock_core::{ActionChain, BlockSession, BlockStatus, StartGuard};

#[derive(Subcommand)]
pub enum BlockAction {
    /// Start a focus block (replaces any active block)
    Start {
        /// Block length in minutes
        #[arg(long)]
        minutes: Option<f64>,
        /// Check-in minutes: "5, 12" for offsets, a single number to repeat
        #[arg(long)]
        check_ins: Option<String>,
    },
    /// Suspend the running block
    Pause,
    /// Resume a paused block
    Resume,
    /// Cancel the active block
    Stop,
    /// Advance the block, printing due events and a state snapshot
    Status,
    /// Print the HUD lines for the active block
    Hud,
    /// Record one user action on the active block's chain
    Touch,
}

fn chain_path() -> Result<PathBuf> {
    Ok(storage::data_dir()?.join("chain.json"))
}

fn load_chain(cfg: &Config) -> ActionChain {
    chain_path()
        .ok()
        .and_then(|p| std::fs::read_to_string(p).ok())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_else(|| ActionChain::with_threshold(cfg.hud.chain_fire_threshold))
}

fn save_chain(chain: &ActionChain) -> Result<()> {
    std::fs::write(chain_path()?, serde_json::to_string(chain)?)?;
    Ok(())
}

fn clear_chain() -> Result<()> {
    match std::fs::remove_file(chain_path()?) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn print_no_active_block() {
    println!("{{\"type\": \"no_active_block\"}}");
}

pub fn run(action: BlockAction) -> Result<()> {
    let store = SessionStore::open()?;
    let cfg = Config::load_or_default();
    let now = now_ms();

    match action {
        BlockAction::Start { minutes, check_ins } => {
            // Two UI triggers inside the debounce window mean one block.
            let active = store.load().filter(|s| s.status() != BlockStatus::Ended);
            let mut guard = StartGuard::with_last_start(
                cfg.block.start_debounce_ms,
                active.as_ref().map(|s| s.started_at_ms()),
            );
            if !guard.try_start(now) {
                println!("{{\"type\": \"start_ignored\"}}");
                return Ok(());
            }

            let minutes = minutes.unwrap_or(cfg.block.default_minutes);
            let raw = check_ins.unwrap_or_else(|| cfg.block.check_ins.clone());
            let specs = CheckInSpec::parse_input(&raw);
            let (session, started) = BlockSession::start(minutes, &specs, now);
            store.save(&session)?;
            save_chain(&ActionChain::with_threshold(cfg.hud.chain_fire_threshold))?;
            println!("{}", serde_json::to_string_pretty(&started)?);
        }
        BlockAction::Pause => match store.load() {
            Some(mut session) => {
                match session.pause(now) {
                    Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                    None => println!("{}", serde_json::to_string_pretty(&session.snapshot(now))?),
                }
                store.save(&session)?;
            }
            None => print_no_active_block(),
        },
        BlockAction::Resume => match store.load() {
            Some(mut session) => {
                match session.resume(now) {
                    Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                    None => println!("{}", serde_json::to_string_pretty(&session.snapshot(now))?),
                }
                store.save(&session)?;
            }
            None => print_no_active_block(),
        },
        BlockAction::Stop => match store.load() {
            Some(mut session) => {
                match session.stop(now) {
                    Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                    None => print_no_active_block(),
                }
                store.clear()?;
                clear_chain()?;
            }
            None => print_no_active_block(),
        },
        BlockAction::Status => match store.load() {
            Some(mut session) => {
                for event in session.tick(now) {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                println!("{}", serde_json::to_string_pretty(&session.snapshot(now))?);
                if session.status() == BlockStatus::Ended {
                    store.clear()?;
                    clear_chain()?;
                } else {
                    // Persist the advanced check-in cursor.
                    store.save(&session)?;
                }
            }
            None => print_no_active_block(),
        },
        BlockAction::Hud => match store.load() {
            Some(session) => {
                let chain = load_chain(&cfg);
                let flare = if chain.is_on_fire() { "🔥" } else { "⚡" };
                println!("{flare} Chain: {}", chain.count());
                println!("Block left: {}", format_clock(session.remaining_ms(now)));
                if cfg.hud.show_next_check_in {
                    let next = session
                        .next_check_in_remaining_ms(now)
                        .map(format_clock)
                        .unwrap_or_else(|| "--:--".to_string());
                    println!("Next check-in: {next}");
                }
            }
            None => print_no_active_block(),
        },
        BlockAction::Touch => match store.load().filter(|s| s.status() != BlockStatus::Ended) {
            Some(_) => {
                let mut chain = load_chain(&cfg);
                let on_fire = chain.record_action();
                save_chain(&chain)?;
                println!(
                    "{}",
                    serde_json::json!({
                        "type": "chain",
                        "count": chain.count(),
                        "on_fire": on_fire,
                    })
                );
            }
            None => print_no_active_block(),
        },
    }

    Ok(())
}
