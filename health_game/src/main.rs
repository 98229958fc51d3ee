use std::error::Error;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};

use health_game::{run, AtomicHealth, GameError, Outcome, Player, RwLockHealth, SharedHealth};

// 体力値を守る同期方式
#[derive(Clone, Copy, Debug, ValueEnum)]
enum SyncStrategy {
    Rwlock,
    Atomic,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Damages a player until its health runs out", long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value_t = SyncStrategy::Rwlock)]
    sync: SyncStrategy,

    // ダメージ列を再現したい場合に指定
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long)]
    verbose: bool,
}

async fn play<H>(seed: Option<u64>) -> Result<Outcome, GameError>
where
    H: SharedHealth + Default + 'static,
{
    let player = Arc::new(Player::<H>::default());
    run(player, seed).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // ログはstderrへ出すので、stdoutの表示行は崩れない
    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    info!("start: sync = {:?}, seed = {:?}", args.sync, args.seed);
    let outcome = match args.sync {
        SyncStrategy::Rwlock => play::<RwLockHealth>(args.seed).await?,
        SyncStrategy::Atomic => play::<AtomicHealth>(args.seed).await?,
    };
    info!("exit: {:?}", outcome);

    Ok(())
}
