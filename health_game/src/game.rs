use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinError;
use tokio::time::{self, MissedTickBehavior};

use crate::health::SharedHealth;
use crate::player::Player;

pub const DAMAGE_INTERVAL: Duration = Duration::from_millis(300);
pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_DAMAGE: i64 = 40;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("console output failed: {0}")]
    Io(#[from] io::Error),
    #[error("reporter task failed: {0}")]
    Join(#[from] JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    GameOver { ticks: u32 },
    Interrupted,
}

// 終了通知の送信側。triggerは一度だけ呼ばれる
pub struct ShutdownTrigger {
    sender: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn trigger(self) {
        // 受信側がいなくてもエラーにはしない
        self.sender.send_replace(true);
    }
}

#[derive(Clone)]
pub struct Shutdown {
    receiver: watch::Receiver<bool>,
}

impl Shutdown {
    // 送信側が破棄された場合も終了とみなす
    pub async fn wait(&mut self) {
        loop {
            if *self.receiver.borrow_and_update() {
                return;
            }
            if self.receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (sender, receiver) = watch::channel(false);
    (ShutdownTrigger { sender }, Shutdown { receiver })
}

pub fn random_damage<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(0..MAX_DAMAGE)
}

// 一定周期でダメージを与え、体力が0以下になったら終了する。
// 戻り値はダメージを与えた回数
pub async fn game_loop<H, F, W>(
    player: &Player<H>,
    period: Duration,
    mut draw: F,
    out: &mut W,
) -> io::Result<u32>
where
    H: SharedHealth,
    F: FnMut() -> i64,
    W: Write,
{
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut ticks = 0;
    loop {
        // 最初のtickは即座に完了する
        ticker.tick().await;
        let damage = draw();
        player.take_damage(damage);
        ticks += 1;
        debug!("tick {}: damage = {}, health = {}", ticks, damage, player.health());

        if player.is_dead() {
            // 表示用の行は\rで終わっているので、改行してから出力する
            writeln!(out, "\nGame Over")?;
            out.flush()?;
            return Ok(ticks);
        }
    }
}

// 一定周期で体力を表示する。\rで同じ行を上書きする
pub async fn ui_loop<H, W>(
    player: Arc<Player<H>>,
    period: Duration,
    mut out: W,
    mut shutdown: Shutdown,
) -> io::Result<W>
where
    H: SharedHealth,
    W: Write,
{
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.wait() => return Ok(out),
            _ = ticker.tick() => {
                write!(out, "player health: {}\r", player.health())?;
                out.flush()?;
            }
        }
    }
}

// 表示用タスクを生成し、ダメージループは呼び出し元のタスクで実行する。
// ダメージループが終わったら表示用タスクに終了を通知して待ち合わせる
pub async fn run<H>(player: Arc<Player<H>>, seed: Option<u64>) -> Result<Outcome, GameError>
where
    H: SharedHealth + 'static,
{
    let mut stdout = io::stdout();
    let (outcome, _) = run_with(player, seed, io::stdout(), &mut stdout, signal::ctrl_c()).await?;
    Ok(outcome)
}

// 出力先と中断用のFutureを差し替えられるようにしたもの。
// 戻り値には表示用タスクから返された出力先も含む
pub async fn run_with<H, U, G, I>(
    player: Arc<Player<H>>,
    seed: Option<u64>,
    ui_out: U,
    game_out: &mut G,
    interrupt: I,
) -> Result<(Outcome, U), GameError>
where
    H: SharedHealth + 'static,
    U: Write + Send + 'static,
    G: Write,
    I: Future<Output = io::Result<()>>,
{
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let (trigger, shutdown) = shutdown_channel();
    let ui = tokio::spawn(ui_loop(player.clone(), REPORT_INTERVAL, ui_out, shutdown));

    let result = tokio::select! {
        r = game_loop(&player, DAMAGE_INTERVAL, || random_damage(&mut rng), game_out) => {
            r.map(|ticks| Outcome::GameOver { ticks })
        }
        r = interrupt => r.map(|()| Outcome::Interrupted),
    };

    trigger.trigger();
    let joined = ui.await;

    // ダメージループ側のエラーを優先する
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            match &joined {
                Err(ui_err) => warn!("reporter failed as well: {}", ui_err),
                Ok(Err(ui_err)) => warn!("reporter failed as well: {}", ui_err),
                Ok(Ok(_)) => {}
            }
            return Err(e.into());
        }
    };
    let ui_out = joined??;

    info!("finished: {:?}, health = {}", outcome, player.health());
    Ok((outcome, ui_out))
}
