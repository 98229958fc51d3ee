use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{PoisonError, RwLock};

pub const INITIAL_HEALTH: i64 = 100;

// 体力値への読み書きをスレッド間で安全に行うためのインターフェース
pub trait SharedHealth: Send + Sync {
    fn get(&self) -> i64;
    fn sub(&self, amount: i64);
}

// Readロックで読み、Writeロックで書く
pub struct RwLockHealth {
    value: RwLock<i64>,
}

impl RwLockHealth {
    pub fn new(v: i64) -> Self {
        RwLockHealth {
            value: RwLock::new(v),
        }
    }
}

impl Default for RwLockHealth {
    fn default() -> Self {
        RwLockHealth::new(INITIAL_HEALTH)
    }
}

impl SharedHealth for RwLockHealth {
    fn get(&self) -> i64 {
        // i64は中途半端な状態にならないので、ポイズンされても値をそのまま使う
        let v = self.value.read().unwrap_or_else(PoisonError::into_inner);
        *v
        // スコープを外れた際にReadロックが解除される
    }

    fn sub(&self, amount: i64) {
        let mut v = self.value.write().unwrap_or_else(PoisonError::into_inner);
        *v -= amount;
    }
}

// ロックを使わずアトミック命令のみで読み書きする
pub struct AtomicHealth {
    value: AtomicI64,
}

impl AtomicHealth {
    pub fn new(v: i64) -> Self {
        AtomicHealth {
            value: AtomicI64::new(v),
        }
    }
}

impl Default for AtomicHealth {
    fn default() -> Self {
        AtomicHealth::new(INITIAL_HEALTH)
    }
}

// 共有するのはこの値だけなので、他のメモリとの順序付けは不要
impl SharedHealth for AtomicHealth {
    fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    fn sub(&self, amount: i64) {
        // load -> store だと書き込み側が複数の時に更新が失われる。
        // fetch_subで読み出しと書き込みを不可分に行う
        self.value.fetch_sub(amount, Ordering::Relaxed);
    }
}
