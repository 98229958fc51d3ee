use crate::health::{RwLockHealth, SharedHealth};

// 2つのループから共有されるプレイヤー
// 体力には下限がなく、ゲームループが気付くまでは負の値にもなり得る
pub struct Player<H = RwLockHealth> {
    health: H,
}

impl<H: SharedHealth> Player<H> {
    pub fn new(health: H) -> Self {
        Player { health }
    }

    pub fn health(&self) -> i64 {
        self.health.get()
    }

    pub fn take_damage(&self, value: i64) {
        self.health.sub(value);
    }

    pub fn is_dead(&self) -> bool {
        self.health() <= 0
    }
}

impl<H: SharedHealth + Default> Default for Player<H> {
    fn default() -> Self {
        Player::new(H::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::AtomicHealth;

    #[test]
    fn damage_sequence() {
        let p: Player<AtomicHealth> = Player::default();
        let mut v = Vec::new();
        for d in [30, 25, 50] {
            p.take_damage(d);
            v.push(p.health());
        }
        assert_eq!(v, vec![70, 45, -5]);
        assert!(p.is_dead());
    }

    #[test]
    fn exactly_zero_is_dead() {
        let p: Player = Player::default();
        assert!(!p.is_dead());
        p.take_damage(100);
        assert_eq!(p.health(), 0);
        assert!(p.is_dead());
    }
}
