//! Per-process player profile: the coin wallet and run totals.
//!
//! The profile only listens for [`RunnerEvent::GameOver`]. A run left before
//! it ends never produces one, so its coins are not credited.

use crate::runner::RunnerEvent;
use crate::shop::{PurchaseError, Shop};
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct Profile {
    shop: Shop,
    best_score: u64,
    runs: u32,
}

impl Profile {
    pub fn new(shop: Shop) -> Self {
        Self {
            shop,
            best_score: 0,
            runs: 0,
        }
    }

    pub fn balance(&self) -> u64 {
        self.shop.wallet().balance()
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Completed runs.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    /// Spend coins from the wallet on a shop item.
    pub fn purchase(&mut self, id: &str) -> Result<u64, PurchaseError> {
        self.shop.purchase(id)
    }

    /// Apply one session event. Returns true when a finished run was
    /// credited.
    pub fn record(&mut self, event: &RunnerEvent) -> bool {
        let RunnerEvent::GameOver { score, coins, .. } = *event else {
            return false;
        };
        self.shop.wallet_mut().deposit(coins);
        self.best_score = self.best_score.max(score);
        self.runs += 1;
        info!(score, coins, balance = self.balance(), "run credited");
        true
    }

    /// Apply every event from one `advance` call.
    pub fn record_all(&mut self, events: &[RunnerEvent]) {
        for event in events {
            self.record(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Lane, ObstacleKind, RunnerConfig, Session};
    use crate::shop::{ItemKind, ShopItem, Wallet, STARTING_BALANCE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quiet_session() -> Session<ChaCha8Rng> {
        let config = RunnerConfig {
            obstacle_interval_ms: 3_600_000,
            coin_interval_ms: 3_600_000,
            ..Default::default()
        };
        Session::with_rng(config, ChaCha8Rng::seed_from_u64(12345))
    }

    #[test]
    fn test_game_over_credits_coins_once() {
        let mut profile = Profile::default();
        let mut session = quiet_session();
        session.spawn_coin_in(Lane::Center);
        session.spawn_coin_in(Lane::Center);
        profile.record_all(&session.run_for(1500));
        assert_eq!(session.coins(), 2);
        assert_eq!(profile.balance(), STARTING_BALANCE, "nothing until the run ends");

        session.spawn_obstacle_in(Lane::Center, ObstacleKind::Train);
        profile.record_all(&session.run_for(2000));
        assert!(session.is_over());
        assert_eq!(profile.balance(), STARTING_BALANCE + 2);
        assert_eq!(profile.runs(), 1);
        assert_eq!(profile.best_score(), session.score());

        // A stopped session produces no further events.
        profile.record_all(&session.run_for(1000));
        assert_eq!(profile.balance(), STARTING_BALANCE + 2);
        assert_eq!(profile.runs(), 1);
    }

    #[test]
    fn test_abandoned_run_credits_nothing() {
        let mut profile = Profile::default();
        let mut session = quiet_session();
        session.spawn_coin_in(Lane::Center);
        profile.record_all(&session.run_for(1500));
        assert_eq!(session.coins(), 1);

        // Leaving for the home screen restarts the session without a game over.
        session.restart();
        profile.record_all(&session.run_for(500));

        assert_eq!(profile.balance(), STARTING_BALANCE);
        assert_eq!(profile.runs(), 0);
        assert_eq!(profile.best_score(), 0);
    }

    #[test]
    fn test_best_score_keeps_highest() {
        let mut profile = Profile::default();
        for (score, coins) in [(500, 1), (200, 3)] {
            assert!(profile.record(&RunnerEvent::GameOver {
                obstacle: 0,
                score,
                coins,
            }));
        }
        assert!(!profile.record(&RunnerEvent::JumpLanded));

        assert_eq!(profile.best_score(), 500);
        assert_eq!(profile.runs(), 2);
        assert_eq!(profile.balance(), STARTING_BALANCE + 4);
    }

    #[test]
    fn test_credited_coins_spendable() {
        let shop = Shop::new(
            vec![ShopItem::new("magnet", "Magnet", 105, ItemKind::PowerUp)],
            Wallet::new(100),
        );
        let mut profile = Profile::new(shop);
        assert!(matches!(
            profile.purchase("magnet"),
            Err(PurchaseError::InsufficientCoins { .. })
        ));

        profile.record(&RunnerEvent::GameOver {
            obstacle: 0,
            score: 10,
            coins: 5,
        });
        assert_eq!(profile.purchase("magnet"), Ok(0));
        assert!(profile.shop().items()[0].owned);
    }
}
