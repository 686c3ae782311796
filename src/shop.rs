//! Coin wallet and shop purchase rules.
//!
//! Purchases go through two checks before any coins move: the item must not
//! already be owned, and the wallet must cover its price. Both failures are
//! ordinary validation results meant to be shown to the player.

use std::fmt;

/// Wallet balance a fresh profile starts with.
pub const STARTING_BALANCE: u64 = 1250;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Character,
    PowerUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub kind: ItemKind,
    pub owned: bool,
}

impl ShopItem {
    pub fn new(id: &str, name: &str, price: u64, kind: ItemKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            kind,
            owned: false,
        }
    }

    pub fn owned(mut self) -> Self {
        self.owned = true;
        self
    }
}

/// Coins available to spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallet {
    balance: u64,
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl Wallet {
    pub fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn deposit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    pub fn can_afford(&self, price: u64) -> bool {
        self.balance >= price
    }

    /// Remove `amount`, or leave the balance untouched and return `false`
    /// if it does not cover it.
    pub fn withdraw(&mut self, amount: u64) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.balance -= amount;
        true
    }
}

/// Why a purchase was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    UnknownItem(String),
    AlreadyOwned { name: String },
    InsufficientCoins { price: u64, balance: u64 },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem(id) => write!(f, "No item with id '{}'", id),
            Self::AlreadyOwned { name } => write!(f, "You already own {}!", name),
            Self::InsufficientCoins { price, balance } => write!(
                f,
                "You need {} more coins to buy this item.",
                price.saturating_sub(*balance)
            ),
        }
    }
}

impl std::error::Error for PurchaseError {}

#[derive(Debug, Clone, Default)]
pub struct Shop {
    items: Vec<ShopItem>,
    wallet: Wallet,
}

impl Shop {
    pub fn new(items: Vec<ShopItem>, wallet: Wallet) -> Self {
        Self { items, wallet }
    }

    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn wallet_mut(&mut self) -> &mut Wallet {
        &mut self.wallet
    }

    /// Validate a purchase without performing it.
    pub fn check_purchase(&self, id: &str) -> Result<&ShopItem, PurchaseError> {
        let item = self
            .items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| PurchaseError::UnknownItem(id.to_string()))?;

        if item.owned {
            return Err(PurchaseError::AlreadyOwned {
                name: item.name.clone(),
            });
        }
        if !self.wallet.can_afford(item.price) {
            return Err(PurchaseError::InsufficientCoins {
                price: item.price,
                balance: self.wallet.balance(),
            });
        }
        Ok(item)
    }

    /// Buy an item: debit its price and mark it owned. Returns the balance
    /// left afterwards.
    pub fn purchase(&mut self, id: &str) -> Result<u64, PurchaseError> {
        let price = self.check_purchase(id)?.price;
        if !self.wallet.withdraw(price) {
            return Err(PurchaseError::InsufficientCoins {
                price,
                balance: self.wallet.balance(),
            });
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.owned = true;
        }
        Ok(self.wallet.balance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_shop(balance: u64) -> Shop {
        Shop::new(
            vec![
                ShopItem::new("runner", "Runner", 0, ItemKind::Character).owned(),
                ShopItem::new("robot", "Robot", 1000, ItemKind::Character),
                ShopItem::new("magnet", "Magnet", 250, ItemKind::PowerUp),
            ],
            Wallet::new(balance),
        )
    }

    #[test]
    fn test_default_wallet_balance() {
        assert_eq!(Wallet::default().balance(), STARTING_BALANCE);
    }

    #[test]
    fn test_purchase_debits_and_marks_owned() {
        let mut shop = test_shop(1250);
        assert_eq!(shop.purchase("robot"), Ok(250));
        assert!(shop.items().iter().any(|i| i.id == "robot" && i.owned));
        assert_eq!(shop.wallet().balance(), 250);
    }

    #[test]
    fn test_already_owned_rejected() {
        let mut shop = test_shop(1250);
        let err = shop.purchase("runner").unwrap_err();
        assert_eq!(
            err,
            PurchaseError::AlreadyOwned {
                name: "Runner".to_string()
            }
        );
        assert_eq!(err.to_string(), "You already own Runner!");
        assert_eq!(shop.wallet().balance(), 1250);
    }

    #[test]
    fn test_insufficient_coins_rejected() {
        let mut shop = test_shop(200);
        let err = shop.purchase("magnet").unwrap_err();
        assert_eq!(
            err,
            PurchaseError::InsufficientCoins {
                price: 250,
                balance: 200
            }
        );
        assert_eq!(err.to_string(), "You need 50 more coins to buy this item.");
        assert_eq!(shop.wallet().balance(), 200);
    }

    #[test]
    fn test_owned_checked_before_price() {
        let mut shop = test_shop(0);
        shop.items[1].owned = true;
        assert!(matches!(
            shop.check_purchase("robot"),
            Err(PurchaseError::AlreadyOwned { .. })
        ));
    }

    #[test]
    fn test_second_purchase_rejected() {
        let mut shop = test_shop(1250);
        shop.purchase("magnet").unwrap();
        assert!(matches!(
            shop.purchase("magnet"),
            Err(PurchaseError::AlreadyOwned { .. })
        ));
        assert_eq!(shop.wallet().balance(), 1000);
    }

    #[test]
    fn test_unknown_item() {
        let shop = test_shop(1250);
        assert_eq!(
            shop.check_purchase("dragon"),
            Err(PurchaseError::UnknownItem("dragon".to_string()))
        );
    }

    #[test]
    fn test_wallet_deposit_and_withdraw() {
        let mut wallet = Wallet::new(10);
        wallet.deposit(5);
        assert_eq!(wallet.balance(), 15);
        assert!(!wallet.withdraw(20));
        assert_eq!(wallet.balance(), 15);
        assert!(wallet.withdraw(15));
        assert_eq!(wallet.balance(), 0);
    }
}
