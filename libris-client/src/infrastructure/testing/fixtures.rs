//! Sample catalog and accounts
//!
//! Seeds offline mode and the integration tests.

use libris_model::{MediaId, MediaItem, MediaType, Rank};

/// A sign-in the stub gateway accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub id: u32,
    pub password: String,
    pub name: String,
    pub rank: Rank,
}

impl DemoAccount {
    pub fn new(
        id: u32,
        password: impl Into<String>,
        name: impl Into<String>,
        rank: Rank,
    ) -> Self {
        Self {
            id,
            password: password.into(),
            name: name.into(),
            rank,
        }
    }
}

/// One account per rank above `None`, ids 1..=5
pub fn sample_accounts() -> Vec<DemoAccount> {
    vec![
        DemoAccount::new(1, "basic", "Bea Basic", Rank::Basic),
        DemoAccount::new(2, "user", "Uma User", Rank::User),
        DemoAccount::new(3, "manager", "Max Manager", Rank::Manager),
        DemoAccount::new(4, "admin", "Ada Admin", Rank::Admin),
        DemoAccount::new(5, "dev", "Dev Null", Rank::Dev),
    ]
}

pub fn sample_catalog() -> Vec<MediaItem> {
    let item = |id, kind, name: &str, borrowable, vendor: &str, renter: &str| {
        MediaItem::new(MediaId(id), kind, name, borrowable, vendor, renter)
    };
    vec![
        item(1001, MediaType::Book, "Dune", true, "Ace Books", ""),
        item(1002, MediaType::Book, "Neuromancer", false, "Ace Books", "Case"),
        item(1003, MediaType::Movie, "Alien", true, "20th Century Fox", ""),
        item(1004, MediaType::Music, "Kind of Blue", true, "Columbia", ""),
        item(1005, MediaType::VideoGame, "Sonic Unleashed", true, "Sega", ""),
        item(1006, MediaType::VideoGame, "Doom", false, "id Software", "Flynn"),
        item(1007, MediaType::Movie, "Blade Runner", true, "Warner Bros.", ""),
        item(1008, MediaType::Book, "Dracula", true, "Archibald Constable", ""),
    ]
}
