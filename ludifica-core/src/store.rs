//! Narrow record-store views used by handlers that must also run against
//! stores other than Postgres.

use async_trait::async_trait;

use ludifica_database::Database;
use ludifica_database::impls::{avatars, players};
use ludifica_database::model::avatars::AvatarRecord;
use ludifica_database::model::players::PlayerProfile;

#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn find_by_nickname(&self, nickname: &str) -> anyhow::Result<Option<PlayerProfile>>;

    async fn get_player(&self, id: u64) -> anyhow::Result<Option<PlayerProfile>>;

    /// Returns `false` when the nickname was taken concurrently.
    async fn set_nickname(&self, id: u64, nickname: &str) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait AvatarStore: Send + Sync {
    async fn get_avatar(&self, id: u64) -> anyhow::Result<Option<AvatarRecord>>;
}

#[async_trait]
impl PlayerStore for Database {
    async fn find_by_nickname(&self, nickname: &str) -> anyhow::Result<Option<PlayerProfile>> {
        players::find_player_by_nickname(self, nickname).await
    }

    async fn get_player(&self, id: u64) -> anyhow::Result<Option<PlayerProfile>> {
        players::get_player(self, id).await
    }

    async fn set_nickname(&self, id: u64, nickname: &str) -> anyhow::Result<bool> {
        players::set_nickname(self, id, nickname).await
    }
}

#[async_trait]
impl AvatarStore for Database {
    async fn get_avatar(&self, id: u64) -> anyhow::Result<Option<AvatarRecord>> {
        avatars::get_avatar(self, id).await
    }
}
