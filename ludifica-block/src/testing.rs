//! In-memory collaborators for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::pluginfile::path_hash;
use ludifica_core::contacts::ContactDirectory;
use ludifica_core::files::{FileStore, StoredFile};
use ludifica_core::profile_fields::ProfileFieldDirectory;
use ludifica_core::store::{AvatarStore, PlayerStore};
use ludifica_database::model::avatars::AvatarRecord;
use ludifica_database::model::players::PlayerProfile;
use ludifica_utils::COMPONENT;

pub(crate) fn player(id: u64, user_id: u64, nickname: &str) -> PlayerProfile {
    PlayerProfile {
        id,
        user_id,
        nickname: nickname.to_owned(),
        points: 0,
        coins: 0,
        avatar_id: None,
        streak_day: 0,
        streak_days: 0,
        created_at: 0,
    }
}

pub(crate) fn avatar_record(id: u64, name: &str, sources: &str) -> AvatarRecord {
    AvatarRecord {
        id,
        name: name.to_owned(),
        description: String::new(),
        avatar_type: "normal".to_owned(),
        sources: sources.to_owned(),
        cost: 0,
        enabled: true,
        created_at: 0,
    }
}

pub(crate) fn bust_file(item_id: u64, file_name: &str, is_directory: bool) -> StoredFile {
    StoredFile {
        context_id: 1,
        component: COMPONENT.to_owned(),
        file_area: "avatarbust".to_owned(),
        item_id,
        file_path: "/".to_owned(),
        file_name: file_name.to_owned(),
        is_directory,
        mime_type: "image/png".to_owned(),
        size: 0,
    }
}

#[derive(Default)]
pub(crate) struct MemoryPlayers {
    players: Mutex<Vec<PlayerProfile>>,
    writes: AtomicUsize,
    reject_next: AtomicBool,
}

impl MemoryPlayers {
    pub(crate) fn with(players: Vec<PlayerProfile>) -> Self {
        Self {
            players: Mutex::new(players),
            ..Self::default()
        }
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn reject_next_write(&self) {
        self.reject_next.store(true, Ordering::SeqCst);
    }

    pub(crate) fn nickname_of(&self, id: u64) -> Option<String> {
        let players = self.players.lock().unwrap();
        players.iter().find(|p| p.id == id).map(|p| p.nickname.clone())
    }
}

#[async_trait]
impl PlayerStore for MemoryPlayers {
    async fn find_by_nickname(&self, nickname: &str) -> anyhow::Result<Option<PlayerProfile>> {
        let players = self.players.lock().unwrap();
        Ok(players.iter().find(|p| p.nickname == nickname).cloned())
    }

    async fn get_player(&self, id: u64) -> anyhow::Result<Option<PlayerProfile>> {
        let players = self.players.lock().unwrap();
        Ok(players.iter().find(|p| p.id == id).cloned())
    }

    async fn set_nickname(&self, id: u64, nickname: &str) -> anyhow::Result<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.reject_next.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }

        let mut players = self.players.lock().unwrap();
        let taken = !nickname.is_empty()
            && players.iter().any(|p| p.id != id && p.nickname == nickname);
        if taken {
            return Ok(false);
        }
        if let Some(player) = players.iter_mut().find(|p| p.id == id) {
            player.nickname = nickname.to_owned();
        }
        Ok(true)
    }
}

#[derive(Default)]
pub(crate) struct MemoryAvatars(Vec<AvatarRecord>);

impl MemoryAvatars {
    pub(crate) fn with(avatars: Vec<AvatarRecord>) -> Self {
        Self(avatars)
    }
}

#[async_trait]
impl AvatarStore for MemoryAvatars {
    async fn get_avatar(&self, id: u64) -> anyhow::Result<Option<AvatarRecord>> {
        Ok(self.0.iter().find(|a| a.id == id).cloned())
    }
}

/// Files whose content is their own name.
#[derive(Default)]
pub(crate) struct MemoryFiles(Vec<StoredFile>);

impl MemoryFiles {
    pub(crate) fn with(files: Vec<StoredFile>) -> Self {
        Self(files)
    }
}

#[async_trait]
impl FileStore for MemoryFiles {
    async fn area_files(
        &self,
        context_id: u64,
        component: &str,
        file_area: &str,
        item_id: u64,
    ) -> anyhow::Result<Vec<StoredFile>> {
        Ok(self
            .0
            .iter()
            .filter(|f| {
                f.context_id == context_id
                    && f.component == component
                    && f.file_area == file_area
                    && f.item_id == item_id
            })
            .cloned()
            .collect())
    }

    async fn file_by_hash(&self, hash: &str) -> anyhow::Result<Option<StoredFile>> {
        Ok(self
            .0
            .iter()
            .find(|f| path_hash(&f.pathname()) == hash)
            .cloned())
    }

    async fn read(&self, file: &StoredFile) -> anyhow::Result<Vec<u8>> {
        Ok(file.file_name.as_bytes().to_vec())
    }
}

#[derive(Default)]
pub(crate) struct MemoryContacts(Vec<(u64, u64)>);

impl MemoryContacts {
    pub(crate) fn with(pairs: Vec<(u64, u64)>) -> Self {
        Self(pairs)
    }
}

#[async_trait]
impl ContactDirectory for MemoryContacts {
    async fn is_contact(&self, user_id: u64, other_user_id: u64) -> anyhow::Result<bool> {
        Ok(self
            .0
            .iter()
            .any(|&(a, b)| (a, b) == (user_id, other_user_id) || (b, a) == (user_id, other_user_id)))
    }
}

/// `(field, user id, value)` triples.
pub(crate) struct MemoryProfileFields(Vec<(String, u64, String)>);

impl MemoryProfileFields {
    pub(crate) fn with(entries: Vec<(&str, u64, &str)>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(field, user_id, value)| (field.to_owned(), user_id, value.to_owned()))
                .collect(),
        )
    }
}

#[async_trait]
impl ProfileFieldDirectory for MemoryProfileFields {
    async fn field_values(
        &self,
        field: &str,
        user_ids: &[u64],
    ) -> anyhow::Result<HashMap<u64, String>> {
        Ok(self
            .0
            .iter()
            .filter(|(name, user_id, _)| name == field && user_ids.contains(user_id))
            .map(|(_, user_id, value)| (*user_id, value.clone()))
            .collect())
    }
}
