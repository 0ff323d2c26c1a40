use async_trait::async_trait;

/// The host messaging contact list. Gifts only go to contacts.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn is_contact(&self, user_id: u64, other_user_id: u64) -> anyhow::Result<bool>;
}
