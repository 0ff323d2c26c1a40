use std::collections::HashMap;

use async_trait::async_trait;

/// Host user profile data used by the field rankings.
///
/// Field names are the host's: standard ones (`city`, `country`,
/// `institution`, ...) or custom ones prefixed with `profile_field_`.
#[async_trait]
pub trait ProfileFieldDirectory: Send + Sync {
    /// Value of `field` for each of `user_ids`. Users without a value are left out.
    async fn field_values(
        &self,
        field: &str,
        user_ids: &[u64],
    ) -> anyhow::Result<HashMap<u64, String>>;
}
