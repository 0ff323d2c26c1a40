use tracing::info;

use super::require_player;
use ludifica_core::{Error, Identity, Result};
use ludifica_database::Database;
use ludifica_database::impls::avatars;
use ludifica_database::model::avatars::{AvatarPurchaseOutcome, AvatarRecord};

/// Enabled avatars with a flag telling whether the user already owns each one.
pub async fn gallery(db: &Database, identity: &Identity) -> Result<Vec<(AvatarRecord, bool)>> {
    let catalog = avatars::list_avatars(db, true).await?;
    let owned = if identity.is_logged_in() {
        avatars::list_user_avatar_ids(db, identity.user_id).await?
    } else {
        Vec::new()
    };

    Ok(catalog
        .into_iter()
        .map(|avatar| {
            let is_owned = avatar.cost == 0 || owned.contains(&avatar.id);
            (avatar, is_owned)
        })
        .collect())
}

/// Buy an avatar. Returns the coins left.
pub async fn buy(db: &Database, identity: &Identity, avatar_id: u64) -> Result<u64> {
    require_player(identity)?;

    match avatars::buy_avatar(db, avatar_id, identity.user_id).await? {
        AvatarPurchaseOutcome::Bought { coins_left } => {
            info!(user_id = identity.user_id, avatar_id, coins_left, "avatar bought");
            Ok(coins_left)
        }
        AvatarPurchaseOutcome::AlreadyOwned => Err(Error::Conflict("avatarowned")),
        AvatarPurchaseOutcome::NotAvailable => Err(Error::NotFound("errornotavatardata")),
        AvatarPurchaseOutcome::InsufficientCoins => Err(Error::Validation("insufficientcoins")),
    }
}

/// Make `avatar_id` the user's current avatar. Free avatars need no purchase.
pub async fn wear(db: &Database, identity: &Identity, avatar_id: u64) -> Result<()> {
    require_player(identity)?;

    if !avatars::use_avatar(db, avatar_id, identity.user_id).await? {
        return Err(Error::Forbidden("avatarnotuse"));
    }

    info!(user_id = identity.user_id, avatar_id, "avatar assigned");
    Ok(())
}
