use tracing::info;

use super::{check_recipient, require_player};
use ludifica_core::contacts::ContactDirectory;
use ludifica_core::{Error, Identity, Result};
use ludifica_database::Database;
use ludifica_database::impls::players::transfer_coins;
use ludifica_database::model::players::CoinTransferOutcome;

/// Send `amount` coins to a contact. Returns the giver's remaining coins.
pub async fn give(
    db: &Database,
    contacts: &dyn ContactDirectory,
    identity: &Identity,
    recipient_id: u64,
    amount: u64,
) -> Result<u64> {
    require_player(identity)?;

    if amount == 0 {
        return Err(Error::Validation("invalidamount"));
    }

    check_recipient(contacts, identity, recipient_id).await?;

    match transfer_coins(db, identity.user_id, recipient_id, amount).await? {
        CoinTransferOutcome::Transferred { sender_coins } => {
            info!(
                giver_id = identity.user_id,
                recipient_id,
                amount,
                "coins given"
            );
            Ok(sender_coins)
        }
        CoinTransferOutcome::InsufficientCoins => Err(Error::Validation("insufficientcoins")),
    }
}
