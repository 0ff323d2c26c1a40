//! Spending coins: tickets, avatars and gifts between contacts.

pub mod avatars;
pub mod coins;
pub mod tickets;

use ludifica_core::contacts::ContactDirectory;
use ludifica_core::{Error, Identity, Result};

/// Gifts go only to someone else on the giver's contact list.
pub(crate) async fn check_recipient(
    contacts: &dyn ContactDirectory,
    giver: &Identity,
    recipient_id: u64,
) -> Result<()> {
    if recipient_id == 0 || recipient_id == giver.user_id {
        return Err(Error::Validation("invalidusercontact"));
    }

    if !contacts.is_contact(giver.user_id, recipient_id).await? {
        return Err(Error::Validation("invalidusercontact"));
    }

    Ok(())
}

/// Store actions need a real, non-guest account.
pub(crate) fn require_player(identity: &Identity) -> Result<()> {
    identity.require_login()?;
    if identity.is_guest {
        return Err(Error::Forbidden("nopermissions"));
    }
    Ok(())
}
