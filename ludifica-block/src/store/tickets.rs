use tracing::info;

use super::{check_recipient, require_player};
use ludifica_core::contacts::ContactDirectory;
use ludifica_core::{Error, Identity, Result};
use ludifica_database::Database;
use ludifica_database::impls::tickets;
use ludifica_database::model::tickets::{
    GiftOutcome, GiftRefusal, PurchaseOutcome, PurchaseRefusal, Ticket, UserTicket,
};

pub fn purchase_error(refusal: PurchaseRefusal) -> Error {
    match refusal {
        PurchaseRefusal::NotFound => Error::NotFound("errornotticketdata"),
        PurchaseRefusal::NotAvailable => Error::Validation("notavailable"),
        PurchaseRefusal::DateExpired => Error::Validation("notavailabledate"),
        PurchaseRefusal::LimitReached => Error::Conflict("maxtickets"),
        PurchaseRefusal::InsufficientCoins => Error::Validation("notcostcompliance"),
    }
}

pub fn gift_error(refusal: GiftRefusal) -> Error {
    match refusal {
        GiftRefusal::NotAvailable => Error::Conflict("ticketnotavailable"),
        GiftRefusal::RecipientLimitReached => Error::Conflict("maxtickets"),
    }
}

/// Tickets currently offered in the store.
pub async fn catalog(db: &Database) -> Result<Vec<Ticket>> {
    Ok(tickets::list_tickets(db, true).await?)
}

pub async fn owned(db: &Database, identity: &Identity) -> Result<Vec<UserTicket>> {
    require_player(identity)?;
    Ok(tickets::list_user_tickets(db, identity.user_id).await?)
}

pub async fn buy(db: &Database, identity: &Identity, ticket_id: u64, now: u64) -> Result<UserTicket> {
    require_player(identity)?;

    match tickets::buy_ticket(db, ticket_id, identity.user_id, now).await? {
        PurchaseOutcome::Bought(user_ticket) => {
            info!(
                user_id = identity.user_id,
                ticket_id,
                user_ticket_id = user_ticket.id,
                "ticket bought"
            );
            Ok(user_ticket)
        }
        PurchaseOutcome::Refused(refusal) => Err(purchase_error(refusal)),
    }
}

pub async fn give(
    db: &Database,
    contacts: &dyn ContactDirectory,
    identity: &Identity,
    user_ticket_id: u64,
    recipient_id: u64,
) -> Result<UserTicket> {
    require_player(identity)?;
    check_recipient(contacts, identity, recipient_id).await?;

    match tickets::give_ticket(db, user_ticket_id, identity.user_id, recipient_id).await? {
        GiftOutcome::Given(user_ticket) => {
            info!(
                giver_id = identity.user_id,
                recipient_id,
                user_ticket_id,
                "ticket given"
            );
            Ok(user_ticket)
        }
        GiftOutcome::Refused(refusal) => Err(gift_error(refusal)),
    }
}

/// Redeem an owned ticket.
pub async fn redeem(db: &Database, identity: &Identity, user_ticket_id: u64, now: u64) -> Result<()> {
    require_player(identity)?;

    if !tickets::use_ticket(db, user_ticket_id, identity.user_id, now).await? {
        return Err(Error::Conflict("ticketnotavailable"));
    }

    info!(user_id = identity.user_id, user_ticket_id, "ticket used");
    Ok(())
}
