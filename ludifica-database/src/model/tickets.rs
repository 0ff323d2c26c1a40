use serde::{Deserialize, Serialize};

pub const DEFAULT_TICKET_TYPE: &str = "default";

/// A benefit users can buy with coins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Shared redemption code; empty means each purchase gets a random code.
    pub code: String,
    pub ticket_type: String,
    pub cost: u64,
    pub available: u64,
    /// Any unix second within the last UTC day on which the ticket can be bought.
    pub available_date: Option<u64>,
    /// Maximum copies a single user may hold. Zero means unlimited.
    pub by_user: u64,
    pub enabled: bool,
    pub info_data: String,
    pub created_at: u64,
}

pub struct NewTicket<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub code: &'a str,
    pub ticket_type: &'a str,
    pub cost: u64,
    pub available: u64,
    pub available_date: Option<u64>,
    pub by_user: u64,
    pub enabled: bool,
    pub info_data: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTicket {
    pub id: u64,
    pub ticket_id: u64,
    pub user_id: u64,
    pub code: String,
    pub gifted_by: Option<u64>,
    pub used_at: Option<u64>,
    pub created_at: u64,
}

/// Reasons a purchase is refused, in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseRefusal {
    NotFound,
    NotAvailable,
    DateExpired,
    LimitReached,
    InsufficientCoins,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Bought(UserTicket),
    Refused(PurchaseRefusal),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GiftRefusal {
    /// Not owned by the giver, already used, or already given away.
    NotAvailable,
    RecipientLimitReached,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GiftOutcome {
    Given(UserTicket),
    Refused(GiftRefusal),
}
