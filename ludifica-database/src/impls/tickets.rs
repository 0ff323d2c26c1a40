use anyhow::Context as _;
use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::database::Database;
use crate::impls::now_unix_secs;
use crate::impls::players::ensure_player_row;
use crate::model::tickets::{
    GiftOutcome, GiftRefusal, NewTicket, PurchaseOutcome, PurchaseRefusal, Ticket, UserTicket,
};

const GENERATED_CODE_LEN: usize = 10;
const SECONDS_PER_DAY: u64 = 86_400;

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    name: String,
    description: String,
    code: String,
    ticket_type: String,
    cost: i64,
    available: i64,
    available_date: Option<i64>,
    by_user: i64,
    enabled: bool,
    info_data: String,
    created_at: i64,
}

#[derive(sqlx::FromRow)]
struct UserTicketRow {
    id: i64,
    ticket_id: i64,
    user_id: i64,
    code: String,
    gifted_by: Option<i64>,
    used_at: Option<i64>,
    created_at: i64,
}

const TICKET_COLUMNS: &str = "id, name, description, code, ticket_type, cost, available, available_date, by_user, enabled, info_data, created_at";
const USER_TICKET_COLUMNS: &str = "id, ticket_id, user_id, code, gifted_by, used_at, created_at";

/// Decide whether `ticket` can be sold to a user holding `owned` copies and `coins` coins at `now`.
pub fn check_purchase(
    ticket: &Ticket,
    owned: u64,
    coins: u64,
    now: u64,
) -> Result<(), PurchaseRefusal> {
    if !ticket.enabled || ticket.available == 0 {
        return Err(PurchaseRefusal::NotAvailable);
    }

    // `available_date` names a day; any second of that UTC day still sells.
    if ticket
        .available_date
        .is_some_and(|last| now / SECONDS_PER_DAY > last / SECONDS_PER_DAY)
    {
        return Err(PurchaseRefusal::DateExpired);
    }

    if ticket.by_user > 0 && owned >= ticket.by_user {
        return Err(PurchaseRefusal::LimitReached);
    }

    if coins < ticket.cost {
        return Err(PurchaseRefusal::InsufficientCoins);
    }

    Ok(())
}

fn generate_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LEN)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase()
}

pub async fn create_ticket(db: &Database, ticket: NewTicket<'_>) -> anyhow::Result<Ticket> {
    let now = i64::try_from(now_unix_secs()).context("now out of i64 range")?;

    let row: TicketRow = sqlx::query_as(&format!(
        "INSERT INTO block_ludifica_tickets (
            name,
            description,
            code,
            ticket_type,
            cost,
            available,
            available_date,
            by_user,
            enabled,
            info_data,
            created_at
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING {TICKET_COLUMNS}"
    ))
    .bind(ticket.name)
    .bind(ticket.description)
    .bind(ticket.code.trim())
    .bind(ticket.ticket_type)
    .bind(i64::try_from(ticket.cost).context("cost out of i64 range")?)
    .bind(i64::try_from(ticket.available).context("available out of i64 range")?)
    .bind(
        ticket
            .available_date
            .map(i64::try_from)
            .transpose()
            .context("available_date out of i64 range")?,
    )
    .bind(i64::try_from(ticket.by_user).context("by_user out of i64 range")?)
    .bind(ticket.enabled)
    .bind(ticket.info_data)
    .bind(now)
    .fetch_one(db.pool())
    .await?;

    to_ticket(row)
}

pub async fn get_ticket(db: &Database, ticket_id: u64) -> anyhow::Result<Option<Ticket>> {
    let ticket_id_i64 = i64::try_from(ticket_id).context("ticket_id out of i64 range")?;

    let row: Option<TicketRow> = sqlx::query_as(&format!(
        "SELECT {TICKET_COLUMNS} FROM block_ludifica_tickets WHERE id = $1"
    ))
    .bind(ticket_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_ticket).transpose()
}

/// List tickets by name. With `enabled_only`, hides disabled and sold-out ones.
pub async fn list_tickets(db: &Database, enabled_only: bool) -> anyhow::Result<Vec<Ticket>> {
    let rows: Vec<TicketRow> = sqlx::query_as(&format!(
        "SELECT {TICKET_COLUMNS} FROM block_ludifica_tickets
         WHERE NOT $1 OR (enabled = TRUE AND available > 0)
         ORDER BY name ASC, id ASC"
    ))
    .bind(enabled_only)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(to_ticket).collect()
}

pub async fn set_ticket_enabled(db: &Database, ticket_id: u64, enabled: bool) -> anyhow::Result<bool> {
    let ticket_id_i64 = i64::try_from(ticket_id).context("ticket_id out of i64 range")?;

    let updated = sqlx::query("UPDATE block_ludifica_tickets SET enabled = $1 WHERE id = $2")
        .bind(enabled)
        .bind(ticket_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(updated > 0)
}

pub async fn delete_ticket(db: &Database, ticket_id: u64) -> anyhow::Result<bool> {
    let ticket_id_i64 = i64::try_from(ticket_id).context("ticket_id out of i64 range")?;

    let deleted = sqlx::query("DELETE FROM block_ludifica_tickets WHERE id = $1")
        .bind(ticket_id_i64)
        .execute(db.pool())
        .await?
        .rows_affected();

    Ok(deleted > 0)
}

pub async fn list_user_tickets(db: &Database, user_id: u64) -> anyhow::Result<Vec<UserTicket>> {
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let rows: Vec<UserTicketRow> = sqlx::query_as(&format!(
        "SELECT {USER_TICKET_COLUMNS} FROM block_ludifica_usertickets
         WHERE user_id = $1
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(to_user_ticket).collect()
}

/// Sell one copy of a ticket.
///
/// Locks the ticket row, then the buyer's player row, so concurrent buyers
/// cannot oversell the remaining availability or overdraw the buyer's coins.
pub async fn buy_ticket(
    db: &Database,
    ticket_id: u64,
    user_id: u64,
    now: u64,
) -> anyhow::Result<PurchaseOutcome> {
    let ticket_id_i64 = i64::try_from(ticket_id).context("ticket_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;

    let mut tx = db.begin().await?;
    ensure_player_row(&mut *tx, user_id_i64).await?;

    let row: Option<TicketRow> = sqlx::query_as(&format!(
        "SELECT {TICKET_COLUMNS} FROM block_ludifica_tickets WHERE id = $1 FOR UPDATE"
    ))
    .bind(ticket_id_i64)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(PurchaseOutcome::Refused(PurchaseRefusal::NotFound));
    };
    let ticket = to_ticket(row)?;

    let coins: i64 = sqlx::query_scalar(
        "SELECT coins FROM block_ludifica_general WHERE user_id = $1 FOR UPDATE",
    )
    .bind(user_id_i64)
    .fetch_one(&mut *tx)
    .await?;

    let owned: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM block_ludifica_usertickets WHERE ticket_id = $1 AND user_id = $2",
    )
    .bind(ticket_id_i64)
    .bind(user_id_i64)
    .fetch_one(&mut *tx)
    .await?;

    let coins = u64::try_from(coins).context("coins out of u64 range")?;
    let owned = u64::try_from(owned).context("owned count out of u64 range")?;

    if let Err(refusal) = check_purchase(&ticket, owned, coins, now) {
        tx.rollback().await?;
        return Ok(PurchaseOutcome::Refused(refusal));
    }

    let cost_i64 = i64::try_from(ticket.cost).context("cost out of i64 range")?;

    sqlx::query("UPDATE block_ludifica_tickets SET available = available - 1 WHERE id = $1")
        .bind(ticket_id_i64)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE block_ludifica_general SET coins = coins - $1 WHERE user_id = $2")
        .bind(cost_i64)
        .bind(user_id_i64)
        .execute(&mut *tx)
        .await?;

    let code = if ticket.code.is_empty() {
        generate_code()
    } else {
        ticket.code.clone()
    };

    let row: UserTicketRow = sqlx::query_as(&format!(
        "INSERT INTO block_ludifica_usertickets (ticket_id, user_id, code, created_at)
         VALUES ($1, $2, $3, $4)
         RETURNING {USER_TICKET_COLUMNS}"
    ))
    .bind(ticket_id_i64)
    .bind(user_id_i64)
    .bind(&code)
    .bind(now_i64)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(PurchaseOutcome::Bought(to_user_ticket(row)?))
}

/// Hand an unused ticket from `giver_id` to `recipient_id`.
///
/// Contact validation belongs to the caller; this only guards ownership and
/// the recipient's per-user limit. The ticket row is locked before counting,
/// which serializes gifts and purchases of the same ticket.
pub async fn give_ticket(
    db: &Database,
    user_ticket_id: u64,
    giver_id: u64,
    recipient_id: u64,
) -> anyhow::Result<GiftOutcome> {
    let user_ticket_id_i64 =
        i64::try_from(user_ticket_id).context("user_ticket_id out of i64 range")?;
    let giver_id_i64 = i64::try_from(giver_id).context("giver_id out of i64 range")?;
    let recipient_id_i64 = i64::try_from(recipient_id).context("recipient_id out of i64 range")?;

    let mut tx = db.begin().await?;

    let row: Option<UserTicketRow> = sqlx::query_as(&format!(
        "SELECT {USER_TICKET_COLUMNS} FROM block_ludifica_usertickets
         WHERE id = $1 AND user_id = $2 AND used_at IS NULL
         FOR UPDATE"
    ))
    .bind(user_ticket_id_i64)
    .bind(giver_id_i64)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
        tx.rollback().await?;
        return Ok(GiftOutcome::Refused(GiftRefusal::NotAvailable));
    };

    let by_user: i64 =
        sqlx::query_scalar("SELECT by_user FROM block_ludifica_tickets WHERE id = $1 FOR UPDATE")
            .bind(row.ticket_id)
            .fetch_one(&mut *tx)
            .await?;

    let held: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM block_ludifica_usertickets WHERE ticket_id = $1 AND user_id = $2",
    )
    .bind(row.ticket_id)
    .bind(recipient_id_i64)
    .fetch_one(&mut *tx)
    .await?;

    if by_user > 0 && held >= by_user {
        tx.rollback().await?;
        return Ok(GiftOutcome::Refused(GiftRefusal::RecipientLimitReached));
    }

    let row: UserTicketRow = sqlx::query_as(&format!(
        "UPDATE block_ludifica_usertickets
         SET user_id = $1, gifted_by = $2
         WHERE id = $3
         RETURNING {USER_TICKET_COLUMNS}"
    ))
    .bind(recipient_id_i64)
    .bind(giver_id_i64)
    .bind(user_ticket_id_i64)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(GiftOutcome::Given(to_user_ticket(row)?))
}

/// Mark an owned, unused ticket as used. Returns `false` when nothing matched.
pub async fn use_ticket(
    db: &Database,
    user_ticket_id: u64,
    user_id: u64,
    now: u64,
) -> anyhow::Result<bool> {
    let user_ticket_id_i64 =
        i64::try_from(user_ticket_id).context("user_ticket_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;

    let updated = sqlx::query(
        "UPDATE block_ludifica_usertickets
         SET used_at = $1
         WHERE id = $2 AND user_id = $3 AND used_at IS NULL",
    )
    .bind(now_i64)
    .bind(user_ticket_id_i64)
    .bind(user_id_i64)
    .execute(db.pool())
    .await?
    .rows_affected();

    Ok(updated > 0)
}

fn to_ticket(row: TicketRow) -> anyhow::Result<Ticket> {
    Ok(Ticket {
        id: u64::try_from(row.id).context("id row out of u64 range")?,
        name: row.name,
        description: row.description,
        code: row.code,
        ticket_type: row.ticket_type,
        cost: u64::try_from(row.cost).context("cost row out of u64 range")?,
        available: u64::try_from(row.available).context("available row out of u64 range")?,
        available_date: row
            .available_date
            .map(u64::try_from)
            .transpose()
            .context("available_date row out of u64 range")?,
        by_user: u64::try_from(row.by_user).context("by_user row out of u64 range")?,
        enabled: row.enabled,
        info_data: row.info_data,
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
    })
}

fn to_user_ticket(row: UserTicketRow) -> anyhow::Result<UserTicket> {
    Ok(UserTicket {
        id: u64::try_from(row.id).context("id row out of u64 range")?,
        ticket_id: u64::try_from(row.ticket_id).context("ticket_id row out of u64 range")?,
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        code: row.code,
        gifted_by: row
            .gifted_by
            .map(u64::try_from)
            .transpose()
            .context("gifted_by row out of u64 range")?,
        used_at: row
            .used_at
            .map(u64::try_from)
            .transpose()
            .context("used_at row out of u64 range")?,
        created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
    })
}
