use serde::Serialize;
use tracing::info;

use crate::CallbackMeta;
use ludifica_core::identity::CAP_EDIT_OWN_PROFILE;
use ludifica_core::lang::{Lang, get_string, get_string_a};
use ludifica_core::store::PlayerStore;
use ludifica_core::{Error, Identity, Result};
use ludifica_utils::COMPONENT;
use ludifica_utils::formatting::escape_html;
use ludifica_utils::text::clean_notags;

pub const NICKNAME_ITEM_TYPE: &str = "nickname";
pub const NICKNAME_MAX_CHARS: usize = 31;

pub const META: CallbackMeta = CallbackMeta {
    name: "inplace_editable",
    desc: "Rename the acting user's player nickname inline.",
    category: "profile",
};

/// Field descriptor returned to the host after an inline edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InplaceEditable {
    pub component: &'static str,
    pub item_type: &'static str,
    pub item_id: u64,
    pub editable: bool,
    pub display_value: String,
    pub value: String,
    pub edit_label: String,
    pub edit_hint: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InplaceOutcome {
    Updated(InplaceEditable),
    /// The item type is not handled here; nothing was written.
    Unsupported,
}

/// Rename the player record `item_id` on behalf of `identity`.
pub async fn update_inplace(
    store: &dyn PlayerStore,
    identity: &Identity,
    lang: Lang,
    item_type: &str,
    item_id: u64,
    new_value: &str,
) -> Result<InplaceOutcome> {
    if item_type != NICKNAME_ITEM_TYPE {
        return Ok(InplaceOutcome::Unsupported);
    }

    let new_value = new_value.trim();

    if !new_value.is_empty()
        && let Some(holder) = store.find_by_nickname(new_value).await?
        && holder.user_id != identity.user_id
    {
        return Err(Error::Conflict("nicknameexists"));
    }

    let Some(record) = store.get_player(item_id).await? else {
        return Err(Error::NotFound("invalidrecord"));
    };

    if identity.is_guest || identity.user_id != record.user_id {
        return Err(Error::Forbidden("cannotchangeprofiletoother"));
    }

    identity.require_capability(CAP_EDIT_OWN_PROFILE)?;

    let nickname = clean_notags(new_value, NICKNAME_MAX_CHARS);
    if !store.set_nickname(record.id, &nickname).await? {
        return Err(Error::Conflict("nicknameexists"));
    }

    info!(player_id = record.id, user_id = record.user_id, "nickname updated");

    let shown = if nickname.is_empty() {
        identity.full_name.clone()
    } else {
        nickname
    };
    let display_value = escape_html(&shown);

    Ok(InplaceOutcome::Updated(InplaceEditable {
        component: COMPONENT,
        item_type: NICKNAME_ITEM_TYPE,
        item_id,
        editable: true,
        edit_label: get_string(lang, "edit"),
        edit_hint: get_string_a(lang, "newnickname", &display_value),
        display_value,
        value: shown,
    }))
}
