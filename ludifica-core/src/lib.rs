pub mod assets;
pub mod contacts;
pub mod error;
pub mod files;
pub mod identity;
pub mod lang;
pub mod profile_fields;
pub mod store;

use ludifica_database::Database;

pub use assets::{AssetResolver, SiteAssets};
pub use error::{Error, Result};
pub use identity::Identity;
pub use lang::Lang;

/// State shared by every handler: storage, asset URLs and the site language.
#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub assets: SiteAssets,
    pub lang: Lang,
}
