pub mod avatars;
pub mod badges;
pub mod instances;
pub mod leveling;
pub mod players;
pub mod points;
pub mod ranking;
pub mod settings;
pub mod tickets;
