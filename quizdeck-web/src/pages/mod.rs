pub mod boot;
pub mod history;
pub mod not_found;
pub mod player_name;
pub mod question;
pub mod result;
pub mod selection;
pub mod trophies;
