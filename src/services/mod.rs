pub mod data_stores;
pub mod team_roster_manager;

pub use team_roster_manager::TeamRosterManager;
