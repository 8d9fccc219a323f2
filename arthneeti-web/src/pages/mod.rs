pub mod home;
pub mod leaderboard;
pub mod login;
pub mod market;
pub mod not_found;
pub mod play;
pub mod profile;
pub mod report;
