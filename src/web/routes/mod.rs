pub mod activities;
pub mod users;
