pub mod activity;
pub mod chosen;
pub mod filter;
pub mod notice;
pub mod settings;
