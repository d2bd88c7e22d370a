pub mod activity_store;
pub mod filter_parser;
