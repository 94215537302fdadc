pub mod browser;
pub mod collection;
pub mod config;
pub mod item;
pub mod output;
pub mod preview;
pub mod rating;
pub mod saver;
pub mod transfer;
