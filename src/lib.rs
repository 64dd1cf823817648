pub mod calendar;
pub mod cmds;
pub mod config;
pub mod error;
pub mod events;
pub mod inspection;
pub mod report;
pub mod store;
pub mod ui;
