pub mod discord;
pub mod report;
pub mod template;
