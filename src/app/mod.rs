pub mod command;
pub mod export;
pub mod page;
pub mod render;
