pub mod core;
pub mod logging;
pub mod sweep;
pub mod table;
