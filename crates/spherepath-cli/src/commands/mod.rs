// Subcommand handlers: `route`, `backup` and `shell`, one module each.

pub mod backup;
pub mod route;
pub mod shell;
