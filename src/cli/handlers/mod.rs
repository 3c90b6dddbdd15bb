//! One handler per subcommand, kept apart from parsing and dispatch.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommand;
pub use serve::ServeCommand;
