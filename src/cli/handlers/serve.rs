//! The `serve` subcommand.
//!
//! Only `--dry-run` does real work here. A plain serve resolves
//! immediately and main starts the server itself.

use crate::config::settings::Settings;
use crate::error::AppResult;

pub struct ServeCommand {
    settings: Settings,
}

impl ServeCommand {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            Ok(())
        }
    }

    /// Runs every check a real startup would run, including the JWT
    /// section that offline commands skip, and reports the result.
    fn validate_only(&self) -> AppResult<()> {
        self.settings.validate()?;
        self.settings.jwt.validate()?;

        println!("✓ Configuration checks passed");
        println!("✓ Would listen on {}", self.settings.server.address());
        println!("✓ Database URL present");
        println!("✓ JWT secret present");
        println!("✓ Logger settings accepted");
        println!("Dry run complete, the server would start");

        Ok(())
    }
}
