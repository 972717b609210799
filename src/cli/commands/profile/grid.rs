use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::{arg, find_profile, parse_number},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    profiles::ProfileStore,
};

/// Command to resize a profile's grid
///
/// Sizes are clamped to the supported range and widgets outside the new
/// grid are pulled inside.
pub struct GridCommand {
    store: ProfileStore,
}

impl GridCommand {
    /// Creates a new GridCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for GridCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let id = arg(args, 0, "profile")?;
        let columns: u32 = parse_number(arg(args, 1, "columns")?, "columns")?;
        let rows: u32 = parse_number(arg(args, 2, "rows")?, "rows")?;

        if !self.store.set_grid_size(id, columns, rows) {
            return Err(CliError::ProfileNotFound { id: id.to_string() });
        }

        let profile = find_profile(&self.store, id)?;
        Ok(format!(
            "Grid of profile {id} is now {}x{}",
            profile.columns(),
            profile.rows()
        ))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "grid".to_string(),
            description: "Set the grid size of a profile".to_string(),
            category: "profile".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile to change", ArgType::ProfileId),
                CommandArg::required("columns", "Number of columns (2-12)", ArgType::Number),
                CommandArg::required("rows", "Number of rows (2-12)", ArgType::Number),
            ],
            examples: vec!["desktop-widgets profile grid default 12 8".to_string()],
        }
    }
}
