use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::{arg, ensure_widget, parse_number},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    layout::AnchorSpec,
    profiles::{PositionUpdate, ProfileStore},
};

/// Command to change where a widget is placed
///
/// Accepts `col=`, `row=`, `x=`, `y=` and `anchor=` fields; fields not
/// given keep their stored value.
pub struct MoveCommand {
    store: ProfileStore,
}

impl MoveCommand {
    /// Creates a new MoveCommand
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    fn parse_update(fields: &[String]) -> Result<PositionUpdate, CliError> {
        let mut update = PositionUpdate::default();

        for field in fields {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                CliError::InvalidArguments(format!("Expected key=value, got '{field}'"))
            })?;

            match key.trim() {
                "col" => update.grid_col = Some(parse_number(value, "col")?),
                "row" => update.grid_row = Some(parse_number(value, "row")?),
                "x" => update.x = Some(parse_number(value, "x")?),
                "y" => update.y = Some(parse_number(value, "y")?),
                "anchor" => update.anchor = Some(AnchorSpec::from(value.trim())),
                other => {
                    return Err(CliError::InvalidArguments(format!(
                        "Unknown position field '{other}' (expected col, row, x, y or anchor)"
                    )));
                }
            }
        }

        Ok(update)
    }
}

#[async_trait]
impl Command for MoveCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let profile = arg(args, 0, "profile")?;
        let uuid = arg(args, 1, "uuid")?;
        let update = Self::parse_update(args.get(2..).unwrap_or(&[]))?;

        ensure_widget(&self.store, profile, uuid)?;
        self.store.update_widget_position(profile, uuid, &update);

        Ok(format!("Moved widget {uuid}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "move".to_string(),
            description: "Change the position or anchor of a widget".to_string(),
            category: "widget".to_string(),
            args: vec![
                CommandArg::required("profile", "Profile holding the widget", ArgType::ProfileId),
                CommandArg::required("uuid", "Widget to move", ArgType::WidgetId),
                CommandArg::required("field", "col, row, x, y or anchor", ArgType::KeyValue)
                    .repeated(),
            ],
            examples: vec![
                "desktop-widgets widget move default <uuid> col=1 row=0.5".to_string(),
                "desktop-widgets widget move default <uuid> x=40 y=40 anchor=top-left".to_string(),
            ],
        }
    }
}
