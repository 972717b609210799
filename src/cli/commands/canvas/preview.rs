use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    canvas::{Canvas, HeadlessSurface, Placement},
    cli::{
        CliError, Command, CommandResult,
        commands::utils::parse_number,
        formatting::{format_header, format_point, format_size},
        types::{ArgType, CommandArg, CommandMetadata},
    },
    layout::Size,
    plugins::PluginCatalog,
    profiles::ProfileStore,
};

const PLACEMENT_TIMEOUT: Duration = Duration::from_secs(1);

/// Command to render the active profile without a display
///
/// Widgets are laid out on a headless surface and their measured sizes
/// and final positions are printed.
pub struct PreviewCommand {
    store: ProfileStore,
    catalog: Arc<PluginCatalog>,
    screen: Size,
}

impl PreviewCommand {
    /// Creates a new PreviewCommand rendering on a `screen`-sized area
    /// unless told otherwise.
    pub fn new(store: ProfileStore, catalog: Arc<PluginCatalog>, screen: Size) -> Self {
        Self {
            store,
            catalog,
            screen,
        }
    }

    fn parse_screen(value: &str) -> Result<Size, CliError> {
        let (width, height) = value.split_once(['x', 'X']).ok_or_else(|| {
            CliError::InvalidArguments(format!("Expected WIDTHxHEIGHT, got '{value}'"))
        })?;
        let size = Size::new(
            parse_number(width, "width")?,
            parse_number(height, "height")?,
        );

        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(CliError::InvalidArguments(format!(
                "Screen size must be positive, got '{value}'"
            )));
        }
        Ok(size)
    }

    async fn wait_for_placements(surface: &HeadlessSurface) -> Vec<Placement> {
        let placed = async {
            loop {
                let placements = surface.placements();
                if placements.iter().all(|p| p.position.is_some()) {
                    return placements;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };

        match tokio::time::timeout(PLACEMENT_TIMEOUT, placed).await {
            Ok(placements) => placements,
            Err(_) => surface.placements(),
        }
    }
}

#[async_trait]
impl Command for PreviewCommand {
    async fn execute(&self, args: &[String]) -> CommandResult {
        let screen = match args.first() {
            Some(value) => Self::parse_screen(value)?,
            None => self.screen,
        };
        let (id, profile) = self
            .store
            .active_profile()
            .ok_or_else(|| CliError::InvalidArguments("No active profile".to_string()))?;

        let surface = Arc::new(HeadlessSurface::new(screen));
        let canvas = Canvas::new(self.store.clone(), self.catalog.clone(), surface.clone());
        canvas.render().await;

        let placements = Self::wait_for_placements(&surface).await;
        let state = canvas.state().get();
        canvas.detach();

        let mut output = format!(
            "{} on {}, {} mode, {}\n\n",
            format_header(&format!("Profile '{}' ({id})", profile.name)),
            format_size(screen),
            profile.mode(),
            state
        );

        if placements.is_empty() {
            output.push_str("  (no widgets rendered)");
            return Ok(output);
        }

        for placement in placements {
            let position = placement
                .position
                .map_or_else(|| "(unplaced)".to_string(), format_point);
            output.push_str(&format!(
                "  {} {:<12} {:<16} {:<9} {}\n",
                placement.uuid,
                placement.widget_type,
                position,
                format_size(placement.size),
                placement.text.replace('\n', " / ")
            ));
        }

        Ok(output.trim_end().to_string())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "preview".to_string(),
            description: "Lay out the active profile and print widget positions".to_string(),
            category: "canvas".to_string(),
            args: vec![CommandArg::optional(
                "screen",
                "Screen size as WIDTHxHEIGHT (default from config)",
                ArgType::String,
            )],
            examples: vec![
                "desktop-widgets canvas preview".to_string(),
                "desktop-widgets canvas preview 2560x1440".to_string(),
            ],
        }
    }
}
