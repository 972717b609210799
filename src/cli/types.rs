use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
///
/// Each variant carries enough context to be shown to the user as-is.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid arguments were provided to a command.
    ///
    /// Returned when argument validation fails: missing required
    /// arguments, too many arguments, or values that cannot be parsed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// No profile has the given id.
    #[error("Profile not found: '{id}'")]
    ProfileNotFound {
        /// Requested profile id
        id: String,
    },

    /// The profile has no widget with the given uuid.
    #[error("Widget '{uuid}' not found in profile '{profile}'")]
    WidgetNotFound {
        /// Profile searched
        profile: String,
        /// Requested widget uuid
        uuid: String,
    },

    /// No plugin provides the given widget type.
    #[error("Unknown widget type: '{widget_type}'")]
    PluginNotFound {
        /// Requested type id
        widget_type: String,
    },

    /// A backing service failed.
    #[error("{service} error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// Error details
        details: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Type alias for command execution results.
///
/// Commands return their output text on success.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "profile", "uuid").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument, shown in help text.
    pub value_type: ArgType,

    /// Whether the argument may be given more than once. Only the last
    /// argument of a command may repeat.
    pub repeated: bool,
}

impl CommandArg {
    /// Required argument.
    pub fn required(name: &str, description: &str, value_type: ArgType) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            value_type,
            repeated: false,
        }
    }

    /// Optional argument.
    pub fn optional(name: &str, description: &str, value_type: ArgType) -> Self {
        Self {
            required: false,
            ..Self::required(name, description, value_type)
        }
    }

    /// Marks the argument as repeatable.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// Type classification for command arguments.
#[derive(Debug, Clone)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A numeric value (integer or float).
    Number,

    /// A profile id.
    ProfileId,

    /// A widget uuid.
    WidgetId,

    /// A JSON document.
    Json,

    /// A `key=value` pair.
    KeyValue,
}

impl ArgType {
    /// Short hint shown next to the argument name.
    pub fn hint(&self) -> &'static str {
        match self {
            ArgType::String => "text",
            ArgType::Number => "number",
            ArgType::ProfileId => "profile id",
            ArgType::WidgetId => "widget uuid",
            ArgType::Json => "json",
            ArgType::KeyValue => "key=value",
        }
    }
}

/// Complete metadata for a CLI command.
///
/// Used for help generation, argument validation and command discovery.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "list", "add").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "profile", "widget").
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// The registry has already checked the argument count against the
    /// command's metadata; the command parses the values.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for unparsable arguments, unknown profiles,
    /// widgets or plugins, and failing services.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
