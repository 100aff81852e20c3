//! Plugin command surface.
//!
//! The host registers two menu commands ("Load file" and "Produce file") and
//! calls the default entry point with no argument, which produces a file.
//! Dialogs and messages go through [`HostUi`], so the commands run the same
//! way against a real host or a scripted one.

use std::fmt;
use std::path::PathBuf;

use spst_format::header::FILE_FILTER;
use spst_format::{SpstReaderOptions, SpstWriterOptions};
use tracing::{error, info};

use crate::database::StructureDatabase;
use crate::error::Result;
use crate::snapshot::{ExportReport, ImportReport, export_structures, import_structures};

/// Name the plugin registers under.
pub const PLUGIN_NAME: &str = "SymbolParser";

/// Menu label shared by both commands.
pub const MENU_LABEL: &str = "SymbolParser struct info";

/// Menu path of the load command.
pub const LOAD_MENU_PATH: &str = "File/Load file/";

/// Menu path of the produce command.
pub const PRODUCE_MENU_PATH: &str = "File/Produce file/";

/// Whether a file dialog picks an existing file or a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    Open,
    Save,
}

/// Commands the plugin registers with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandId {
    /// Restore structures from a snapshot.
    LoadFile,
    /// Capture structures into a snapshot.
    ProduceFile,
}

impl CommandId {
    /// Menu path the command is registered under.
    #[must_use]
    pub const fn menu_path(self) -> &'static str {
        match self {
            Self::LoadFile => LOAD_MENU_PATH,
            Self::ProduceFile => PRODUCE_MENU_PATH,
        }
    }

    /// Dialog mode used to choose the file.
    #[must_use]
    pub const fn path_mode(self) -> PathMode {
        match self {
            Self::LoadFile => PathMode::Open,
            Self::ProduceFile => PathMode::Save,
        }
    }

    /// Prompt shown in the file dialog.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::LoadFile => "Open a file exported with the SymbolParser plugin.",
            Self::ProduceFile => "Export a file with the SymbolParser plugin.",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFile => write!(f, "load"),
            Self::ProduceFile => write!(f, "produce"),
        }
    }
}

/// UI services the host provides to the plugin.
pub trait HostUi {
    /// Ask the user for a path; `None` when the dialog was cancelled.
    fn prompt_for_path(&mut self, mode: PathMode, filter: &str, prompt: &str) -> Option<PathBuf>;

    /// Add a menu entry that triggers `command`.
    fn register_command(&mut self, menu_path: &str, label: &str, command: CommandId);

    /// Show a diagnostic message.
    fn message(&mut self, text: &str);
}

/// Result of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exported(ExportReport),
    Imported(ImportReport),
    /// The user dismissed the file dialog.
    Cancelled,
}

/// Snapshot plugin: command registration and dispatch.
#[derive(Debug, Clone, Default)]
pub struct Plugin {
    reader_options: SpstReaderOptions,
    writer_options: SpstWriterOptions,
}

impl Plugin {
    /// Create a plugin with default reader and writer options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the options used by the load command.
    #[must_use]
    pub fn with_reader_options(mut self, options: SpstReaderOptions) -> Self {
        self.reader_options = options;
        self
    }

    /// Set the options used by the produce command.
    #[must_use]
    pub fn with_writer_options(mut self, options: SpstWriterOptions) -> Self {
        self.writer_options = options;
        self
    }

    /// Register both menu commands with the host.
    pub fn init(&self, ui: &mut dyn HostUi) {
        for command in [CommandId::LoadFile, CommandId::ProduceFile] {
            ui.register_command(command.menu_path(), MENU_LABEL, command);
        }
        info!(plugin = PLUGIN_NAME, "registered menu commands");
    }

    /// Default entry point: same as "Produce file".
    pub fn run(&self, db: &mut dyn StructureDatabase, ui: &mut dyn HostUi) -> Result<Outcome> {
        self.invoke(CommandId::ProduceFile, db, ui)
    }

    /// Prompt for a path and run `command`.
    ///
    /// Success and failure are both reported through [`HostUi::message`];
    /// errors are also returned to the caller.
    pub fn invoke(
        &self,
        command: CommandId,
        db: &mut dyn StructureDatabase,
        ui: &mut dyn HostUi,
    ) -> Result<Outcome> {
        let Some(path) = ui.prompt_for_path(command.path_mode(), FILE_FILTER, command.prompt())
        else {
            info!(%command, "file dialog cancelled");
            return Ok(Outcome::Cancelled);
        };

        let result = match command {
            CommandId::ProduceFile => {
                export_structures(db, &path, &self.writer_options).map(Outcome::Exported)
            }
            CommandId::LoadFile => {
                import_structures(db, &path, &self.reader_options).map(Outcome::Imported)
            }
        };

        match &result {
            Ok(outcome) => ui.message(&success_message(outcome)),
            Err(err) => {
                error!(%command, path = %path.display(), error = %err, "command failed");
                ui.message(&format!(
                    "{PLUGIN_NAME}: {command} failed for {}: {err}",
                    path.display()
                ));
            }
        }
        result
    }
}

fn success_message(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Exported(report) => {
            let mut text = format!(
                "{PLUGIN_NAME}: exported {} structures ({} members) to {}",
                report.summary.structures,
                report.summary.members,
                report.path.display()
            );
            for warning in &report.summary.warnings {
                text.push_str(&format!(" (warning: {warning})"));
            }
            text
        }
        Outcome::Imported(report) => format!(
            "{PLUGIN_NAME}: loaded {} structures ({} members) from {}",
            report.structures,
            report.members,
            report.path.display()
        ),
        Outcome::Cancelled => format!("{PLUGIN_NAME}: cancelled"),
    }
}
