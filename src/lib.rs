#![doc = include_str!("../README.md")]

// Re-export std common modules
pub mod prelude {
    pub use std::env;
    pub use std::error::Error;
    pub use std::fs;
    pub use std::io;
    pub use std::path::{Path, PathBuf};
    pub use std::process::exit;
    pub use std::process::Child;
    pub use std::process::Command;
    pub use std::process::Stdio;
    pub use std::sync::{Arc, Mutex};
    pub use std::time::{Duration, Instant};
    pub use log::{debug, error, info, warn};
}

pub mod e_cli;
pub use e_cli::Cli;
pub mod e_clicks;
pub use e_clicks::{ClickOutcome, ClickTracker};
pub mod e_command_builder;
pub use e_command_builder::{AntCommandBuilder, LaunchRequest};
pub mod e_config;
pub use e_config::{Workspace, WorkspaceSettings};
pub mod e_errors;
pub use e_errors::PanelError;
pub mod e_findtarget;
pub mod e_notify;
pub mod e_parser;
pub use e_parser::parse_targets;
pub mod e_picker;
pub mod e_prompts;
pub mod e_render;
pub mod e_runner;
pub mod e_session;
pub use e_session::{PanelSession, Tools};
pub mod e_target;
pub use e_target::{AntTarget, SourceLocation, TargetKind};
pub mod e_tui;
pub mod e_view;
pub use e_view::TargetView;
