//! # clipforge-av
//!
//! External transcoder plumbing for clipforge.
//!
//! This crate provides the pieces the pipeline needs to drive ffmpeg (or any
//! compatible command-line transcoder) safely:
//!
//! - Tool detection ([`check_tool`], [`require_tool`], [`resolve_tool`])
//! - Subprocess execution with captured diagnostics and timeouts
//!   ([`ToolCommand`])
//! - Job-scoped scratch directories with guaranteed removal
//!   ([`JobWorkspace`])
//! - Output artifact validation ([`is_valid_artifact`])
//!
//! ## Example
//!
//! ```no_run
//! use clipforge_av::{require_tool, ToolCommand};
//!
//! # async fn example() -> clipforge_av::Result<()> {
//! let ffmpeg = require_tool("ffmpeg")?;
//! let output = ToolCommand::new(ffmpeg).arg("-version").run().await?;
//! println!("{}", output.stdout);
//! # Ok(())
//! # }
//! ```

mod artifact;
mod command;
mod error;
pub mod tools;
pub mod workspace;

// Re-exports
pub use artifact::is_valid_artifact;
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use tools::{check_tool, check_tools, require_tool, resolve_tool, ToolInfo};
pub use workspace::JobWorkspace;
