//! Sitesearch Core Library
//!
//! Core types, configuration, error handling and the logging collaborator
//! shared by the index builder and the CLI.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod logger;

pub use config::Config;
pub use content::{
    ContentEntry, DocFrontmatter, Entry, PageFrontmatter, PostStatus, RecordType, SourceKind,
    StatusCounts, ToolArticleFrontmatter,
};
pub use error::{CoreError, Result};
pub use logger::{BuildLogger, LogLevel, MemoryLogger, TracingLogger};
