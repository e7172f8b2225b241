//! Project discovery and layout
//!
//! A project is any directory containing a `.lbm/` marker. Entity files
//! live in fixed subdirectories as `*.lbm.yaml` so they stay greppable and
//! diff-friendly under version control.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marker directory identifying a project root
pub const MARKER_DIR: &str = ".lbm";

/// File extension for entity files
pub const ENTITY_EXT: &str = ".lbm.yaml";

/// Entity subdirectories created on init
pub const ENTITY_DIRS: &[&str] = &["mdm/items", "bom/products", "bom/versions", "bom/lines"];

/// Errors from project discovery and initialization
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not inside an lbm project (no {MARKER_DIR} directory found walking up from {})", .0.display())]
    NotInProject(PathBuf),

    #[error("directory is already an lbm project: {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A discovered project root
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Walk upward from the current directory looking for the marker
    pub fn discover() -> Result<Self, ProjectError> {
        let cwd = std::env::current_dir().map_err(|source| ProjectError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        Self::discover_from(&cwd)
    }

    /// Walk upward from `start` looking for the marker
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut dir = start;
        loop {
            if dir.join(MARKER_DIR).is_dir() {
                return Ok(Self {
                    root: dir.to_path_buf(),
                });
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => return Err(ProjectError::NotInProject(start.to_path_buf())),
            }
        }
    }

    /// Create the marker and entity directories under `dir`
    pub fn init(dir: &Path) -> Result<Self, ProjectError> {
        if dir.join(MARKER_DIR).is_dir() {
            return Err(ProjectError::AlreadyInitialized(dir.to_path_buf()));
        }
        for sub in std::iter::once(MARKER_DIR).chain(ENTITY_DIRS.iter().copied()) {
            let path = dir.join(sub);
            std::fs::create_dir_all(&path)
                .map_err(|source| ProjectError::Io { path, source })?;
        }
        Ok(Self {
            root: dir.to_path_buf(),
        })
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}
