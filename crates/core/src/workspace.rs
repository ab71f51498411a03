//! Workspace catalog: the fixed short-key to display-name table.
//!
//! Pages address workspaces by a short key (`analog`, `metal`, ...). The key
//! is resolved to the workspace's display name, and the name to the database
//! row. Only the keys listed here are accepted.

use crate::error::CoreError;
use crate::style::Style;

/// A short workspace key as used in page URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkspaceKey {
    Default,
    Analog,
    Metal,
    Vintage,
    Character,
    Environment,
    Ui,
}

impl WorkspaceKey {
    /// Every known key, in catalog order.
    pub const ALL: [WorkspaceKey; 7] = [
        WorkspaceKey::Default,
        WorkspaceKey::Analog,
        WorkspaceKey::Metal,
        WorkspaceKey::Vintage,
        WorkspaceKey::Character,
        WorkspaceKey::Environment,
        WorkspaceKey::Ui,
    ];

    /// Parse a key slug. Unknown slugs are a validation error.
    pub fn parse(key: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| CoreError::Validation(format!("Invalid workspace key: {key}")))
    }

    /// The slug used in URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Analog => "analog",
            Self::Metal => "metal",
            Self::Vintage => "vintage",
            Self::Character => "character",
            Self::Environment => "environment",
            Self::Ui => "ui",
        }
    }

    /// The `workspaces.name` value this key resolves to.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default Workspace",
            Self::Analog => "Analog Workspace",
            Self::Metal => "Metal Workspace",
            Self::Vintage => "Vintage Workspace",
            Self::Character => "Character Design",
            Self::Environment => "Environment Art",
            Self::Ui => "UI/UX Design",
        }
    }

    /// Generation style for assets created in this workspace.
    ///
    /// Workspaces without a dedicated style generate with [`Style::Realistic`].
    pub fn style(self) -> Style {
        match self {
            Self::Analog => Style::Analog,
            Self::Metal => Style::Metal,
            Self::Vintage => Style::Vintage,
            _ => Style::Realistic,
        }
    }
}

impl std::fmt::Display for WorkspaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
