use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ir::BaseType;
use crate::target::TargetKind;

/// Generator options. Every field is optional in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelGenConfig {
    /// Prefix of the emitted `{name}ModelBuilderSemantics`; defaults to the grammar name.
    pub name: Option<String>,
    /// Qualified root type, e.g. `tatsu.objectmodel.Node`; defaults per target.
    pub base_type: Option<String>,
    pub target: TargetKind,
    /// Fail instead of skipping classes that shadow a built-in.
    pub strict: bool,
}

impl ModelGenConfig {
    pub fn load(path: &Path) -> Result<Self> {
        crate::path_de::from_file_with_path(path)
    }

    pub fn resolve_base_type(&self) -> Result<BaseType> {
        let target = self.target.target();
        let path = self.base_type.as_deref().unwrap_or(target.default_base_type());
        BaseType::parse(path, target.path_separator())
    }
}
