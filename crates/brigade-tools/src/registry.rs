//! Closed registry mapping catalogue names to implementations.

use crate::error::RegistryError;
use crate::tool::{Tool, ToolName, ToolSpec};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable tool registry covering exactly [`ToolName::ALL`].
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Arc<HashMap<ToolName, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    /// Build a registry, rejecting duplicates and catalogue gaps.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self, RegistryError> {
        let mut map: HashMap<ToolName, Arc<dyn Tool>> = HashMap::with_capacity(tools.len());
        for tool in tools {
            let name = tool.name();
            debug!("registering tool (name={})", name);
            if map.insert(name, tool).is_some() {
                return Err(RegistryError::DuplicateTool(name));
            }
        }
        if let Some(missing) = ToolName::ALL.into_iter().find(|name| !map.contains_key(name)) {
            return Err(RegistryError::MissingTool(missing));
        }
        Ok(Self {
            tools: Arc::new(map),
        })
    }

    /// Fetch the implementation for a catalogue entry.
    pub fn get(&self, name: ToolName) -> Option<Arc<dyn Tool>> {
        self.tools.get(&name).cloned()
    }

    /// Tool specs in catalogue order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        ToolName::ALL
            .into_iter()
            .filter_map(|name| self.tools.get(&name))
            .map(|tool| tool.spec())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
