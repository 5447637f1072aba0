use serde::{Deserialize, Serialize};

use arbor_types::{PrincipalId, ProjectId, Timestamp};

use crate::error::{ModelError, ModelResult};

/// Kind of project.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectType {
    #[default]
    Normal,
    /// Deleted automatically after it has been published.
    Temporary,
}

/// A work project: the unit that groups changes for publishing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    owner: PrincipalId,
    group: PrincipalId,
    manager_group: PrincipalId,
    date_created: Timestamp,
    flags: u32,
    project_type: ProjectType,
}

impl Project {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
        owner: PrincipalId,
        group: PrincipalId,
        manager_group: PrincipalId,
        date_created: Timestamp,
        project_type: ProjectType,
    ) -> ModelResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::invalid("project name must not be empty"));
        }
        Ok(Self {
            id,
            name,
            description: description.into(),
            owner,
            group,
            manager_group,
            date_created,
            flags: 0,
            project_type,
        })
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn owner(&self) -> PrincipalId {
        self.owner
    }

    pub fn group(&self) -> PrincipalId {
        self.group
    }

    pub fn manager_group(&self) -> PrincipalId {
        self.manager_group
    }

    pub fn date_created(&self) -> Timestamp {
        self.date_created
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn set_flags(&mut self, flags: u32) {
        self.flags = flags;
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn is_temporary(&self) -> bool {
        self.project_type == ProjectType::Temporary
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}
