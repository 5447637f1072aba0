use serde::{Deserialize, Serialize};
use tracing::debug;

use arbor_types::{PrincipalId, ProjectId, Timestamp};

use crate::backup::PrincipalResolver;
use crate::project::{Project, ProjectType};

/// Display names captured for the principals a project references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNames {
    pub owner: String,
    pub group: String,
    pub manager_group: String,
    pub published_by: String,
}

impl ProjectNames {
    /// Look up the names of the project's principals and the publisher.
    pub fn resolve<R>(project: &Project, published_by: &PrincipalId, resolver: &R) -> Self
    where
        R: PrincipalResolver + ?Sized,
    {
        Self {
            owner: resolver.resolve_display_name(&project.owner()),
            group: resolver.resolve_display_name(&project.group()),
            manager_group: resolver.resolve_display_name(&project.manager_group()),
            published_by: resolver.resolve_display_name(published_by),
        }
    }
}

/// The publish event a history record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishStamp {
    pub tag_id: u32,
    pub version_id: u32,
    pub publishing_date: Timestamp,
    pub published_by: PrincipalId,
}

/// An immutable record of a project as it was published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryProject {
    project: Project,
    stamp: PublishStamp,
    names: ProjectNames,
    project_resources: Vec<String>,
}

impl HistoryProject {
    /// Freeze `project` together with the root paths it covered.
    pub fn snapshot(
        project: &Project,
        names: ProjectNames,
        stamp: PublishStamp,
        project_resources: Vec<String>,
    ) -> Self {
        debug!(
            project = project.name(),
            tag = stamp.tag_id,
            resources = project_resources.len(),
            "project frozen"
        );
        Self {
            project: project.clone(),
            stamp,
            names,
            project_resources,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        self.project.id()
    }

    pub fn name(&self) -> &str {
        self.project.name()
    }

    pub fn description(&self) -> &str {
        self.project.description()
    }

    pub fn project_type(&self) -> ProjectType {
        self.project.project_type()
    }

    pub fn date_created(&self) -> Timestamp {
        self.project.date_created()
    }

    pub fn owner(&self) -> PrincipalId {
        self.project.owner()
    }

    pub fn group(&self) -> PrincipalId {
        self.project.group()
    }

    pub fn manager_group(&self) -> PrincipalId {
        self.project.manager_group()
    }

    pub fn tag_id(&self) -> u32 {
        self.stamp.tag_id
    }

    pub fn version_id(&self) -> u32 {
        self.stamp.version_id
    }

    pub fn publishing_date(&self) -> Timestamp {
        self.stamp.publishing_date
    }

    pub fn published_by(&self) -> PrincipalId {
        self.stamp.published_by
    }

    pub fn owner_name(&self) -> &str {
        &self.names.owner
    }

    pub fn group_name(&self) -> &str {
        &self.names.group
    }

    pub fn manager_group_name(&self) -> &str {
        &self.names.manager_group
    }

    pub fn published_by_name(&self) -> &str {
        &self.names.published_by
    }

    /// Root paths the project covered when it was published.
    pub fn project_resources(&self) -> &[String] {
        &self.project_resources
    }

    /// The frozen project.
    pub fn project(&self) -> &Project {
        &self.project
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Names(HashMap<PrincipalId, &'static str>);

    impl PrincipalResolver for Names {
        fn resolve_display_name(&self, principal: &PrincipalId) -> String {
            self.0
                .get(principal)
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("[deleted {}]", principal.short_id()))
        }
    }

    #[test]
    fn names_survive_principal_deletion() {
        let owner = PrincipalId::new();
        let group = PrincipalId::new();
        let managers = PrincipalId::new();
        let publisher = PrincipalId::new();
        let mut project = Project::new(
            ProjectId::new(),
            "Release 4",
            "",
            owner,
            group,
            managers,
            Timestamp::from_millis(10),
            ProjectType::Temporary,
        )
        .unwrap();

        let mut directory = Names(HashMap::from([
            (owner, "alice"),
            (group, "Users"),
            (managers, "Projectmanagers"),
            (publisher, "bob"),
        ]));
        let stamp = PublishStamp {
            tag_id: 9,
            version_id: 2,
            publishing_date: Timestamp::from_millis(500),
            published_by: publisher,
        };
        let history = HistoryProject::snapshot(
            &project,
            ProjectNames::resolve(&project, &publisher, &directory),
            stamp,
            vec!["/sites/default/".into()],
        );

        // Principals disappear and the live project changes afterwards.
        directory.0.clear();
        project.set_description("changed later");

        assert_eq!(history.owner_name(), "alice");
        assert_eq!(history.group_name(), "Users");
        assert_eq!(history.manager_group_name(), "Projectmanagers");
        assert_eq!(history.published_by_name(), "bob");
        assert_eq!(history.description(), "");
        assert_eq!(history.tag_id(), 9);
        assert_eq!(history.version_id(), 2);
        assert_eq!(history.published_by(), publisher);
        assert_eq!(history.project_type(), ProjectType::Temporary);
        assert_eq!(history.project_resources(), ["/sites/default/".to_string()]);
    }
}
