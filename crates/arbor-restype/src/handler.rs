use serde::{Deserialize, Serialize};

use arbor_model::{path, File, Property, Resource, ResourceBuilder, ResourceKind};
use arbor_types::{PrincipalId, ProjectId, ResourceFlags, ResourceTypeId, Timestamp};

use crate::error::{ResourceTypeError, ResourceTypeResult};

// ---------------------------------------------------------------------------
// CreateRequest
// ---------------------------------------------------------------------------

/// Everything a handler needs to create a new resource.
///
/// Unattributed requests carry the nil principal and the nil project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateRequest {
    /// Absolute root path of the new resource.
    pub target_path: String,
    /// Explicit properties; they win over the handler's defaults by name.
    pub properties: Vec<Property>,
    /// Initial content. Must be empty for folders.
    pub content: Vec<u8>,
    /// Handler-specific parameter, opaque to the registry.
    pub extra_parameter: Option<String>,
    /// Principal creating the resource.
    pub user: PrincipalId,
    /// Project the creation happens in.
    pub project: ProjectId,
}

impl Default for CreateRequest {
    fn default() -> Self {
        Self {
            target_path: String::new(),
            properties: Vec::new(),
            content: Vec::new(),
            extra_parameter: None,
            user: PrincipalId::nil(),
            project: ProjectId::nil(),
        }
    }
}

impl CreateRequest {
    /// A request for `target_path` with no content or properties.
    pub fn new(target_path: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: Vec<u8>) -> Self {
        self.content = content;
        self
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_extra_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.extra_parameter = Some(parameter.into());
        self
    }

    /// Set the creating principal and the project.
    pub fn by(mut self, user: PrincipalId, project: ProjectId) -> Self {
        self.user = user;
        self.project = project;
        self
    }
}

// ---------------------------------------------------------------------------
// NewResource
// ---------------------------------------------------------------------------

/// The result of a successful create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewResource {
    /// The resource record, in state `New`.
    pub resource: Resource,
    /// Initial content. Always empty for folders.
    pub contents: Vec<u8>,
    /// Explicit properties merged over the handler defaults.
    pub properties: Vec<Property>,
}

impl NewResource {
    /// The new resource as a [`File`], or `None` for a folder.
    pub fn into_file(self) -> Option<File> {
        if self.resource.is_folder() {
            return None;
        }
        File::with_contents(self.resource, self.contents).ok()
    }
}

// ---------------------------------------------------------------------------
// ResourceTypeHandler
// ---------------------------------------------------------------------------

/// Type-specific behavior of resources.
///
/// Handlers are registered at runtime into a
/// [`ResourceTypeRegistry`](crate::ResourceTypeRegistry) under a stable
/// numeric id and a parallel name.
pub trait ResourceTypeHandler: Send + Sync {
    /// Unique type name.
    fn name(&self) -> &str;

    /// Unique numeric type id, stable across the system's lifetime.
    fn type_id(&self) -> ResourceTypeId;

    /// Id of the loader that interprets content of this type.
    fn loader_id(&self) -> u32;

    /// Whether resources of this type are folders.
    fn is_folder(&self) -> bool;

    /// Whether content of this type can be edited directly as text.
    fn is_direct_editable(&self) -> bool {
        false
    }

    /// Name of the property that controls caching, if any.
    fn default_cache_property(&self) -> Option<&str> {
        None
    }

    /// Properties attached to every new resource of this type unless the
    /// request overrides them.
    fn default_properties(&self) -> &[Property] {
        &[]
    }

    /// Deprecated types stay readable but can no longer be created.
    fn is_deprecated(&self) -> bool {
        false
    }

    /// Create a new resource of this type.
    fn create(&self, request: CreateRequest) -> ResourceTypeResult<NewResource>;
}

/// Assemble a new resource of `handler`'s type from `request`, stamped with
/// `now`.
///
/// A leading `~` in the name marks the resource as a temporary file.
pub fn assemble_resource<H>(
    handler: &H,
    request: CreateRequest,
    now: Timestamp,
) -> ResourceTypeResult<NewResource>
where
    H: ResourceTypeHandler + ?Sized,
{
    if !request.target_path.starts_with('/') {
        return Err(ResourceTypeError::InvalidParameter(format!(
            "target path must be absolute: '{}'",
            request.target_path
        )));
    }
    if handler.is_folder() && !request.content.is_empty() {
        return Err(ResourceTypeError::InvalidParameter(format!(
            "folder {} cannot carry content",
            request.target_path
        )));
    }

    let (kind, root_path) = if handler.is_folder() {
        (ResourceKind::Folder, path::as_folder_path(&request.target_path))
    } else {
        (ResourceKind::File, request.target_path.clone())
    };
    let mut flags = ResourceFlags::empty();
    if path::is_temporary_file_name(path::name_of(&root_path)) {
        flags |= ResourceFlags::TEMPFILE;
    }

    let resource = ResourceBuilder::new()
        .root_path(root_path)
        .kind(kind)
        .type_id(handler.type_id())
        .flags(flags)
        .project_last_modified(request.project)
        .date_created(now)
        .user_created(request.user)
        .date_last_modified(now)
        .user_last_modified(request.user)
        .length(request.content.len() as u64)
        .date_content(if handler.is_folder() { Timestamp::UNSET } else { now })
        .build()?;

    let properties = Property::merge_defaults(&request.properties, handler.default_properties());
    Ok(NewResource {
        resource,
        contents: request.content,
        properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_model::MappingType;
    use arbor_types::ResourceState;

    struct Page;

    impl ResourceTypeHandler for Page {
        fn name(&self) -> &str {
            "page"
        }
        fn type_id(&self) -> ResourceTypeId {
            ResourceTypeId(7)
        }
        fn loader_id(&self) -> u32 {
            1
        }
        fn is_folder(&self) -> bool {
            false
        }
        fn create(&self, request: CreateRequest) -> ResourceTypeResult<NewResource> {
            assemble_resource(self, request, Timestamp::from_millis(1_000))
        }
    }

    struct Dir;

    impl ResourceTypeHandler for Dir {
        fn name(&self) -> &str {
            "dir"
        }
        fn type_id(&self) -> ResourceTypeId {
            ResourceTypeId(0)
        }
        fn loader_id(&self) -> u32 {
            1
        }
        fn is_folder(&self) -> bool {
            true
        }
        fn create(&self, request: CreateRequest) -> ResourceTypeResult<NewResource> {
            assemble_resource(self, request, Timestamp::from_millis(1_000))
        }
    }

    #[test]
    fn trait_defaults() {
        assert!(!Page.is_direct_editable());
        assert!(Page.default_cache_property().is_none());
        assert!(Page.default_properties().is_empty());
        assert!(!Page.is_deprecated());
    }

    #[test]
    fn creates_file_with_content() {
        let user = PrincipalId::new();
        let request = CreateRequest::new("/sites/a.html")
            .with_content(b"<p/>".to_vec())
            .by(user, ProjectId::new());
        let created = Page.create(request).unwrap();

        let r = &created.resource;
        assert_eq!(r.root_path(), "/sites/a.html");
        assert_eq!(r.type_id(), ResourceTypeId(7));
        assert_eq!(r.state(), ResourceState::New);
        assert_eq!(r.length(), 4);
        assert_eq!(r.user_created(), user);
        assert_eq!(r.date_content(), Timestamp::from_millis(1_000));

        let file = created.into_file().unwrap();
        assert_eq!(file.contents(), b"<p/>");
    }

    #[test]
    fn unattributed_request_uses_nil_principal() {
        let request = CreateRequest::new("/a.html");
        assert!(request.user.is_nil());
        assert!(request.project.is_nil());

        let created = Page.create(request).unwrap();
        assert!(created.resource.user_created().is_nil());
        assert!(created.resource.user_last_modified().is_nil());
        assert!(created.resource.project_last_modified().is_nil());

        let parsed: CreateRequest = serde_json::from_str(r#"{"target_path": "/b.html"}"#).unwrap();
        assert!(parsed.user.is_nil());
    }

    #[test]
    fn creates_folder_with_trailing_slash() {
        let created = Dir.create(CreateRequest::new("/sites/news")).unwrap();
        assert!(created.resource.is_folder());
        assert_eq!(created.resource.root_path(), "/sites/news/");
        assert!(created.into_file().is_none());
    }

    #[test]
    fn folder_with_content_rejected() {
        let err = Dir
            .create(CreateRequest::new("/sites/news/").with_content(vec![1]))
            .unwrap_err();
        assert!(matches!(err, ResourceTypeError::InvalidParameter(_)));
    }

    #[test]
    fn relative_target_rejected() {
        let err = Page.create(CreateRequest::new("a.html")).unwrap_err();
        assert!(matches!(err, ResourceTypeError::InvalidParameter(_)));
    }

    #[test]
    fn file_path_ending_in_slash_rejected_by_model() {
        let err = Page.create(CreateRequest::new("/sites/a/")).unwrap_err();
        assert!(matches!(err, ResourceTypeError::Model(_)));
    }

    #[test]
    fn temporary_name_sets_flag() {
        let created = Page.create(CreateRequest::new("/sites/~a.html")).unwrap();
        assert!(created.resource.flags().contains(ResourceFlags::TEMPFILE));
        assert!(created.resource.is_temporary_file());
    }

    #[test]
    fn explicit_properties_kept() {
        let title = Property::with_value("Title", "Home", MappingType::Structure);
        let created = Page
            .create(CreateRequest::new("/a.html").with_properties(vec![title.clone()]))
            .unwrap();
        assert_eq!(created.properties, vec![title]);
    }
}
