use serde::Serialize;

use arbor_types::{ContentDigest, Timestamp};

use crate::error::{ModelError, ModelResult};
use crate::resource::Resource;

/// A file resource together with its content buffer.
///
/// The buffer is owned and never absent (it defaults to empty). Cloning a
/// `File` copies the buffer; two files never share bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct File {
    resource: Resource,
    contents: Vec<u8>,
}

impl File {
    /// Wrap a file resource with an empty buffer. The length is reset to 0
    /// and `date_content` is kept.
    pub fn new(resource: Resource) -> ModelResult<Self> {
        Self::with_contents(resource, Vec::new())
    }

    /// Wrap a file resource with a content buffer read from storage. The
    /// length is taken from the buffer and `date_content` is kept.
    pub fn with_contents(mut resource: Resource, contents: Vec<u8>) -> ModelResult<Self> {
        if resource.is_folder() {
            return Err(ModelError::invalid(format!(
                "folder {} cannot carry content",
                resource.root_path()
            )));
        }
        resource.length = contents.len() as u64;
        Ok(Self { resource, contents })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Mutable access for the caller-driven setters on [`Resource`]. Content
    /// length can only change through [`File::set_contents`].
    pub fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn length(&self) -> u64 {
        self.resource.length()
    }

    pub fn date_content(&self) -> Timestamp {
        self.resource.date_content()
    }

    /// Digest of the current buffer.
    pub fn digest(&self) -> ContentDigest {
        ContentDigest::of(&self.contents)
    }

    /// Replace the content buffer, stamping `date_content` with the wall clock.
    pub fn set_contents(&mut self, contents: Vec<u8>) {
        self.set_contents_at(contents, Timestamp::now());
    }

    /// Replace the content buffer as of `now`.
    ///
    /// When the previous buffer was empty it was only a placeholder, so the
    /// stored `date_content` is kept. Otherwise `date_content` becomes `now`,
    /// but never moves backwards: if `now` is not past the stored value the
    /// stored value plus one millisecond is used instead.
    pub fn set_contents_at(&mut self, contents: Vec<u8>, now: Timestamp) {
        if !self.contents.is_empty() {
            let previous = self.resource.date_content;
            self.resource.date_content = if now.is_after(&previous) {
                now
            } else {
                previous.next()
            };
        }
        self.resource.length = contents.len() as u64;
        self.contents = contents;
    }

    pub fn into_parts(self) -> (Resource, Vec<u8>) {
        (self.resource, self.contents)
    }
}

impl AsRef<Resource> for File {
    fn as_ref(&self) -> &Resource {
        &self.resource
    }
}
