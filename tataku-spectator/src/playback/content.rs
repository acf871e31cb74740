use crate::prelude::*;
use std::collections::HashSet;

/// tells the spectator whether a session's map exists locally
pub trait ContentLibrary: Send + Sync {
    fn has_content(&self, content_id: ContentId) -> bool;
}

/// pretends every map is available
#[derive(Copy, Clone, Debug, Default)]
pub struct AnyContent;
impl ContentLibrary for AnyContent {
    fn has_content(&self, _content_id: ContentId) -> bool { true }
}

impl ContentLibrary for HashSet<ContentId> {
    fn has_content(&self, content_id: ContentId) -> bool {
        self.contains(&content_id)
    }
}
