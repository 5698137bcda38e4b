//! Resource registry - path-keyed lookup of every resource in a build session.

use rustc_hash::FxHashMap;

use super::{Resource, ResourceKind};

/// Lookup of resources by canonical path.
///
/// The compiler only reads and mutates entries; it never inserts or removes
/// them. Implement this to compile against an existing resource store.
pub trait Registry {
    /// Get the resource registered for `path`.
    fn get(&self, path: &str) -> Option<&Resource>;

    /// Get the resource registered for `path` for mutation.
    fn get_mut(&mut self, path: &str) -> Option<&mut Resource>;

    /// All registered paths, in no particular order.
    fn paths(&self) -> Vec<String>;
}

/// In-memory registry keyed by resource path.
#[derive(Debug, Default)]
pub struct ResourceMap {
    by_path: FxHashMap<String, Resource>,
}

impl ResourceMap {
    /// Create an empty map.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, replacing any previous entry with the same path.
    pub fn insert(&mut self, resource: Resource) -> Option<Resource> {
        self.by_path.insert(resource.path().to_owned(), resource)
    }

    #[inline]
    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Iterate over resources of one kind.
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.by_path.values().filter(move |r| r.kind() == kind)
    }

    /// Number of resources whose compilation completed.
    pub fn compiled_count(&self) -> usize {
        self.by_path.values().filter(|r| r.is_compiled()).count()
    }
}

impl Registry for ResourceMap {
    #[inline]
    fn get(&self, path: &str) -> Option<&Resource> {
        self.by_path.get(path)
    }

    #[inline]
    fn get_mut(&mut self, path: &str) -> Option<&mut Resource> {
        self.by_path.get_mut(path)
    }

    fn paths(&self) -> Vec<String> {
        self.by_path.keys().cloned().collect()
    }
}

impl FromIterator<Resource> for ResourceMap {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut map = Self::new();
        for resource in iter {
            map.insert(resource);
        }
        map
    }
}
