//! Profile descriptor registry and caller-override merging.

mod descriptor;

pub use descriptor::{LifecycleHook, ProfileDescriptor, ProfileMatcher, VersionParser};

/// Ordered mapping from profile name to [`ProfileDescriptor`].
///
/// Iteration order is registration order; resolution tie-breaks depend on it.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    entries: Vec<(String, ProfileDescriptor)>,
}

impl ProfileRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ProfileRegistry::insert`].
    pub fn with(mut self, name: impl Into<String>, descriptor: ProfileDescriptor) -> Self {
        self.insert(name, descriptor);
        self
    }

    /// Registers `descriptor` under `name`.
    ///
    /// Re-registering a name replaces its descriptor in place, keeping its original position,
    /// and returns the previous descriptor.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: ProfileDescriptor,
    ) -> Option<ProfileDescriptor> {
        let name = name.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            return Some(std::mem::replace(existing, descriptor));
        }
        self.entries.push((name, descriptor));
        None
    }

    /// Returns the descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&ProfileDescriptor> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Returns whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterates `(name, descriptor)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProfileDescriptor)> {
        self.entries
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Returns the number of registered profiles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of profiles whose `subsets` list `name`, in registration order.
    pub fn subset_parents(&self, name: &str) -> Vec<&str> {
        self.iter()
            .filter(|(_, descriptor)| descriptor.has_subset(name))
            .map(|(parent, _)| parent)
            .collect()
    }

    /// Merges caller `overrides` onto this registry of defaults.
    ///
    /// Profiles present in both are overlaid field by field with
    /// [`ProfileDescriptor::merged_over`]; profiles only in `overrides` are appended in
    /// override order.
    pub fn merge_overrides(&self, overrides: &ProfileRegistry) -> ProfileRegistry {
        let mut merged = self.clone();
        for (name, overlay) in overrides.iter() {
            let descriptor = match self.get(name) {
                Some(base) => overlay.merged_over(base),
                None => overlay.clone(),
            };
            merged.insert(name, descriptor);
        }
        merged
    }
}

impl<S: Into<String>> FromIterator<(S, ProfileDescriptor)> for ProfileRegistry {
    fn from_iter<T: IntoIterator<Item = (S, ProfileDescriptor)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (name, descriptor) in iter {
            registry.insert(name, descriptor);
        }
        registry
    }
}
