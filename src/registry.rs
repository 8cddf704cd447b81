use core::fmt;
use core::hash::Hash;
use std::collections::HashMap;

/// Identifies one view template known to the host's [`crate::ViewFactory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("template registry is empty")]
    Empty,
    #[error("default template {0:?} is not registered for any tag")]
    MissingDefault(TemplateId),
    #[error("tag at position {position} is registered twice")]
    DuplicateTag { position: usize },
}

/// Maps item tags to view templates.
///
/// Built once from a declarative list of `(tag, template)` pairs. Lookups for unknown tags
/// fall back to the default template.
#[derive(Clone)]
pub struct TemplateRegistry<K> {
    templates: HashMap<K, TemplateId>,
    distinct: usize,
    default: TemplateId,
}

impl<K: Hash + Eq + fmt::Debug> TemplateRegistry<K> {
    pub fn new(
        entries: impl IntoIterator<Item = (K, TemplateId)>,
        default: TemplateId,
    ) -> Result<Self, RegistryError> {
        let mut templates = HashMap::new();
        for (position, (tag, template)) in entries.into_iter().enumerate() {
            if templates.insert(tag, template).is_some() {
                return Err(RegistryError::DuplicateTag { position });
            }
        }
        if templates.is_empty() {
            return Err(RegistryError::Empty);
        }
        if !templates.values().any(|&t| t == default) {
            return Err(RegistryError::MissingDefault(default));
        }

        let mut ids: Vec<TemplateId> = templates.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();

        Ok(Self {
            templates,
            distinct: ids.len(),
            default,
        })
    }

    pub fn default_template(&self) -> TemplateId {
        self.default
    }

    /// Number of distinct templates. When this is `1`, template matching can be skipped.
    pub fn template_count(&self) -> usize {
        self.distinct
    }

    pub fn get(&self, tag: &K) -> Option<TemplateId> {
        self.templates.get(tag).copied()
    }

    /// Returns the template for `tag`, or the default one (with a diagnostic).
    pub fn resolve(&self, tag: &K) -> TemplateId {
        match self.get(tag) {
            Some(template) => template,
            None => {
                vwarn!(
                    tag = ?tag,
                    default = self.default.0,
                    "no template registered for tag; using the default"
                );
                self.default
            }
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for TemplateRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("templates", &self.templates)
            .field("default", &self.default)
            .finish()
    }
}
