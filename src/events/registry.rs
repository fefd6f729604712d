use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::events::content::ContentKind;

/// Maps event type strings to the schema their content is decoded with.
///
/// A registry is never mutated once it is handed to a decoder. The builder
/// methods consume and return it, so a customised registry is finished
/// before anything can share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRegistry {
    kinds: HashMap<String, ContentKind>,
}

impl ContentRegistry {
    /// A registry that knows no types, so all content decodes untyped.
    pub fn empty() -> ContentRegistry {
        ContentRegistry {
            kinds: HashMap::new(),
        }
    }

    /// Every schema under its standard event type.
    pub fn standard() -> ContentRegistry {
        ContentKind::ALL
            .iter()
            .map(|kind| (kind.as_str().to_string(), *kind))
            .collect()
    }

    /// The process wide standard registry, built on first use.
    pub fn global() -> Arc<ContentRegistry> {
        static GLOBAL: OnceLock<Arc<ContentRegistry>> = OnceLock::new();

        GLOBAL
            .get_or_init(|| Arc::new(ContentRegistry::standard()))
            .clone()
    }

    pub fn with(
        mut self,
        event_type: impl Into<String>,
        kind: ContentKind,
    ) -> ContentRegistry {
        self.kinds.insert(event_type.into(), kind);
        self
    }

    pub fn without(mut self, event_type: &str) -> ContentRegistry {
        self.kinds.remove(event_type);
        self
    }

    pub fn resolve(&self, event_type: &str) -> Option<ContentKind> {
        self.kinds.get(event_type).copied()
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.kinds.contains_key(event_type)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for ContentRegistry {
    fn default() -> Self {
        ContentRegistry::standard()
    }
}

impl std::iter::FromIterator<(String, ContentKind)> for ContentRegistry {
    fn from_iter<T: IntoIterator<Item = (String, ContentKind)>>(
        iter: T,
    ) -> ContentRegistry {
        ContentRegistry {
            kinds: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_covers_every_kind() {
        let registry = ContentRegistry::standard();

        assert_eq!(registry.len(), ContentKind::ALL.len());
        for kind in ContentKind::ALL {
            assert_eq!(registry.resolve(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn spot_checks() {
        let registry = ContentRegistry::standard();

        assert_eq!(
            registry.resolve("m.room.member"),
            Some(ContentKind::Member)
        );
        assert_eq!(
            registry.resolve("m.key.verification.start"),
            Some(ContentKind::KeyVerificationStart)
        );
        assert_eq!(registry.resolve("m.room.Member"), None);
        assert_eq!(registry.resolve("m.room.member "), None);
        assert_eq!(registry.resolve("org.example.custom"), None);
    }

    #[test]
    fn builders_do_not_touch_the_original() {
        let standard = ContentRegistry::standard();

        let smaller = standard.clone().without("m.room.message");
        let larger = standard
            .clone()
            .with("org.example.message", ContentKind::Message);

        assert!(standard.contains("m.room.message"));
        assert!(!smaller.contains("m.room.message"));
        assert_eq!(smaller.len(), standard.len() - 1);
        assert_eq!(
            larger.resolve("org.example.message"),
            Some(ContentKind::Message)
        );
    }

    #[test]
    fn global_is_shared() {
        let a = ContentRegistry::global();
        let b = ContentRegistry::global();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, ContentRegistry::standard());
    }

    #[test]
    fn empty_knows_nothing() {
        let registry = ContentRegistry::empty();

        assert!(registry.is_empty());
        assert_eq!(registry.resolve("m.room.message"), None);
    }
}
