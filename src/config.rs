//! Decoder settings loaded from config files.

use std::collections::BTreeMap;

use failure::Error;

use crate::events::{ContentKind, ContentRegistry};

/// How a [`ContentRegistry`] should differ from the standard one.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct DecoderConfig {
    /// Event types whose content is never given a schema.
    pub opaque_types: Vec<String>,
    /// Extra event types, mapped to the standard type whose schema they use.
    pub aliases: BTreeMap<String, String>,
    /// Stop at the first event that fails to decode.
    pub fail_fast: bool,
}

impl DecoderConfig {
    pub fn build_registry(&self) -> Result<ContentRegistry, Error> {
        let mut registry = ContentRegistry::standard();

        for (alias, target) in &self.aliases {
            let kind: ContentKind = target.parse().map_err(|e| {
                format_err!("Invalid alias '{}': {}", alias, e)
            })?;
            registry = registry.with(alias.clone(), kind);
        }

        // Applied last so an opaque type wins over an alias of the same name.
        for event_type in &self.opaque_types {
            registry = registry.without(event_type);
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard() {
        let registry = DecoderConfig::default().build_registry().unwrap();

        assert_eq!(registry, ContentRegistry::standard());
    }

    #[test]
    fn aliases_and_opaque_types() {
        let mut settings = config::Config::new();
        settings
            .merge(config::File::from_str(
                r#"
                opaque_types = ["m.room.message"]
                fail_fast = true

                [aliases]
                "org.example.topic" = "m.room.topic"
                "m.room.message" = "m.room.name"
                "#,
                config::FileFormat::Toml,
            ))
            .unwrap();
        let config: DecoderConfig = settings.try_into().unwrap();

        assert!(config.fail_fast);

        let registry = config.build_registry().unwrap();
        assert_eq!(
            registry.resolve("org.example.topic"),
            Some(ContentKind::Topic)
        );
        assert_eq!(registry.resolve("m.room.message"), None);
    }

    #[test]
    fn unknown_alias_target() {
        let mut config = DecoderConfig::default();
        config
            .aliases
            .insert("org.example.x".to_string(), "m.nope".to_string());

        assert!(config.build_registry().is_err());
    }
}
