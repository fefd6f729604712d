use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::error::Error;
use serde_json::value::RawValue;
use std::convert::AsRef;

/// A decoded value together with the exact JSON text it was decoded from.
///
/// Serializing a `Raw` writes the original text back out untouched, so key
/// order, whitespace and fields the value type dropped all survive.
#[derive(Debug, Clone)]
pub struct Raw<V> {
    value: V,
    raw_value: Box<RawValue>,
}

impl<V> Raw<V>
where
    V: Serialize,
{
    /// Wraps a value built in memory, using its own serialization as the
    /// raw text.
    pub fn wrap(value: V) -> Result<Raw<V>, Error> {
        let raw_value = RawValue::from_string(serde_json::to_string(&value)?)?;

        Ok(Raw { value, raw_value })
    }
}

impl<V> Raw<V> {
    pub(crate) fn from_parts(value: V, raw_value: Box<RawValue>) -> Raw<V> {
        Raw { value, raw_value }
    }

    pub fn get_str(&self) -> &str {
        self.raw_value.get()
    }

    pub fn into_inner(self) -> V {
        self.value
    }
}

impl<V> AsRef<V> for Raw<V> {
    fn as_ref(&self) -> &V {
        &self.value
    }
}

impl<V> Serialize for Raw<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw_value.serialize(serializer)
    }
}

impl<'de, V> Deserialize<'de> for Raw<V>
where
    V: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Raw<V>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_value = Box::<RawValue>::deserialize(deserializer)?;
        let value = serde_json::from_str(raw_value.get())
            .map_err(serde::de::Error::custom)?;

        Ok(Raw { value, raw_value })
    }
}
