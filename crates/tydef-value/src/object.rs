use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::Value;

/// Field name under which a custom type tag is exchanged with JSON.
pub const TAG_FIELD: &str = "@@type";

/// A map of field names to values.
///
/// Fields keep their insertion order. An object may carry a custom type tag
/// (e.g. `my-package/Maybe`) which then becomes its structural type tag.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Object {
    tag: Option<String>,
    fields: IndexMap<String, Value>,
}

impl Object {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            fields: IndexMap::new(),
        }
    }

    /// Builder style insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    #[inline]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fields ordered by name.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        let mut fields: Vec<_> = self.iter().collect();
        fields.sort_unstable_by(|(l, _), (r, _)| l.cmp(r));
        fields
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Object
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            tag: None,
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for Object {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.len() + usize::from(self.tag.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(tag) = &self.tag {
            map.serialize_entry(TAG_FIELD, tag)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
