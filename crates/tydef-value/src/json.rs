use serde::ser::{Serialize, Serializer};

use super::{object::TAG_FIELD, Object, Value};

/// JSON objects announce a custom type through a string `"@@type"` member.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Num(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(values) => Value::list(values.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                let mut object = match map.get(TAG_FIELD) {
                    Some(serde_json::Value::String(tag)) => Object::tagged(tag.clone()),
                    _ => Object::new(),
                };
                for (key, value) in map {
                    if key != TAG_FIELD || object.tag().is_none() {
                        object.insert(key, Value::from(value));
                    }
                }
                Value::Object(object)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Num(n) => serializer.serialize_f64(*n),
            Value::Str(s) | Value::Error(s) => serializer.serialize_str(s),
            Value::Date(date) => serializer.serialize_f64(date.millis()),
            Value::RegExp(_) | Value::Function(_) => serializer.collect_str(self),
            Value::List(list) => list.serialize(serializer),
            Value::Object(object) => object.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{List, Value};

    #[test]
    fn from_json() {
        let value = Value::from(json!([1, "x", null, {"a": [true]}]));
        let list = value.as_list().cloned().unwrap_or_default();
        assert_eq!(list.len(), 4);
        assert_eq!(list.get(0), Some(&Value::Num(1.0)));
        assert_eq!(list.get(1), Some(&Value::str("x")));
        assert_eq!(list.get(2), Some(&Value::Null));
        assert_eq!(list.get(3).map(Value::type_tag), Some("Object"));
    }

    #[test]
    fn tagged_json_objects() {
        let value = Value::from(json!({"@@type": "my-package/Maybe", "value": 1}));
        assert_eq!(value.type_tag(), "my-package/Maybe");
        let object = value.as_object().cloned().unwrap_or_default();
        assert!(!object.contains_key("@@type"));
        assert_eq!(object.get("value"), Some(&Value::Num(1.0)));
    }

    #[test]
    fn serializes_back_to_json() {
        let value = Value::from(json!({"@@type": "T", "xs": [1.5, "s", null]}));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, json!({"@@type": "T", "xs": [1.5, "s", null]}));

        let empty = serde_json::to_value(&Value::List(List::new())).unwrap();
        assert_eq!(empty, json!([]));
    }
}
