use std::{fmt, rc::Rc};
use tydef_value::Value;

/// A finite set of literal members, compared by canonical text and type tag.
#[derive(Debug, Clone)]
pub struct EnumType {
    members: Rc<[(String, String)]>,
}

impl EnumType {
    pub fn new(members: impl IntoIterator<Item = Value>) -> Self {
        let mut seen: Vec<(String, String)> = Vec::new();
        for member in members {
            let entry = (member.to_string(), member.type_tag().to_owned());
            if !seen.contains(&entry) {
                seen.push(entry);
            }
        }
        Self {
            members: seen.into(),
        }
    }

    pub fn test(&self, value: &Value) -> bool {
        let repr = value.to_string();
        let tag = value.type_tag();
        self.members.iter().any(|(r, t)| *r == repr && t == tag)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (repr, _)) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(repr)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_respects_tag() {
        let ty = EnumType::new([Value::from("1"), Value::from(2)]);
        assert!(ty.test(&Value::from("1")));
        assert!(ty.test(&Value::from(2)));
        assert!(!ty.test(&Value::from(1)));
        assert!(!ty.test(&Value::from("2")));
        assert_eq!(ty.to_string(), "(\"1\" | 2)");
    }

    #[test]
    fn duplicates_collapse() {
        let ty = EnumType::new([Value::from("g"), Value::from("g"), Value::from("i")]);
        assert_eq!(ty.len(), 2);
    }
}
