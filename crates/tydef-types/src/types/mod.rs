use derive_more::Display;
use std::{fmt, rc::Rc};
use tydef_value::Value;

mod binary;
mod class;
mod enumeration;
mod nullary;
mod record;
mod unary;
mod var;

pub use binary::*;
pub use class::*;
pub use enumeration::*;
pub use nullary::*;
pub use record::*;
pub use unary::*;
pub use var::*;

use crate::{builtin::NULLABLE, infer::Mode};

/// Membership test of a descriptor or type class.
pub type Predicate = Rc<dyn Fn(&Value) -> bool>;
/// Decomposes a container value into the values of one of its parameters.
pub type Extract = Rc<dyn Fn(&Value) -> Vec<Value>>;

/// The closed set of descriptor shapes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeKind {
    #[display("ANY")]
    Any,
    #[display("UNKNOWN")]
    Unknown,
    #[display("INCONSISTENT")]
    Inconsistent,
    #[display("VARIABLE")]
    Variable,
    #[display("NULLARY")]
    Nullary,
    #[display("UNARY")]
    Unary,
    #[display("BINARY")]
    Binary,
    #[display("ENUM")]
    Enum,
    #[display("RECORD")]
    Record,
}

/// Which parameter of a parameterized type a child position refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Param {
    First,
    Second,
}

/// A type descriptor.
///
/// `Any` matches everything but never results from inference, `Unknown`
/// matches everything and is neutral during unification, `Inconsistent`
/// matches nothing and marks contradictory inference.
#[derive(Clone)]
pub enum Type {
    Any,
    Unknown,
    Inconsistent,
    Var(TypeVar),
    Nullary(NullaryType),
    Unary(Box<UnaryType>),
    Binary(Box<BinaryType>),
    Enum(EnumType),
    Record(RecordType),
}

impl Type {
    pub fn var(name: impl AsRef<str>) -> Self {
        Self::Var(TypeVar::new(name))
    }

    pub fn nullary<F>(name: impl AsRef<str>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + 'static,
    {
        Self::Nullary(NullaryType::new(name, test))
    }

    pub fn enumeration(members: impl IntoIterator<Item = Value>) -> Self {
        Self::Enum(EnumType::new(members))
    }

    pub fn record<K>(fields: impl IntoIterator<Item = (K, Type)>) -> Self
    where
        K: Into<String>,
    {
        Self::Record(RecordType::new(fields))
    }

    /// A nullary type whose members share the structural type tag `tag`.
    pub fn foreign(tag: &str) -> Self {
        let owned = tag.to_owned();
        Self::nullary(tag, move |value| value.type_tag() == owned)
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Any => TypeKind::Any,
            Self::Unknown => TypeKind::Unknown,
            Self::Inconsistent => TypeKind::Inconsistent,
            Self::Var(_) => TypeKind::Variable,
            Self::Nullary(_) => TypeKind::Nullary,
            Self::Unary(_) => TypeKind::Unary,
            Self::Binary(_) => TypeKind::Binary,
            Self::Enum(_) => TypeKind::Enum,
            Self::Record(_) => TypeKind::Record,
        }
    }

    /// The full (possibly namespaced) name of named descriptors.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Var(var) => Some(var.name()),
            Self::Nullary(nullary) => Some(nullary.name()),
            Self::Unary(unary) => Some(unary.def.name()),
            Self::Binary(binary) => Some(binary.def.name()),
            Self::Any | Self::Unknown | Self::Inconsistent | Self::Enum(_) | Self::Record(_) => {
                None
            }
        }
    }

    pub fn test(&self, value: &Value) -> bool {
        match self {
            Self::Any | Self::Unknown | Self::Var(_) => true,
            Self::Inconsistent => false,
            Self::Nullary(nullary) => nullary.test(value),
            Self::Unary(unary) => unary.test(value),
            Self::Binary(binary) => binary.test(value),
            Self::Enum(enumeration) => enumeration.test(value),
            Self::Record(record) => record.test(value),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_inconsistent(&self) -> bool {
        matches!(self, Self::Inconsistent)
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, Self::Unary(_) | Self::Binary(_))
    }

    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Unary(unary) if unary.def.name() == NULLABLE)
    }

    pub fn as_unary(&self) -> Option<&UnaryType> {
        match self {
            Self::Unary(unary) => Some(unary),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryType> {
        match self {
            Self::Binary(binary) => Some(binary),
            _ => None,
        }
    }

    /// The child descriptor addressed by `param`, if this type has one.
    pub fn param(&self, param: Param) -> Option<&Type> {
        match (self, param) {
            (Self::Unary(unary), Param::First) => Some(&unary.param),
            (Self::Binary(binary), Param::First) => Some(&binary.first),
            (Self::Binary(binary), Param::Second) => Some(&binary.second),
            _ => None,
        }
    }

    /// Identity used when collecting descriptors into sets: the name of named
    /// descriptors, the canonical text of everything else.
    pub fn key(&self) -> String {
        match self {
            Self::Nullary(_) | Self::Var(_) => self.name().unwrap_or_default().to_owned(),
            _ => self.to_string(),
        }
    }

    /// Canonical text without the outer parentheses of parameterized types,
    /// as written in a signature.
    pub fn show_bare(&self) -> String {
        let repr = self.to_string();
        if self.is_parameterized() {
            let mut chars = repr.chars();
            chars.next();
            chars.next_back();
            chars.as_str().to_owned()
        } else {
            repr
        }
    }

    /// Structural equality.
    ///
    /// `Unknown` equals anything. `Inconsistent` equals anything in loose mode
    /// and nothing in strict mode.
    pub fn equal(&self, other: &Type, mode: Mode) -> bool {
        match (self, other) {
            (Self::Inconsistent, _) | (_, Self::Inconsistent) => mode == Mode::Loose,
            (Self::Unknown, _) | (_, Self::Unknown) => true,
            (Self::Any, Self::Any) => true,
            (Self::Var(l), Self::Var(r)) => l == r,
            (Self::Nullary(l), Self::Nullary(r)) => l.name() == r.name(),
            (Self::Unary(l), Self::Unary(r)) => {
                l.def.name() == r.def.name() && l.param.equal(&r.param, mode)
            }
            (Self::Binary(l), Self::Binary(r)) => {
                l.def.name() == r.def.name()
                    && l.first.equal(&r.first, mode)
                    && l.second.equal(&r.second, mode)
            }
            (Self::Enum(_), Self::Enum(_)) | (Self::Record(_), Self::Record(_)) => {
                self.to_string() == other.to_string()
            }
            _ => false,
        }
    }

    /// The concrete alternatives of this descriptor with `Any` stripped out.
    ///
    /// A parameterized type mentioning `Any` anywhere has no alternatives.
    pub fn reject_any(&self) -> Vec<Type> {
        match self {
            Self::Any => Vec::new(),
            Self::Unary(unary) => unary
                .param
                .reject_any()
                .into_iter()
                .map(|param| unary.def.apply(param))
                .collect(),
            Self::Binary(binary) => binary
                .def
                .xprod(&binary.first.reject_any(), &binary.second.reject_any()),
            _ => vec![self.clone()],
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::Unknown | Self::Inconsistent => f.write_str("???"),
            Self::Var(var) => var.fmt(f),
            Self::Nullary(nullary) => nullary.fmt(f),
            Self::Unary(unary) => unary.fmt(f),
            Self::Binary(binary) => binary.fmt(f),
            Self::Enum(enumeration) => enumeration.fmt(f),
            Self::Record(record) => record.fmt(f),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", self.kind())
    }
}

impl From<TypeVar> for Type {
    fn from(var: TypeVar) -> Self {
        Self::Var(var)
    }
}

impl From<NullaryType> for Type {
    fn from(nullary: NullaryType) -> Self {
        Self::Nullary(nullary)
    }
}

impl From<UnaryType> for Type {
    fn from(unary: UnaryType) -> Self {
        Self::Unary(Box::new(unary))
    }
}

impl From<BinaryType> for Type {
    fn from(binary: BinaryType) -> Self {
        Self::Binary(Box::new(binary))
    }
}

impl From<EnumType> for Type {
    fn from(enumeration: EnumType) -> Self {
        Self::Enum(enumeration)
    }
}

impl From<RecordType> for Type {
    fn from(record: RecordType) -> Self {
        Self::Record(record)
    }
}
