use std::{collections::BTreeMap, fmt};
use tydef_types::types::{Type, TypeClass};

/// Type classes required of each type variable, keyed by variable name.
pub type Constraints = BTreeMap<String, Vec<TypeClass>>;

/// A slot of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Arg(usize),
    Return,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arg(index) => write!(f, "argument {}", index + 1),
            Self::Return => f.write_str("return value"),
        }
    }
}

/// The declared types of a function, immutable once defined.
#[derive(Debug, Clone)]
pub struct Signature {
    pub name: String,
    pub constraints: Constraints,
    pub args: Vec<Type>,
    pub ret: Type,
}

impl Signature {
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn at(&self, position: Position) -> &Type {
        match position {
            Position::Arg(index) => &self.args[index],
            Position::Return => &self.ret,
        }
    }

    /// Index of a position among all signature entries, the return type last.
    pub fn index(&self, position: Position) -> usize {
        match position {
            Position::Arg(index) => index,
            Position::Return => self.arity(),
        }
    }

    /// Argument types followed by the return type.
    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.args.iter().chain(std::iter::once(&self.ret))
    }
}

#[cfg(test)]
mod tests {
    use tydef_types::builtin;

    use super::*;

    #[test]
    fn positions() {
        let sig = Signature {
            name: "len".to_owned(),
            constraints: Constraints::new(),
            args: vec![builtin::string()],
            ret: builtin::number(),
        };
        assert_eq!(sig.arity(), 1);
        assert_eq!(sig.index(Position::Return), 1);
        assert_eq!(sig.at(Position::Return).to_string(), "Number");
        assert_eq!(sig.at(Position::Arg(0)).to_string(), "String");
        assert_eq!(sig.types().count(), 2);
        assert!(Position::Arg(8) < Position::Return);
    }
}
