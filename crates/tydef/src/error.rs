use derive_more::Display;
use thiserror::Error;
use tydef_diag::Diagnostic;

const NUMBERS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// `n` spelled out for small numbers.
pub fn number_word(n: usize) -> String {
    NUMBERS
        .get(n)
        .map_or_else(|| n.to_string(), |word| (*word).to_owned())
}

fn num_args(n: &usize) -> String {
    match n {
        1 => "one argument".to_owned(),
        n => format!("{} arguments", number_word(*n)),
    }
}

fn ceiling(max: &usize) -> String {
    number_word(*max)
}

fn awaiting(pending: &[usize]) -> String {
    let positions: Vec<String> = pending.iter().map(|i| (i + 1).to_string()).collect();
    format!("{} at positions {}", num_args(&pending.len()), positions.join(", "))
}

/// Malformed definitions, detected before any call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("‘def’ cannot define a function with arity greater than {}", ceiling(.max))]
    ArityTooLarge { max: usize },
    #[error("Definition of ‘{name}’ lacks a return type")]
    MissingReturnType { name: String },
    #[error("Definition of ‘{name}’ references {missing} which is not in the environment:\n\n{env}")]
    NotInEnvironment {
        name: String,
        missing: String,
        env: String,
    },
}

/// Fieldless tag of a [`TypeError`].
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Definition,
    Arity,
    InvalidValue,
    ConstraintViolation,
    TypeVariableConflict,
    Unsaturated,
}

#[derive(Debug, Clone, Error)]
pub enum TypeError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error("‘{name}’ requires {}; received {}", num_args(.expected), num_args(.received))]
    Arity {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("{0}")]
    InvalidValue(Box<Diagnostic>),
    #[error("{0}")]
    ConstraintViolation(Box<Diagnostic>),
    #[error("{0}")]
    TypeVariableConflict(Box<Diagnostic>),
    #[error("‘{name}’ is still awaiting {}", awaiting(.pending))]
    Unsaturated { name: String, pending: Vec<usize> },
}

impl TypeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Definition(_) => ErrorKind::Definition,
            Self::Arity { .. } => ErrorKind::Arity,
            Self::InvalidValue(_) => ErrorKind::InvalidValue,
            Self::ConstraintViolation(_) => ErrorKind::ConstraintViolation,
            Self::TypeVariableConflict(_) => ErrorKind::TypeVariableConflict,
            Self::Unsaturated { .. } => ErrorKind::Unsaturated,
        }
    }

    /// The structured report of value level failures.
    pub fn report(&self) -> Option<&Diagnostic> {
        match self {
            Self::InvalidValue(diag)
            | Self::ConstraintViolation(diag)
            | Self::TypeVariableConflict(diag) => Some(diag),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_message() {
        let err = TypeError::Arity {
            name: "f".to_owned(),
            expected: 3,
            received: 4,
        };
        assert_eq!(err.to_string(), "‘f’ requires three arguments; received four arguments");
        assert_eq!(err.kind(), ErrorKind::Arity);
        assert!(err.report().is_none());
    }

    #[test]
    fn singular_and_large_counts() {
        let err = TypeError::Arity {
            name: "g".to_owned(),
            expected: 1,
            received: 12,
        };
        assert_eq!(err.to_string(), "‘g’ requires one argument; received 12 arguments");
    }

    #[test]
    fn definition_messages() {
        let err: TypeError = DefinitionError::ArityTooLarge { max: 9 }.into();
        assert_eq!(
            err.to_string(),
            "‘def’ cannot define a function with arity greater than nine"
        );
        assert_eq!(err.kind(), ErrorKind::Definition);
    }

    #[test]
    fn unsaturated_message() {
        let err = TypeError::Unsaturated {
            name: "f".to_owned(),
            pending: vec![0, 2],
        };
        assert_eq!(err.to_string(), "‘f’ is still awaiting two arguments at positions 1, 3");
    }
}
