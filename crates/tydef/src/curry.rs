use log::trace;
use std::{fmt, rc::Rc};
use tydef_types::{env::Env, types::Type};
use tydef_value::{Date, Function, List, Object, RegExp, Value};

use crate::{
    context::Context,
    error::TypeError,
    report,
    signature::{Position, Signature},
    verify::Verifier,
};

pub type Implementation = Rc<dyn Fn(&[Value]) -> Value>;

/// An argument of a curried call.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    /// Leaves the position pending for a later call.
    Placeholder,
}

/// The placeholder token.
pub const __: Arg = Arg::Placeholder;

macro_rules! impl_arg_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Value(value.into())
                }
            }
        )*
    };
}

impl_arg_from!(
    Value,
    bool,
    f64,
    i32,
    u32,
    &str,
    String,
    Date,
    RegExp,
    Function,
    List,
    Object,
    Vec<Value>,
);

/// A defined function: its signature, environment and implementation.
pub(crate) struct Definition {
    pub signature: Signature,
    pub env: Env,
    pub check_types: bool,
    pub implementation: Implementation,
}

impl Definition {
    fn check_arg(&self, ctx: &mut Context, index: usize, value: &Value) -> Result<(), TypeError> {
        let position = Position::Arg(index);
        let ty = &self.signature.args[index];
        if !ty.test(value) || self.verify(ctx, position, value)?.is_empty() {
            return Err(self.invalid_value(position, value));
        }
        Ok(())
    }

    /// Return values are only rejected by their declared type or by conflicting
    /// with variables bound by the arguments.
    fn check_return(&self, ctx: &mut Context, value: &Value) -> Result<(), TypeError> {
        if !self.signature.ret.test(value) {
            return Err(self.invalid_value(Position::Return, value));
        }
        self.verify(ctx, Position::Return, value)?;
        Ok(())
    }

    fn verify(
        &self,
        ctx: &mut Context,
        position: Position,
        value: &Value,
    ) -> Result<Vec<Type>, TypeError> {
        let ty = self.signature.at(position);
        Verifier::new(&self.signature, &self.env, ctx, position).verify(
            ty,
            std::slice::from_ref(value),
            &[],
        )
    }

    fn invalid_value(&self, position: Position, value: &Value) -> TypeError {
        let diag = report::invalid_value(&self.signature, &self.env, position, value);
        TypeError::InvalidValue(Box::new(diag))
    }
}

/// The outcome of applying a curried function.
#[derive(Debug, Clone)]
pub enum Applied {
    /// Positions remain pending.
    Partial(Curried),
    /// The implementation ran and returned this value.
    Done(Value),
}

impl Applied {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Done(value) => Some(value),
            Self::Partial(_) => None,
        }
    }

    pub fn into_curried(self) -> Option<Curried> {
        match self {
            Self::Partial(curried) => Some(curried),
            Self::Done(_) => None,
        }
    }
}

/// A function awaiting some or all of its arguments.
///
/// Applying never mutates the receiver, so one partial application can be
/// continued along several branches.
#[derive(Clone)]
pub struct Curried {
    def: Rc<Definition>,
    ctx: Context,
    values: Vec<Option<Value>>,
    pending: Vec<usize>,
}

impl Curried {
    pub(crate) fn new(def: Rc<Definition>) -> Self {
        let arity = def.signature.arity();
        Self {
            def,
            ctx: Context::new(),
            values: vec![None; arity],
            pending: (0..arity).collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.def.signature.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.def.signature.arity()
    }

    /// Indices of the positions still awaiting a value.
    #[inline]
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn signature(&self) -> &Signature {
        &self.def.signature
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Supplies arguments to the pending positions in order.
    ///
    /// Once no position is pending the implementation runs exactly once.
    pub fn apply<I>(&self, args: I) -> Result<Applied, TypeError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        let def = &self.def;
        let arity = self.arity();
        trace!(
            "Applying `{}` to {} arguments, pending {:?}",
            self.name(),
            args.len(),
            self.pending
        );

        if def.check_types && args.len() > self.pending.len() {
            return Err(TypeError::Arity {
                name: self.name().to_owned(),
                expected: arity,
                received: arity - self.pending.len() + args.len(),
            });
        }

        let mut ctx = self.ctx.clone();
        let mut values = self.values.clone();
        let mut pending = Vec::new();
        for (i, &index) in self.pending.iter().enumerate() {
            match args.get(i) {
                Some(Arg::Value(value)) => {
                    if def.check_types {
                        def.check_arg(&mut ctx, index, value)?;
                    }
                    values[index] = Some(value.clone());
                }
                Some(Arg::Placeholder) | None => pending.push(index),
            }
        }

        if !pending.is_empty() {
            return Ok(Applied::Partial(Self {
                def: Rc::clone(def),
                ctx,
                values,
                pending,
            }));
        }

        let values: Vec<Value> = values.into_iter().flatten().collect();
        let result = (def.implementation)(&values);
        if def.check_types {
            def.check_return(&mut ctx, &result)?;
        }
        Ok(Applied::Done(result))
    }

    /// Applies and expects the call to saturate.
    pub fn call<I>(&self, args: I) -> Result<Value, TypeError>
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        match self.apply(args)? {
            Applied::Done(value) => Ok(value),
            Applied::Partial(curried) => Err(TypeError::Unsaturated {
                name: curried.name().to_owned(),
                pending: curried.pending,
            }),
        }
    }
}

impl fmt::Debug for Curried {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curried")
            .field("name", &self.name())
            .field("pending", &self.pending)
            .field("values", &self.values)
            .finish()
    }
}
