//! Runtime values of the embedded language.
//!
//! Besides plain data, a `Value` can carry the wrapped type of any built-in
//! capability (`State`, `Seq`, `Coroutine`) so that host functions and
//! embedded code can pass composed values around like any other value.
//! Heap payloads sit behind `Rc`; cloning a value never deep-copies.

use std::fmt;
use std::rc::Rc;

use crate::monads::{Coroutine, Seq, StateFn};
use crate::{errors, EvalResult};

/// Signature of a host function callable from embedded code.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult;

/// A named host function.
#[derive(Clone)]
pub struct NativeFunction {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn new(name: &str, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        NativeFunction {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> EvalResult {
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native {}>", self.name)
    }
}

/// Identity comparison: two natives are equal only if they share a closure.
impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<Vec<Value>>),

    // Optional / Result payloads
    Some(Rc<Value>),
    None,
    Ok(Rc<Value>),
    Err(Rc<Value>),

    Function(NativeFunction),

    // Wrapped types of the lazy capabilities
    State(StateFn),
    Seq(Seq),
    Coroutine(Coroutine),
}

impl Value {
    #[inline]
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    #[inline]
    pub fn some(value: Value) -> Self {
        Value::Some(Rc::new(value))
    }

    #[inline]
    pub fn ok(value: Value) -> Self {
        Value::Ok(Rc::new(value))
    }

    #[inline]
    pub fn err(value: Value) -> Self {
        Value::Err(Rc::new(value))
    }

    /// Wrap a host closure as a callable value.
    pub fn native(name: &str, func: impl Fn(&[Value]) -> EvalResult + 'static) -> Self {
        Value::Function(NativeFunction::new(name, func))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Some(_) | Value::None => "Option",
            Value::Ok(_) | Value::Err(_) => "Result",
            Value::Function(_) => "function",
            Value::State(_) => "State",
            Value::Seq(_) => "Seq",
            Value::Coroutine(_) => "Coroutine",
        }
    }

    /// `true` for `Int` and `Float`.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(errors::type_mismatch("bool", other)),
        }
    }

    pub fn as_int(&self) -> EvalResult<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(errors::type_mismatch("int", other)),
        }
    }

    pub fn as_str(&self) -> EvalResult<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(errors::type_mismatch("str", other)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Some(v) => write!(f, "Some({v:?})"),
            Value::None => write!(f, "None"),
            Value::Ok(v) => write!(f, "Ok({v:?})"),
            Value::Err(v) => write!(f, "Err({v:?})"),
            Value::Function(func) => write!(f, "Function({func:?})"),
            Value::State(_) => write!(f, "State(<fn>)"),
            Value::Seq(_) => write!(f, "Seq(<lazy>)"),
            Value::Coroutine(_) => write!(f, "Coroutine(<fn>)"),
        }
    }
}

/// Display form used by string concatenation in embedded code.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Some(v) => write!(f, "Some({v})"),
            Value::None => f.write_str("None"),
            Value::Ok(v) => write!(f, "Ok({v})"),
            Value::Err(v) => write!(f, "Err({v})"),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::State(_) | Value::Seq(_) | Value::Coroutine(_) => {
                write!(f, "<{}>", self.type_name())
            }
        }
    }
}

/// Structural equality for data, identity for functions and lazy values.
///
/// `Int` and `Float` compare numerically, so `1 == 1.0`.
impl PartialEq for Value {
    #[expect(
        clippy::float_cmp,
        reason = "embedded `==` compares floats exactly"
    )]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            #[expect(
                clippy::cast_precision_loss,
                reason = "mixed int/float comparison promotes to float"
            )]
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Some(a), Value::Some(b))
            | (Value::Ok(a), Value::Ok(b))
            | (Value::Err(a), Value::Err(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::State(a), Value::State(b)) => a.ptr_eq(b),
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            (Value::Coroutine(a), Value::Coroutine(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Option<Value>> for Value {
    fn from(option: Option<Value>) -> Self {
        option.map_or(Value::None, Value::some)
    }
}

impl From<Result<Value, Value>> for Value {
    fn from(result: Result<Value, Value>) -> Self {
        match result {
            Ok(v) => Value::ok(v),
            Err(e) => Value::err(e),
        }
    }
}

impl From<StateFn> for Value {
    fn from(f: StateFn) -> Self {
        Value::State(f)
    }
}

impl From<Seq> for Value {
    fn from(seq: Seq) -> Self {
        Value::Seq(seq)
    }
}

impl From<Coroutine> for Value {
    fn from(c: Coroutine) -> Self {
        Value::Coroutine(c)
    }
}

/// Take exactly `N` arguments, or fail with `ArityMismatch` naming `function`.
pub fn expect_args<'a, const N: usize>(
    function: &str,
    args: &'a [Value],
) -> EvalResult<&'a [Value; N]> {
    args.try_into()
        .map_err(|_| errors::arity_mismatch(function, N, args.len()))
}
