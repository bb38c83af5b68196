//! Name bindings visible to embedded code.
//!
//! A `Scope` is a base map shared behind an `Rc` plus a chain of
//! single-binding frames. Cloning is a reference-count bump and extending
//! pushes one frame, so each `bind` continuation can extend its own copy
//! without disturbing the copy held by the caller or by sibling
//! continuations. Lookup walks the frames innermost first, then the base.

use std::fmt;
use std::rc::Rc;

use monadic_ir::Name;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::value::expect_args;
use crate::{EvalError, EvalResult, Value};

/// Names embedded code may not bind with `let` or `bind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReservedName {
    Code,
    Context,
    Head,
    Result,
}

impl ReservedName {
    pub const ALL: [ReservedName; 4] = [
        ReservedName::Code,
        ReservedName::Context,
        ReservedName::Head,
        ReservedName::Result,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReservedName::Code => "_code",
            ReservedName::Context => "_context",
            ReservedName::Head => "_head",
            ReservedName::Result => "_result",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == name)
    }

    /// Fail with `ReservedName` if `name` is reserved.
    pub fn check(name: &str) -> EvalResult<()> {
        match Self::from_name(name) {
            Some(name) => Err(EvalError::ReservedName { name }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ReservedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Default)]
pub struct Scope {
    base: Rc<FxHashMap<Name, Value>>,
    frames: Option<Rc<Frame>>,
}

/// One binding pushed on top of a shared base.
struct Frame {
    name: Name,
    value: Value,
    /// Whether this frame or one below it binds a name the base also binds.
    shadows_base: bool,
    parent: Option<Rc<Frame>>,
}

impl Frame {
    fn ancestors(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(Some(self), |frame| frame.parent.as_deref())
    }
}

impl Drop for Frame {
    // Unlink the chain one frame at a time so a long chain does not
    // recurse once per binding.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(frame) = parent {
            match Rc::try_unwrap(frame) {
                Ok(mut frame) => parent = frame.parent.take(),
                Err(_) => break,
            }
        }
    }
}

impl Scope {
    /// An empty scope.
    pub fn new() -> Self {
        Scope::default()
    }

    /// A scope holding the `Some`, `None`, `Ok` and `Err` constructors.
    pub fn prelude() -> Self {
        Scope::new()
            .with(
                "Some",
                Value::native("Some", |args| {
                    let [value] = expect_args::<1>("Some", args)?;
                    Ok(Value::some(value.clone()))
                }),
            )
            .with("None", Value::None)
            .with(
                "Ok",
                Value::native("Ok", |args| {
                    let [value] = expect_args::<1>("Ok", args)?;
                    Ok(Value::ok(value.clone()))
                }),
            )
            .with(
                "Err",
                Value::native("Err", |args| {
                    let [value] = expect_args::<1>("Err", args)?;
                    Ok(Value::err(value.clone()))
                }),
            )
    }

    /// Builder form of [`Scope::bind`].
    #[must_use]
    pub fn with(mut self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
        self.bind(name, value);
        self
    }

    /// Bind `name`, shadowing any earlier binding.
    ///
    /// An unshared scope with no frames writes into its base map; otherwise
    /// the binding becomes a new frame and clones are left as they were.
    pub fn bind(&mut self, name: impl Into<Name>, value: impl Into<Value>) {
        let (name, value) = (name.into(), value.into());
        if self.frames.is_none() {
            if let Some(base) = Rc::get_mut(&mut self.base) {
                base.insert(name, value);
                return;
            }
        }
        let parent = self.frames.take();
        let shadows_base = self.base.contains_key(&name)
            || parent.as_ref().is_some_and(|frame| frame.shadows_base);
        self.frames = Some(Rc::new(Frame {
            name,
            value,
            shadows_base,
            parent,
        }));
    }

    /// A copy of this scope with `name` bound; `self` is unchanged.
    ///
    /// Constant time: the copy shares every existing binding.
    #[must_use]
    pub fn extend(&self, name: impl Into<Name>, value: impl Into<Value>) -> Self {
        self.clone().with(name, value)
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let shadowed = self.frames.as_ref().is_some_and(|frame| frame.shadows_base);
        if !shadowed {
            if let Some(value) = self.base.get(name) {
                return Some(value);
            }
        }
        self.frames
            .as_deref()
            .and_then(|top| top.ancestors().find(|frame| frame.name.as_str() == name))
            .map(|frame| &frame.value)
            .or_else(|| self.base.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// The number of distinct names bound.
    pub fn len(&self) -> usize {
        self.names().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_none() && self.base.is_empty()
    }

    fn names(&self) -> FxHashSet<&str> {
        let mut names: FxHashSet<&str> = self.base.keys().map(Name::as_str).collect();
        if let Some(top) = self.frames.as_deref() {
            names.extend(top.ancestors().map(|frame| frame.name.as_str()));
        }
        names
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().into_iter().collect();
        names.sort_unstable();
        f.debug_struct("Scope").field("names", &names).finish()
    }
}
