//! Lazy sequences.
//!
//! Forcing a [`Seq`] produces either nothing or a head item plus the rest of
//! the sequence. Nothing is computed until a node is forced, so infinite
//! sequences are fine as long as only a prefix is consumed.

use std::fmt;
use std::mem;
use std::rc::Rc;

use monadic_stack::ensure_sufficient_stack;

use crate::capability::{Capability, CapabilityFlags};
use crate::errors::{integer_overflow, unexpected_value};
use crate::value::expect_args;
use crate::{EvalResult, Evaluator, Scope, Value};

#[derive(Clone, Debug)]
pub struct SeqNode {
    pub item: Value,
    pub next: Seq,
}

#[derive(Clone)]
pub struct Seq(Rc<Node>);

enum Node {
    Empty,
    Cons { item: Value, next: Seq },
    Lazy(Box<dyn Fn() -> EvalResult<Option<SeqNode>>>),
    Append(Seq, Seq),
    Take(Seq, usize),
}

impl Node {
    /// Empty this node, moving the sequences it holds onto `pending`.
    fn unlink(&mut self, pending: &mut Vec<Seq>) {
        match mem::replace(self, Node::Empty) {
            Node::Empty | Node::Lazy(_) => {}
            Node::Cons { next, .. } | Node::Take(next, _) => pending.push(next),
            Node::Append(first, second) => {
                pending.push(first);
                pending.push(second);
            }
        }
    }
}

impl Seq {
    fn new(node: Node) -> Self {
        Seq(Rc::new(node))
    }

    pub fn from_fn(f: impl Fn() -> EvalResult<Option<SeqNode>> + 'static) -> Self {
        Seq::new(Node::Lazy(Box::new(f)))
    }

    pub fn empty() -> Self {
        Seq::new(Node::Empty)
    }

    pub fn single(item: Value) -> Self {
        Seq::cons(item, Seq::empty())
    }

    pub fn cons(item: Value, next: Seq) -> Self {
        Seq::new(Node::Cons { item, next })
    }

    /// Compute the first node. Forcing twice recomputes it.
    pub fn force(&self) -> EvalResult<Option<SeqNode>> {
        ensure_sufficient_stack(|| match &*self.0 {
            Node::Empty => Ok(None),
            Node::Cons { item, next } => Ok(Some(SeqNode {
                item: item.clone(),
                next: next.clone(),
            })),
            Node::Lazy(f) => f(),
            Node::Append(first, second) => match first.force()? {
                Some(node) => Ok(Some(SeqNode {
                    item: node.item,
                    next: node.next.append(second),
                })),
                None => second.force(),
            },
            Node::Take(seq, count) => Ok(seq.force()?.map(|node| SeqNode {
                item: node.item,
                next: node.next.take(count - 1),
            })),
        })
    }

    /// The first `count` items, lazily.
    #[must_use]
    pub fn take(&self, count: usize) -> Seq {
        if count == 0 {
            return Seq::empty();
        }
        Seq::new(Node::Take(self.clone(), count))
    }

    /// `self` followed by `other`. `other` is not forced until `self` is
    /// exhausted.
    #[must_use]
    pub fn append(&self, other: &Seq) -> Seq {
        Seq::new(Node::Append(self.clone(), other.clone()))
    }

    pub fn iter(&self) -> SeqIter {
        SeqIter {
            next: Some(self.clone()),
        }
    }

    /// Force every item. Does not terminate on an infinite sequence.
    pub fn to_vec(&self) -> EvalResult<Vec<Value>> {
        self.iter().collect()
    }

    pub fn ptr_eq(&self, other: &Seq) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Drop for Seq {
    // Long append and cons chains are unlinked with an explicit stack
    // instead of one native frame per node.
    fn drop(&mut self) {
        let Some(node) = Rc::get_mut(&mut self.0) else {
            return;
        };
        let mut pending = Vec::new();
        node.unlink(&mut pending);
        while let Some(mut seq) = pending.pop() {
            if let Some(node) = Rc::get_mut(&mut seq.0) {
                node.unlink(&mut pending);
            }
        }
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seq(<lazy>)")
    }
}

/// Forces a sequence one node per `next()`. Stops after the first error.
pub struct SeqIter {
    next: Option<Seq>,
}

impl Iterator for SeqIter {
    type Item = EvalResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let seq = self.next.take()?;
        match seq.force() {
            Ok(Some(node)) => {
                self.next = Some(node.next);
                Some(Ok(node.item))
            }
            Ok(None) => None,
            Err(error) => Some(Err(error)),
        }
    }
}

/// The empty sequence.
pub fn empty_seq() -> Seq {
    Seq::empty()
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SeqMonad;

impl SeqMonad {
    /// [`Scope::prelude`] plus the `empty_seq()` native.
    pub fn prelude() -> Scope {
        Scope::prelude().with(
            "empty_seq",
            Value::native("empty_seq", |args| {
                expect_args::<0>("empty_seq", args)?;
                Ok(Value::Seq(empty_seq()))
            }),
        )
    }
}

impl Capability for SeqMonad {
    type Wrapped = Seq;

    const NAME: &'static str = "SeqMonad";

    fn flags(&self) -> CapabilityFlags {
        CapabilityFlags::COMBINE | CapabilityFlags::DELAY
    }

    fn lift(&self, value: Value) -> EvalResult<Seq> {
        match value {
            Value::Seq(seq) => Ok(seq),
            other => Err(unexpected_value(Self::NAME, "Seq", &other)),
        }
    }

    fn unit(&self, value: Value) -> EvalResult<Seq> {
        Ok(Seq::single(value))
    }

    fn combine(&self, first: Seq, rest: Seq) -> EvalResult<Seq> {
        Ok(first.append(&rest))
    }
}

const COUNTER_SOURCE: &str = "
    if (start > end) {
        unit2(empty_seq())
    } else if (start == end) {
        unit(start)
    } else {
        unit2(rec)
    }
";

/// The integers `start..=end`, built with embedded code.
///
/// Each node's tail is produced by evaluating the same code again, only when
/// that node is forced. Empty if `start > end`.
pub fn counter(evaluator: &Evaluator<SeqMonad>, start: i64, end: i64) -> EvalResult<Seq> {
    let owner = evaluator.clone();
    let rec = Seq::from_fn(move || {
        let following = start.checked_add(1).ok_or_else(|| integer_overflow("counter"))?;
        Ok(Some(SeqNode {
            item: Value::Int(start),
            next: counter(&owner, following, end)?,
        }))
    });

    let scope = SeqMonad::prelude()
        .with("rec", rec)
        .with("start", start)
        .with("end", end);
    evaluator.evaluate(COUNTER_SOURCE, scope)
}
