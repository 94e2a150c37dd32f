//! Shrinkable values: a generated value plus its lazy tree of smaller candidates.

use std::rc::Rc;

/// A fresh enumeration of shrink candidates.
pub type ShrinkIter<T> = Box<dyn Iterator<Item = Shrinkable<T>>>;

pub(crate) type ShrinkFn<T> = Rc<dyn Fn() -> ShrinkIter<T>>;
pub(crate) type Predicate<T> = Rc<dyn Fn(&T) -> bool>;
pub(crate) type Mapper<S, T> = Rc<dyn Fn(&S) -> T>;

/// A generated value paired with a lazy sequence of strictly-smaller values.
///
/// The sequence is re-enumerable and may be conceptually infinite: each call
/// to [`Shrinkable::shrinks`] produces a fresh iterator, and enumeration may
/// recompute candidates (no caching is guaranteed). Nodes are immutable once
/// created.
#[derive(Clone)]
pub struct Shrinkable<T: Clone + 'static> {
    value: T,
    shrink: ShrinkFn<T>,
}

impl<T: Clone + 'static> Shrinkable<T> {
    /// Create a node with no shrink candidates.
    pub fn leaf(value: T) -> Self {
        Shrinkable::new(value, || Box::new(std::iter::empty()) as ShrinkIter<T>)
    }

    /// Create a node whose candidates are produced on demand by `shrink`.
    pub fn new<F>(value: T, shrink: F) -> Self
    where
        F: Fn() -> ShrinkIter<T> + 'static,
    {
        Shrinkable {
            value,
            shrink: Rc::new(shrink),
        }
    }

    /// The generated value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consume the node, keeping only its value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Enumerate the strictly-smaller candidates, lazily.
    pub fn shrinks(&self) -> ShrinkIter<T> {
        (self.shrink)()
    }

    /// Transform every value in the tree, preserving its topology.
    pub fn map<U, F>(&self, mapper: F) -> Shrinkable<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        self.map_rc(Rc::new(mapper))
    }

    pub(crate) fn map_rc<U: Clone + 'static>(&self, mapper: Mapper<T, U>) -> Shrinkable<U> {
        let value = mapper(&self.value);
        let shrink = self.shrink.clone();
        Shrinkable::new(value, move || {
            let mapper = mapper.clone();
            Box::new((shrink)().map(move |child| child.map_rc(mapper.clone())))
        })
    }

    /// Restrict the shrink sequence to descendants satisfying `predicate`.
    ///
    /// The node's own value is assumed to satisfy the predicate already. A
    /// rejected candidate is dropped but its own descendants are still
    /// explored, so a failing intermediate value never cuts off the
    /// satisfying values below it.
    pub fn filter<P>(&self, predicate: P) -> Shrinkable<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.filter_rc(Rc::new(predicate))
    }

    pub(crate) fn filter_rc(&self, predicate: Predicate<T>) -> Shrinkable<T> {
        let shrink = self.shrink.clone();
        Shrinkable::new(self.value.clone(), move || {
            Box::new(FilterShrinks {
                stack: vec![(shrink)()],
                predicate: predicate.clone(),
            })
        })
    }

    /// Snapshot this node as a resumable shrink candidate.
    pub fn candidate(&self) -> Candidate<T> {
        Candidate {
            value: self.value.clone(),
            context: Context(self.shrink.clone()),
        }
    }
}

/// Lazy depth-first expansion of a shrink sequence under a predicate.
///
/// Accepted candidates are yielded (re-filtered so the restriction holds
/// transitively); rejected candidates are replaced inline by their own
/// shrink sequences.
struct FilterShrinks<T: Clone + 'static> {
    stack: Vec<ShrinkIter<T>>,
    predicate: Predicate<T>,
}

impl<T: Clone + 'static> Iterator for FilterShrinks<T> {
    type Item = Shrinkable<T>;

    fn next(&mut self) -> Option<Shrinkable<T>> {
        while let Some(top) = self.stack.last_mut() {
            match top.next() {
                Some(candidate) => {
                    if (self.predicate)(candidate.value()) {
                        return Some(candidate.filter_rc(self.predicate.clone()));
                    }
                    self.stack.push(candidate.shrinks());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}

/// A shrink candidate: a value plus the opaque token needed to resume the
/// search from it without recomputing earlier steps.
pub struct Candidate<T: Clone + 'static> {
    value: T,
    context: Context<T>,
}

/// Opaque continuation token. Only the producer that issued it interprets it.
#[derive(Clone)]
pub struct Context<T: Clone + 'static>(ShrinkFn<T>);

impl<T: Clone + 'static> Candidate<T> {
    /// The candidate value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// One shrink step: the strictly-smaller candidates reachable from here.
    pub fn shrink_step(&self) -> impl Iterator<Item = Candidate<T>> {
        (self.context.0)().map(|shrinkable| shrinkable.candidate())
    }
}
