//! Composable arbitraries: generation with integrated shrinking.

use std::rc::Rc;

use crate::random::Random;
use crate::shrinkable::{Mapper, Predicate, Shrinkable};

type GenFn<T> = Rc<dyn Fn(&mut Random) -> Shrinkable<T>>;
type FlatMapper<S, T> = Rc<dyn Fn(&S) -> Arbitrary<T>>;

/// A composable producer of shrinkable values.
///
/// An arbitrary is an immutable value: every combinator returns a new
/// producer and never mutates the receiver. Cloning is cheap (shared
/// internals). The algebra is a closed set of kinds, so `generate` and
/// `with_bias` are plain dispatch rather than open-ended subtyping.
#[derive(Clone)]
pub struct Arbitrary<T: Clone + 'static> {
    kind: Kind<T>,
}

#[derive(Clone)]
enum Kind<T: Clone + 'static> {
    /// Leaf producer: a generate function, plus an optional boundary-favoring
    /// variant that `with_bias` switches in.
    Base {
        generate: GenFn<T>,
        biased: Option<GenFn<T>>,
    },
    /// Rejection sampling over the inner producer; the predicate also
    /// restricts every shrink descendant.
    Filtered {
        inner: Rc<Arbitrary<T>>,
        predicate: Predicate<T>,
    },
    /// Value-transformed producer; source type erased behind [`Stage`].
    Mapped(Rc<dyn Stage<T>>),
    /// Dependent composition; source type erased behind [`Stage`].
    Chained(Rc<dyn Stage<T>>),
    /// Same values as the inner producer, but every node is a leaf.
    NoShrink(Rc<Arbitrary<T>>),
    /// One draw in `frequency` uses the boundary-favoring generate function.
    Biased {
        inner: Rc<Arbitrary<T>>,
        biased: GenFn<T>,
        frequency: u64,
    },
    /// Ignores any `with_bias` applied by an enclosing combinator chain.
    Unbiased(Rc<Arbitrary<T>>),
}

impl<T: Clone + 'static> std::fmt::Debug for Arbitrary<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arbitrary").finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> Arbitrary<T> {
    /// Create a leaf producer from a generate function.
    pub fn new<F>(generate: F) -> Self
    where
        F: Fn(&mut Random) -> Shrinkable<T> + 'static,
    {
        Arbitrary {
            kind: Kind::Base {
                generate: Rc::new(generate),
                biased: None,
            },
        }
    }

    /// Create a leaf producer with an opt-in boundary-favoring variant.
    ///
    /// Without `with_bias` the producer behaves exactly like
    /// [`Arbitrary::new`] with `generate`; under `with_bias(freq)` roughly
    /// one draw in `freq` uses `biased` instead.
    pub fn new_with_bias<F, B>(generate: F, biased: B) -> Self
    where
        F: Fn(&mut Random) -> Shrinkable<T> + 'static,
        B: Fn(&mut Random) -> Shrinkable<T> + 'static,
    {
        Arbitrary {
            kind: Kind::Base {
                generate: Rc::new(generate),
                biased: Some(Rc::new(biased)),
            },
        }
    }

    /// Create a producer that always yields `value`, with no shrinks.
    pub fn constant(value: T) -> Self {
        Arbitrary::new(move |_rng| Shrinkable::leaf(value.clone()))
    }

    /// Generate a value along with its shrink candidates.
    ///
    /// Deterministic: replaying from a snapshot of the same source state
    /// yields an identical node, however deep the combinator chain.
    pub fn generate(&self, rng: &mut Random) -> Shrinkable<T> {
        match &self.kind {
            Kind::Base { generate, .. } => generate(rng),
            Kind::Filtered { inner, predicate } => {
                // Unbounded rejection sampling: a predicate the inner
                // producer can never satisfy does not terminate.
                let mut shrinkable = inner.generate(rng);
                while !predicate(shrinkable.value()) {
                    shrinkable = inner.generate(rng);
                }
                shrinkable.filter_rc(predicate.clone())
            }
            Kind::Mapped(stage) | Kind::Chained(stage) => stage.generate(rng),
            Kind::NoShrink(inner) => Shrinkable::leaf(inner.generate(rng).into_value()),
            Kind::Biased {
                inner,
                biased,
                frequency,
            } => {
                if rng.next_bounded(*frequency) == 0 {
                    biased(rng)
                } else {
                    inner.generate(rng)
                }
            }
            Kind::Unbiased(inner) => inner.generate(rng),
        }
    }

    /// Keep only values satisfying `predicate`, at the root and at every
    /// shrink descendant.
    ///
    /// Generation retries until the inner producer emits a satisfying value;
    /// if it never does, `generate` loops forever. Callers own that contract.
    pub fn filter<P>(&self, predicate: P) -> Arbitrary<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        self.filter_rc(Rc::new(predicate))
    }

    fn filter_rc(&self, predicate: Predicate<T>) -> Arbitrary<T> {
        Arbitrary {
            kind: Kind::Filtered {
                inner: Rc::new(self.clone()),
                predicate,
            },
        }
    }

    /// Transform every produced value with `mapper`, preserving the shrink
    /// tree's topology.
    ///
    /// `mapper` must be total and deterministic; a panic inside it propagates
    /// unmodified out of `generate` and shrink enumeration.
    pub fn map<U, F>(&self, mapper: F) -> Arbitrary<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> U + 'static,
    {
        self.map_rc(Rc::new(mapper))
    }

    fn map_rc<U: Clone + 'static>(&self, mapper: Mapper<T, U>) -> Arbitrary<U> {
        Arbitrary {
            kind: Kind::Mapped(Rc::new(MapStage {
                inner: self.clone(),
                mapper,
            })),
        }
    }

    /// Dependent composition: draw a base value, then generate from the
    /// producer `fmapper` builds for it.
    ///
    /// Both draws run on a single stream forked from the incoming source, so
    /// the caller's source advances by exactly one step and repeated `chain`
    /// compositions stay reproducible. The result shrinks only through the
    /// dependent producer; the base value's own candidates are not explored.
    pub fn chain<U, F>(&self, fmapper: F) -> Arbitrary<U>
    where
        U: Clone + 'static,
        F: Fn(&T) -> Arbitrary<U> + 'static,
    {
        self.chain_rc(Rc::new(fmapper))
    }

    fn chain_rc<U: Clone + 'static>(&self, fmapper: FlatMapper<T, U>) -> Arbitrary<U> {
        Arbitrary {
            kind: Kind::Chained(Rc::new(ChainStage {
                inner: self.clone(),
                fmapper,
            })),
        }
    }

    /// Same values, but every generated node is a shrink-tree leaf.
    pub fn no_shrink(&self) -> Arbitrary<T> {
        Arbitrary {
            kind: Kind::NoShrink(Rc::new(self.clone())),
        }
    }

    /// Favor boundary values roughly one draw in `frequency`.
    ///
    /// Bias is opt-in per leaf producer: a leaf built without a boundary
    /// variant is returned unchanged. Combinators recurse into their inner
    /// producer. `frequency` must be at least 2.
    pub fn with_bias(&self, frequency: u64) -> Arbitrary<T> {
        debug_assert!(frequency >= 2, "with_bias requires a frequency of at least 2");
        match &self.kind {
            Kind::Base {
                biased: Some(biased),
                ..
            } => Arbitrary {
                kind: Kind::Biased {
                    inner: Rc::new(self.clone()),
                    biased: biased.clone(),
                    frequency,
                },
            },
            Kind::Base { biased: None, .. } => self.clone(),
            Kind::Filtered { inner, predicate } => {
                inner.with_bias(frequency).filter_rc(predicate.clone())
            }
            Kind::Mapped(stage) | Kind::Chained(stage) => stage.with_bias(frequency),
            Kind::NoShrink(inner) => inner.with_bias(frequency).no_shrink(),
            Kind::Biased { inner, .. } => inner.with_bias(frequency),
            Kind::Unbiased(_) => self.clone(),
        }
    }

    /// Pin this producer to its unbiased behavior, regardless of any
    /// `with_bias` applied by an enclosing combinator chain.
    pub fn no_bias(&self) -> Arbitrary<T> {
        Arbitrary {
            kind: Kind::Unbiased(Rc::new(self.clone())),
        }
    }
}

/// A combinator stage whose source type is erased.
///
/// `Mapped` and `Chained` produce a `T` from some hidden source type, so the
/// enum cannot hold their inner producers directly; this trait carries the
/// two dispatched operations across the erasure.
trait Stage<T: Clone + 'static> {
    fn generate(&self, rng: &mut Random) -> Shrinkable<T>;
    fn with_bias(&self, frequency: u64) -> Arbitrary<T>;
}

struct MapStage<S: Clone + 'static, T: Clone + 'static> {
    inner: Arbitrary<S>,
    mapper: Mapper<S, T>,
}

impl<S: Clone + 'static, T: Clone + 'static> Stage<T> for MapStage<S, T> {
    fn generate(&self, rng: &mut Random) -> Shrinkable<T> {
        self.inner.generate(rng).map_rc(self.mapper.clone())
    }

    fn with_bias(&self, frequency: u64) -> Arbitrary<T> {
        self.inner.with_bias(frequency).map_rc(self.mapper.clone())
    }
}

struct ChainStage<S: Clone + 'static, T: Clone + 'static> {
    inner: Arbitrary<S>,
    fmapper: FlatMapper<S, T>,
}

impl<S: Clone + 'static, T: Clone + 'static> Stage<T> for ChainStage<S, T> {
    fn generate(&self, rng: &mut Random) -> Shrinkable<T> {
        let mut forked = rng.split();
        let base = self.inner.generate(&mut forked);
        (self.fmapper)(base.value()).generate(&mut forked)
    }

    fn with_bias(&self, frequency: u64) -> Arbitrary<T> {
        self.inner.with_bias(frequency).chain_rc(self.fmapper.clone())
    }
}
