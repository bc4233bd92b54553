//! Heap of lexical frames, binders, closures, tuples and intrinsic values.
//!
//! Every lookup walks from a frame towards the root through parent links.
//! A frame maps names to [`Slot`]s. Slots start unevaluated and are
//! overwritten with their value the first time they are resolved, so a
//! binding is evaluated at most once per frame.
//!
//! A binder is the deferred evaluation of one expression in one frame.
//! Arguments and tuple elements are binders. A binder shared between
//! several frames (e.g., a tuple element seen through two aliases) is
//! forced once and every holder observes the cached value.
//!
//! Forcing is not guarded against re-entry: a binding whose value depends
//! on itself without an intervening tuple or closure recurses until the
//! stack runs out.
//!
//! Everything is addressed by `u32` handles into flat vectors owned by one
//! [`Environment`]. An environment lives for a single program execution.

use smallvec::SmallVec;
use tarn_ir::{ExprId, Name};

use crate::intrinsics::Intrinsic;
use crate::value::Value;

macro_rules! handle {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

handle!(
    /// Lexical frame handle.
    ScopeId
);
handle!(
    /// Deferred expression handle.
    BinderId
);
handle!(
    /// Closure handle. Equality is closure identity.
    ClosureId
);
handle!(
    /// Tuple handle. Equality is tuple identity.
    TupleId
);
handle!(
    /// Intrinsic value handle. Every lookup of a `__core.` name and every
    /// partial application is a new value.
    IntrinsicId
);

/// Contents of one name binding.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    /// Expression to evaluate in the owning frame.
    Unevaluated(ExprId),
    /// Deferred expression owned elsewhere.
    Binder(BinderId),
    /// Cached value.
    Evaluated(Value),
}

/// State of a binder.
#[derive(Clone, Debug, PartialEq)]
pub enum BinderState {
    Unevaluated { expr: ExprId, scope: ScopeId },
    Evaluated(Value),
}

/// A single-parameter closure and the frame it captured.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Closure {
    pub parameter: Option<Name>,
    pub body: ExprId,
    pub scope: ScopeId,
}

struct Frame {
    // Most frames hold exactly one call parameter.
    bindings: SmallVec<[(Name, Slot); 1]>,
    parent: Option<ScopeId>,
}

/// Owner of all runtime storage for one execution.
pub struct Environment {
    frames: Vec<Frame>,
    binders: Vec<BinderState>,
    closures: Vec<Closure>,
    tuples: Vec<SmallVec<[BinderId; 2]>>,
    intrinsics: Vec<Intrinsic>,
}

impl Environment {
    /// Create an environment holding only an empty root frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame {
                bindings: SmallVec::new(),
                parent: None,
            }],
            binders: Vec::new(),
            closures: Vec::new(),
            tuples: Vec::new(),
            intrinsics: Vec::new(),
        }
    }

    /// The root frame, home of top-level definitions.
    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Create an empty frame under `parent`.
    pub fn child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(to_u32(self.frames.len(), "frames"));
        self.frames.push(Frame {
            bindings: SmallVec::new(),
            parent: Some(parent),
        });
        id
    }

    /// Install `name` as an unevaluated binding of `expr` in `scope`.
    ///
    /// Replaces any existing binding of `name` in that frame.
    pub fn scope(&mut self, scope: ScopeId, name: Name, expr: ExprId) {
        self.install(scope, name, Slot::Unevaluated(expr));
    }

    /// Install `name` in `scope` as an alias of an existing binder.
    pub fn rebind(&mut self, scope: ScopeId, name: Name, binder: BinderId) {
        self.install(scope, name, Slot::Binder(binder));
    }

    /// Defer `expr` in a fresh child frame of `scope`.
    pub fn bind(&mut self, scope: ScopeId, expr: ExprId) -> BinderId {
        let frame = self.child(scope);
        self.push_binder(BinderState::Unevaluated { expr, scope: frame })
    }

    /// Wrap an already computed value as a binder.
    pub fn bind_value(&mut self, value: Value) -> BinderId {
        self.push_binder(BinderState::Evaluated(value))
    }

    /// Find the nearest binding of `name`, starting at `scope`.
    ///
    /// Returns the frame that owns the binding along with its slot.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<(ScopeId, Slot)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let frame = &self.frames[id.index()];
            if let Some((_, slot)) = frame.bindings.iter().find(|(bound, _)| *bound == name) {
                return Some((id, slot.clone()));
            }
            current = frame.parent;
        }
        None
    }

    /// Overwrite the binding of `name` in `scope` with its value.
    pub fn cache(&mut self, scope: ScopeId, name: Name, value: Value) {
        self.install(scope, name, Slot::Evaluated(value));
    }

    #[inline]
    pub fn binder(&self, id: BinderId) -> &BinderState {
        &self.binders[id.index()]
    }

    /// Record the value of a forced binder.
    pub fn settle(&mut self, id: BinderId, value: Value) {
        self.binders[id.index()] = BinderState::Evaluated(value);
    }

    pub fn alloc_closure(&mut self, closure: Closure) -> ClosureId {
        let id = ClosureId(to_u32(self.closures.len(), "closures"));
        self.closures.push(closure);
        id
    }

    #[inline]
    pub fn closure(&self, id: ClosureId) -> Closure {
        self.closures[id.index()]
    }

    pub fn alloc_tuple(&mut self, elements: SmallVec<[BinderId; 2]>) -> TupleId {
        let id = TupleId(to_u32(self.tuples.len(), "tuples"));
        self.tuples.push(elements);
        id
    }

    #[inline]
    pub fn tuple(&self, id: TupleId) -> &[BinderId] {
        &self.tuples[id.index()]
    }

    pub fn alloc_intrinsic(&mut self, intrinsic: Intrinsic) -> IntrinsicId {
        let id = IntrinsicId(to_u32(self.intrinsics.len(), "intrinsic values"));
        self.intrinsics.push(intrinsic);
        id
    }

    #[inline]
    pub fn intrinsic(&self, id: IntrinsicId) -> &Intrinsic {
        &self.intrinsics[id.index()]
    }

    /// Number of frames allocated so far, root included.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn install(&mut self, scope: ScopeId, name: Name, slot: Slot) {
        let bindings = &mut self.frames[scope.index()].bindings;
        match bindings.iter_mut().find(|(bound, _)| *bound == name) {
            Some((_, existing)) => *existing = slot,
            None => bindings.push((name, slot)),
        }
    }

    fn push_binder(&mut self, state: BinderState) -> BinderId {
        let id = BinderId(to_u32(self.binders.len(), "binders"));
        self.binders.push(state);
        id
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a storage length to a `u32` handle, panicking on overflow.
#[inline]
fn to_u32(value: usize, what: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic!("too many {what}: {value} exceeds u32::MAX"))
}
