//! Interned identifiers.

use std::fmt;

/// Interned string identifier.
///
/// Layout: 32-bit index split into shard (4 bits) + local index (28 bits).
/// Equality and hashing compare the raw index, never the string contents.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Maximum local index per shard.
    pub const MAX_LOCAL: u32 = 0x0FFF_FFFF;

    /// Number of shards.
    pub const NUM_SHARDS: usize = 16;

    #[inline]
    pub(crate) const fn new(shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << 28) | local)
    }

    #[inline]
    pub(crate) const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    #[inline]
    pub(crate) const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Names the lowering pass introduces.
///
/// Every one starts with a double underscore. Surface programs that use
/// these spellings themselves will capture or shadow compiler bindings.
pub mod reserved {
    /// Continuation parameter of a statement closure.
    pub const K: &str = "__k";
    /// World token parameter of a statement closure.
    pub const WORLD: &str = "__world";
    /// Exit continuation of the innermost loop.
    pub const BREAK: &str = "__break";
    /// Next-iteration continuation of the innermost loop.
    pub const CONTINUE: &str = "__continue";
    /// Self-reference of a loop body.
    pub const LOOP: &str = "__loop";
    /// Remaining sequence in a `for ... in` loop.
    pub const ITER: &str = "__iter";
    /// Continuation shared by both arms of an `if` statement.
    pub const NEXT: &str = "__next";
    /// Parameter of the identity closure returned by the print intrinsic.
    pub const IDENT: &str = "__ident";
    /// Program entry point definition.
    pub const START: &str = "__start";
    /// Namespace prefix of the intrinsic table.
    pub const INTRINSIC_NAMESPACE: &str = "__core.";

    /// All binding names above, in declaration order.
    pub const BINDINGS: &[&str] = &[K, WORLD, BREAK, CONTINUE, LOOP, ITER, NEXT, IDENT, START];
}
