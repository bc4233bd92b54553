//! Sharded string interner.
//!
//! Interned strings are leaked, so lookups hand out `&'static str` and a
//! [`Name`] stays valid for the life of the process. Each shard sits behind
//! its own `RwLock`; concurrent readers of different shards never contend.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::name::reserved;
use crate::Name;

/// Failure to intern a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// A shard ran out of local indices.
    ShardOverflow { shard_idx: usize, count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::ShardOverflow { shard_idx, count } => write!(
                f,
                "interner shard {shard_idx} exceeded capacity: {count} strings, max is {}",
                Name::MAX_LOCAL
            ),
        }
    }
}

impl std::error::Error for InternError {}

#[derive(Default)]
struct InternShard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Sharded string interner.
pub struct StringInterner {
    shards: [RwLock<InternShard>; Name::NUM_SHARDS],
    total_count: AtomicUsize,
}

impl StringInterner {
    /// Create an interner holding the empty string and the reserved
    /// compiler names.
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(InternShard::default()));
        let interner = Self {
            shards,
            total_count: AtomicUsize::new(0),
        };

        // The empty string must land at shard 0, local 0.
        {
            let mut shard = interner.shards[0].write();
            shard.map.insert("", 0);
            shard.strings.push("");
        }
        interner.total_count.store(1, Ordering::Relaxed);

        for name in reserved::BINDINGS {
            interner.intern(name);
        }
        interner
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        let mut hash = 0u32;
        for byte in s.bytes().take(8) {
            hash = hash.wrapping_mul(31).wrapping_add(u32::from(byte));
        }
        (hash as usize) % Name::NUM_SHARDS
    }

    /// Intern a string, or report shard overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_tag = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        if let Some(&local) = shard.read().map.get(s) {
            return Ok(Name::new(shard_tag, local));
        }

        let mut guard = shard.write();
        if let Some(&local) = guard.map.get(s) {
            return Ok(Name::new(shard_tag, local));
        }

        let local = u32::try_from(guard.strings.len())
            .ok()
            .filter(|&local| local <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow {
                shard_idx,
                count: guard.strings.len(),
            })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        self.total_count.fetch_add(1, Ordering::Relaxed);

        Ok(Name::new(shard_tag, local))
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if a shard exceeds capacity. Use [`Self::try_intern`] to
    /// handle that case.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up an interned name without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_tag = shard_idx as u32;
        let local = *self.shards[shard_idx].read().map.get(s)?;
        Some(Name::new(shard_tag, local))
    }

    /// The string a `Name` was interned from.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards[name.shard()].read().strings[name.local()]
    }

    /// Number of interned strings, the empty string included.
    pub fn len(&self) -> usize {
        self.total_count.load(Ordering::Relaxed)
    }

    /// Always false: the empty string is pre-interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
