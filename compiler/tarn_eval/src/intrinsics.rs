//! Host-provided functions under the `__core.` namespace.
//!
//! Intrinsics are curried like every other callable: each call takes one
//! argument. Two-argument intrinsics return a partially applied
//! [`Intrinsic`] carrying the first argument they received. Call folding
//! applies surface arguments last-first, so `str_cat(a, b)` hands `b` over
//! first and `a` second.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use tarn_ir::{reserved, Name, StringInterner};

use crate::value::integral_index;

/// An intrinsic function value.
#[derive(Clone, Debug, PartialEq)]
pub enum Intrinsic {
    /// Deliver the rendered argument to the print sink.
    PrintStmt,
    /// Render any value to its display string.
    ToStr,
    /// Whether the argument is `void`; ends `for ... in` loops.
    IsVoid,
    /// String concatenation, waiting for its right operand.
    StrCat,
    /// String concatenation holding its right operand.
    StrCatOnto(Rc<str>),
    /// String split, waiting for its delimiter.
    StrSplit,
    /// String split holding its delimiter.
    StrSplitOn(Delimiter),
    /// Abort evaluation with the rendered argument.
    Err,
}

/// Where `str_split` divides its string.
#[derive(Clone, Debug, PartialEq)]
pub enum Delimiter {
    /// At the first occurrence of this text.
    Text(Rc<str>),
    /// Before the character at this index.
    Index(f64),
}

impl Intrinsic {
    /// Unqualified name, used for display and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Intrinsic::PrintStmt => "print_stmt",
            Intrinsic::ToStr => "to_str",
            Intrinsic::IsVoid => "is_void",
            Intrinsic::StrCat | Intrinsic::StrCatOnto(_) => "str_cat",
            Intrinsic::StrSplit | Intrinsic::StrSplitOn(_) => "str_split",
            Intrinsic::Err => "err",
        }
    }
}

/// Entry points, keyed by unqualified name.
const ENTRIES: &[Intrinsic] = &[
    Intrinsic::PrintStmt,
    Intrinsic::ToStr,
    Intrinsic::IsVoid,
    Intrinsic::StrCat,
    Intrinsic::StrSplit,
    Intrinsic::Err,
];

/// Intrinsic lookup by fully qualified interned name.
///
/// Consulted before scope resolution, so intrinsic names cannot be
/// shadowed by program bindings.
pub struct IntrinsicTable {
    entries: FxHashMap<Name, Intrinsic>,
}

impl IntrinsicTable {
    /// Intern every `__core.` entry point.
    pub fn new(interner: &StringInterner) -> Self {
        let entries = ENTRIES
            .iter()
            .map(|intrinsic| {
                let qualified = format!("{}{}", reserved::INTRINSIC_NAMESPACE, intrinsic.name());
                (interner.intern(&qualified), intrinsic.clone())
            })
            .collect();
        IntrinsicTable { entries }
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<&Intrinsic> {
        self.entries.get(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whether `text` names something in the intrinsic namespace.
pub(crate) fn is_intrinsic_name(text: &str) -> bool {
    text.starts_with(reserved::INTRINSIC_NAMESPACE)
}

/// Split `text` before its `index`-th character.
///
/// Returns `None` for negative, fractional or out-of-range indexes.
/// `index == char count` splits off an empty tail.
pub(crate) fn split_at_char(text: &str, index: f64) -> Option<(&str, &str)> {
    let index = integral_index(index)?;
    if index == text.chars().count() {
        return Some((text, ""));
    }
    let (byte, _) = text.char_indices().nth(index)?;
    Some(text.split_at(byte))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_resolves_qualified_names() {
        let interner = StringInterner::new();
        let table = IntrinsicTable::new(&interner);

        assert_eq!(table.len(), ENTRIES.len());
        assert_eq!(
            table.get(interner.intern("__core.print_stmt")),
            Some(&Intrinsic::PrintStmt)
        );
        assert_eq!(
            table.get(interner.intern("__core.str_cat")),
            Some(&Intrinsic::StrCat)
        );
        assert_eq!(
            table.get(interner.intern("__core.is_void")),
            Some(&Intrinsic::IsVoid)
        );
        assert_eq!(table.get(interner.intern("print_stmt")), None);
        assert_eq!(table.get(interner.intern("__core.nope")), None);
    }

    #[test]
    fn partial_applications_keep_their_name() {
        assert_eq!(Intrinsic::StrCatOnto("x".into()).name(), "str_cat");
        assert_eq!(
            Intrinsic::StrSplitOn(Delimiter::Index(1.0)).name(),
            "str_split"
        );
    }

    #[test]
    fn namespace_check() {
        assert!(is_intrinsic_name("__core.whatever"));
        assert!(!is_intrinsic_name("core.print_stmt"));
        assert!(!is_intrinsic_name("__k"));
    }

    #[test]
    fn split_at_char_counts_characters() {
        assert_eq!(split_at_char("héllo", 2.0), Some(("hé", "llo")));
        assert_eq!(split_at_char("abc", 0.0), Some(("", "abc")));
        assert_eq!(split_at_char("abc", 3.0), Some(("abc", "")));
        assert_eq!(split_at_char("abc", 4.0), None);
        assert_eq!(split_at_char("abc", -1.0), None);
        assert_eq!(split_at_char("abc", 1.5), None);
    }
}
