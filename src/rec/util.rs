//! Miscellaneous utility functionality.
//!
//! Specifically, nothing in here is Rec-related, even though
//! it might be useful outside of this crate.
use macro_pub::macro_pub;

/// Creates a simple HashSet from the given expressions.
#[macro_pub]
macro_rules! set {
    ($($value:expr),* $(,)?) => {{
        let mut set = HashSet::new();
        $(set.insert($value);)*
        set
    }}
}
