//! Locale-aware string comparison for alphabetical ordering.
//!
//! Backed by the CLDR root collation. Strings the collator considers equal
//! fall back to code-point order so the result is a total order.

use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;

thread_local! {
    static ROOT_COLLATOR: Option<Collator> =
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                log::warn!("Root collator unavailable, sorting by code point: {:?}", e);
                None
            }
        };
}

/// Compare two names the way a user-facing alphabetical list expects.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR
        .with(|collator| match collator {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}
