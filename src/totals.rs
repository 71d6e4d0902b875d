//! Summing of nested count maps.
//!
//! Both `LanguageTotals` and `DateTotals` form a commutative monoid under [`Merge::merge`]
//! with the empty map as identity, which is what lets per-repository results be reduced
//! in any order.

use crate::model::{DateTotals, LanguageTotals};

pub trait Merge: Default {
    fn merge(self, other: Self) -> Self;
}

impl Merge for LanguageTotals {
    fn merge(mut self, other: Self) -> Self {
        for (language, lines) in other {
            *self.entry(language).or_insert(0) += lines;
        }
        self.retain(|_, lines| *lines != 0);
        self
    }
}

impl Merge for DateTotals {
    // Dates with empty totals are kept so that merging a dense map with `{}` is a no-op.
    fn merge(mut self, other: Self) -> Self {
        for (date, languages) in other {
            let merged = match self.remove(&date) {
                Some(existing) => existing.merge(languages),
                None => languages.merge(LanguageTotals::new()),
            };
            self.insert(date, merged);
        }
        self
    }
}

/// Folds any number of values, starting from the empty map.
pub fn merge_all<T, I>(items: I) -> T
where
    T: Merge,
    I: IntoIterator<Item = T>,
{
    items.into_iter().fold(T::default(), Merge::merge)
}

/// Drops dates whose totals are empty.
pub fn sparse(mut totals: DateTotals) -> DateTotals {
    totals.retain(|_, languages| !languages.is_empty());
    totals
}

/// Per-language `max(later - earlier, 0)`; languages that shrank or vanished contribute nothing.
pub fn growth(earlier: &LanguageTotals, later: &LanguageTotals) -> LanguageTotals {
    later
        .iter()
        .filter_map(|(language, &lines)| {
            let before = earlier.get(language).copied().unwrap_or(0);
            let added = lines.saturating_sub(before);
            (added > 0).then(|| (language.clone(), added))
        })
        .collect()
}
