use std::collections::HashSet;

/// An ID filter where an empty user selection means "no restriction".
///
/// The presentation layer sends an empty list when the user has picked
/// nothing, which by convention selects everything. `Selection` turns that
/// convention into an explicit variant so "selected nothing" can never be
/// misread as "wants nothing". IDs that match no known resource silently
/// contribute nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// No restriction.
    All,
    /// Restrict to the given IDs.
    Ids(HashSet<String>),
}

impl Selection {
    /// Build a selection from a user-supplied ID list; an empty list means
    /// [`Selection::All`].
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = ids.into_iter().map(Into::into).collect();
        if set.is_empty() { Self::All } else { Self::Ids(set) }
    }

    /// Whether the given ID passes the filter.
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::All => true,
            Self::Ids(set) => set.contains(id),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::All
    }
}
