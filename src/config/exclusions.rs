use std::collections::HashSet;

/// Tournament owners whose events are not representative (bulk online-style brackets)
const EXCLUDED_OWNER_IDS: [i64; 2] = [906371, 1031337];

/// Tournaments and owners that never count towards the statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPolicy {
    slugs: HashSet<String>,
    owner_ids: HashSet<i64>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(Vec::<String>::new(), EXCLUDED_OWNER_IDS)
    }
}

impl ExclusionPolicy {
    pub fn new<S, I>(slugs: S, owner_ids: I) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        I: IntoIterator<Item = i64>,
    {
        Self {
            slugs: slugs.into_iter().map(Into::into).collect(),
            owner_ids: owner_ids.into_iter().collect(),
        }
    }

    pub fn excludes_slug(&self, slug: &str) -> bool {
        self.slugs.contains(slug)
    }

    pub fn excludes_owner(&self, owner_id: Option<i64>) -> bool {
        owner_id.is_some_and(|id| self.owner_ids.contains(&id))
    }
}
