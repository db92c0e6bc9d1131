use crate::domain::{TournamentsPage, classifier};

/// Length of the `tournament/` prefix on listing slugs
const SLUG_PREFIX_LEN: usize = 11;

/// Strip the fixed path prefix from a listing slug
pub fn canonical_slug(raw: &str) -> Option<String> {
    let slug: String = raw.chars().skip(SLUG_PREFIX_LEN).collect();
    (!slug.is_empty()).then_some(slug)
}

/// Canonical slugs of the offline, under-way tournaments on a page, in page order
pub fn listed_slugs(page: &TournamentsPage) -> Vec<String> {
    page.tournaments
        .nodes
        .iter()
        .flatten()
        .filter(|node| classifier::is_listed_tournament(node))
        .filter_map(|node| node.slug.as_deref().and_then(canonical_slug))
        .collect()
}
