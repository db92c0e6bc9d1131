use crate::domain::TournamentsPage;

/// Total page count reported by a listing page; missing or negative means none
pub fn total_pages(page: &TournamentsPage) -> usize {
    page.tournaments
        .page_info
        .total_pages
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}
