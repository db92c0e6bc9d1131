/// Tournaments whose start falls in `[afterS, beforeS)` for one videogame, one page at a time
pub const TOURNAMENTS_QUERY: &str = r#"
  query tournamentsQuery($afterS: Timestamp, $beforeS: Timestamp, $pageNum: Int, $perPage: Int, $videogameId: ID) {
    tournaments(
      query: {page: $pageNum, perPage: $perPage, filter: {afterDate: $afterS, beforeDate: $beforeS, videogameIds: [$videogameId]}}
    ) {
      pageInfo {
        totalPages
      }
      nodes {
        hasOfflineEvents
        slug
        state
      }
    }
  }
"#;
