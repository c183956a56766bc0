//! Fuzzy search over the full title set.
//!
//! Every call ranks all stored titles from scratch; there is no cached index.

use titlebox_catalog::fuzzy::rank_find;
use titlebox_catalog::page::{Page, PageRequest};
use titlebox_catalog::types::Title;

/// Rank `titles` by how well their names match `query` and cut out one page.
/// Titles whose names do not match are dropped.
pub fn search_titles(
    titles: Vec<Title>,
    query: &str,
    only_with_pictures: bool,
    request: PageRequest,
) -> Page<Title> {
    let titles: Vec<Title> = if only_with_pictures {
        titles.into_iter().filter(Title::has_pictures).collect()
    } else {
        titles
    };

    let names: Vec<&str> = titles.iter().map(|t| t.name.as_str()).collect();
    let ranked: Vec<usize> = rank_find(query, &names)
        .into_iter()
        .map(|rank| rank.original_index)
        .collect();

    Page::from_ranked(ranked, request).map(|index| titles[index].clone())
}
