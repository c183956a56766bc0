//! Approximate title matching.
//!
//! Both sides are folded (NFD, combining marks dropped, lower-cased) before
//! matching, so `"pokemon"` finds `"Pokémon"`. A target matches when every
//! query character appears in it in order. The rank is the edit distance from
//! the query to the whole folded target; for a subsequence match that is the
//! number of target characters the query does not cover. Lower is better, so
//! among names containing the query the shortest comes first.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// A matched target and its rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rank {
    pub target: String,
    /// Position of the target in the input slice.
    pub original_index: usize,
    pub distance: usize,
}

/// Fold a string for case- and diacritic-insensitive comparison.
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether every character of `needle` appears in `haystack` in order.
pub fn is_subsequence(needle: &[char], haystack: &[char]) -> bool {
    let mut remaining = haystack.iter();
    needle.iter().all(|c| remaining.any(|h| h == c))
}

/// Edit distance from `needle` to `haystack` when `needle` is a subsequence
/// of it, or `None` otherwise. Only deletions are needed, one per uncovered
/// character.
pub fn subsequence_distance(needle: &[char], haystack: &[char]) -> Option<usize> {
    is_subsequence(needle, haystack).then(|| haystack.len() - needle.len())
}

/// Match `query` against every target and return the matches sorted by rank.
///
/// Equal ranks keep input order.
pub fn rank_find<S: AsRef<str>>(query: &str, targets: &[S]) -> Vec<Rank> {
    let needle: Vec<char> = fold(query).chars().collect();

    let mut ranks: Vec<Rank> = targets
        .iter()
        .enumerate()
        .filter_map(|(index, target)| {
            let target = target.as_ref();
            let haystack: Vec<char> = fold(target).chars().collect();
            subsequence_distance(&needle, &haystack).map(|distance| Rank {
                target: target.to_string(),
                original_index: index,
                distance,
            })
        })
        .collect();

    // Stable, so ties stay in input order.
    ranks.sort_by_key(|rank| rank.distance);
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn fold_strips_case_and_marks() {
        assert_eq!(fold("Pokémon"), "pokemon");
        assert_eq!(fold("ÀÉÎÕÜ"), "aeiou");
        assert_eq!(fold("halo"), "halo");
    }

    #[test]
    fn exact_match_costs_nothing() {
        assert_eq!(subsequence_distance(&chars("halo"), &chars("halo")), Some(0));
    }

    #[test]
    fn every_uncovered_character_counts() {
        // Two trailing characters and none inside the match.
        assert_eq!(subsequence_distance(&chars("halo"), &chars("halo 3")), Some(2));
        // One leading character plus the four skipped inside.
        assert_eq!(subsequence_distance(&chars("h3"), &chars("halo 3")), Some(4));
    }

    #[test]
    fn out_of_order_does_not_match() {
        assert_eq!(subsequence_distance(&chars("ba"), &chars("ab")), None);
        assert_eq!(subsequence_distance(&chars("abc"), &chars("ab")), None);
        assert!(!is_subsequence(&chars("aa"), &chars("a")));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert_eq!(subsequence_distance(&[], &chars("anything")), Some(8));
    }

    #[test]
    fn shorter_names_rank_first() {
        let names = ["Halo 3: ODST Collector's Edition", "Super Halo", "Halo"];
        let ranks = rank_find("halo", &names);
        let targets: Vec<&str> = ranks.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["Halo", "Super Halo", "Halo 3: ODST Collector's Edition"]);
        assert_eq!(ranks[0].distance, 0);
        assert_eq!(ranks[1].distance, 6);
    }

    #[test]
    fn ties_keep_input_order() {
        let names = ["Halo: Reach", "Halo 3", "Gears of War", "Hexic HD", "halo 3"];
        let ranks = rank_find("halo3", &names);
        let indexes: Vec<usize> = ranks.iter().map(|r| r.original_index).collect();
        assert_eq!(indexes, vec![1, 4]);
        assert_eq!(ranks[0].distance, 1);
    }

    #[test]
    fn rank_find_is_diacritic_insensitive() {
        let names = ["Pokémon Snap", "Pac-Man"];
        let ranks = rank_find("POKEMON", &names);
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks[0].target, "Pokémon Snap");
        assert_eq!(ranks[0].distance, 5);
    }

    #[test]
    fn rank_find_no_match() {
        let names = ["Halo 3"];
        assert!(rank_find("zzz", &names).is_empty());
    }
}
