use std::collections::HashMap;

use crate::models::Movie;

/// How many genres the collection listing reports
pub const FAVORITE_GENRE_COUNT: usize = 3;

/// Ranks genre tokens across `movies` and joins the `n` most frequent with ", ".
///
/// Tokens are the comma-separated, trimmed pieces of each movie's `genres`
/// field; matching is exact (no case folding). Equal counts keep the order in
/// which the genres were first seen.
pub fn top_genres(movies: &[Movie], n: usize) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    let tokens = movies
        .iter()
        .filter_map(|movie| movie.genres.as_deref())
        .flat_map(|genres| genres.split(','))
        .map(str::trim)
        .filter(|genre| !genre.is_empty());

    for genre in tokens {
        match positions.get(genre) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(genre, counts.len());
                counts.push((genre, 1));
            }
        }
    }

    // sort_by is stable, so first-seen order breaks ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .iter()
        .take(n)
        .map(|(genre, _)| *genre)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn movies(genres: &[Option<&str>]) -> Vec<Movie> {
        genres
            .iter()
            .enumerate()
            .map(|(i, g)| Movie {
                id: i as i64 + 1,
                uuid: Uuid::new_v4(),
                title: format!("Movie {}", i),
                description: String::new(),
                genres: g.map(str::to_string),
                collection_id: 1,
            })
            .collect()
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let input = movies(&[Some("Action, Drama"), Some("Drama"), Some("Action, Comedy")]);
        assert_eq!(top_genres(&input, 3), "Action, Drama, Comedy");
    }

    #[test]
    fn test_higher_count_wins() {
        let input = movies(&[Some("Comedy"), Some("Horror,Horror"), Some("Horror")]);
        assert_eq!(top_genres(&input, 3), "Horror, Comedy");
    }

    #[test]
    fn test_only_top_n_returned() {
        let input = movies(&[Some("A, B, C, D"), Some("D")]);
        assert_eq!(top_genres(&input, FAVORITE_GENRE_COUNT), "D, A, B");
    }

    #[test]
    fn test_empty_tokens_and_missing_genres_ignored() {
        let input = movies(&[None, Some(" , ,Thriller,"), Some("")]);
        assert_eq!(top_genres(&input, 3), "Thriller");
    }

    #[test]
    fn test_no_case_folding() {
        let input = movies(&[Some("drama"), Some("Drama"), Some("Drama")]);
        assert_eq!(top_genres(&input, 3), "Drama, drama");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(top_genres(&[], 3), "");
    }
}
