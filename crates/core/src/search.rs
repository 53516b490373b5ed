//! Catalog search helpers.
//!
//! Holds the title-pattern builder shared by every catalog query and the
//! three-way merge join behind fast search. Nothing here touches the
//! database, so the merge can be exercised with plain vectors.

use std::iter::Peekable;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Title patterns
// ---------------------------------------------------------------------------

/// Build an `ILIKE` pattern matching `substring` anywhere in a title.
///
/// `%`, `_` and `\` in the input are escaped so they match literally.
///
/// # Examples
///
/// ```
/// use videostore_core::search::title_pattern;
/// assert_eq!(title_pattern("matrix"), "%matrix%");
/// assert_eq!(title_pattern("100%"), "%100\\%%");
/// ```
pub fn title_pattern(substring: &str) -> String {
    let mut pattern = String::with_capacity(substring.len() + 2);
    pattern.push('%');
    for c in substring.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Merge join
// ---------------------------------------------------------------------------

/// A row that belongs to exactly one movie.
pub trait MovieKeyed {
    fn movie_id(&self) -> DbId;
}

/// One movie together with the director and actor rows merged onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<M, D, A> {
    pub movie: M,
    pub directors: Vec<D>,
    pub actors: Vec<A>,
}

/// Three-way merge join over inputs sorted by movie id.
///
/// For each movie, every leading director and actor row carrying the same
/// id is drained before the next movie is pulled. All three inputs must be
/// ordered by movie id; a row that arrives out of order is never matched
/// and blocks its stream for the rest of the merge.
pub struct MergeJoin<M, D: Iterator, A: Iterator> {
    movies: M,
    directors: Peekable<D>,
    actors: Peekable<A>,
}

/// Merge `movies` with their `directors` and `actors`.
pub fn merge_join<M, D, A>(
    movies: M,
    directors: D,
    actors: A,
) -> MergeJoin<M::IntoIter, D::IntoIter, A::IntoIter>
where
    M: IntoIterator,
    D: IntoIterator,
    A: IntoIterator,
{
    MergeJoin {
        movies: movies.into_iter(),
        directors: directors.into_iter().peekable(),
        actors: actors.into_iter().peekable(),
    }
}

impl<M, D, A> Iterator for MergeJoin<M, D, A>
where
    M: Iterator,
    M::Item: MovieKeyed,
    D: Iterator,
    D::Item: MovieKeyed,
    A: Iterator,
    A::Item: MovieKeyed,
{
    type Item = Merged<M::Item, D::Item, A::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let movie = self.movies.next()?;
        let id = movie.movie_id();
        let directors = drain_matching(&mut self.directors, id);
        let actors = drain_matching(&mut self.actors, id);
        Some(Merged {
            movie,
            directors,
            actors,
        })
    }
}

fn drain_matching<I>(rows: &mut Peekable<I>, movie_id: DbId) -> Vec<I::Item>
where
    I: Iterator,
    I::Item: MovieKeyed,
{
    let mut matched = Vec::new();
    while let Some(row) = rows.next_if(|row| row.movie_id() == movie_id) {
        matched.push(row);
    }
    matched
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(DbId, &'static str);

    impl MovieKeyed for Row {
        fn movie_id(&self) -> DbId {
            self.0
        }
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.1).collect()
    }

    // -- title_pattern -------------------------------------------------------

    #[test]
    fn pattern_wraps_plain_text() {
        assert_eq!(title_pattern("matrix"), "%matrix%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(title_pattern("a_b%c"), "%a\\_b\\%c%");
        assert_eq!(title_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert_eq!(title_pattern(""), "%%");
    }

    // -- merge_join ----------------------------------------------------------

    #[test]
    fn merges_rows_onto_their_movies() {
        let movies = vec![Row(1, "Matrix"), Row(2, "Matrix Reloaded")];
        let directors = vec![
            Row(1, "Lana"),
            Row(1, "Lilly"),
            Row(2, "Lana"),
            Row(2, "Lilly"),
        ];
        let actors = vec![
            Row(1, "Keanu"),
            Row(1, "Carrie-Anne"),
            Row(1, "Laurence"),
            Row(2, "Keanu"),
            Row(2, "Carrie-Anne"),
            Row(2, "Hugo"),
        ];

        let merged: Vec<_> = merge_join(movies, directors, actors).collect();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].movie, Row(1, "Matrix"));
        assert_eq!(names(&merged[0].directors), ["Lana", "Lilly"]);
        assert_eq!(names(&merged[0].actors), ["Keanu", "Carrie-Anne", "Laurence"]);
        assert_eq!(merged[1].movie, Row(2, "Matrix Reloaded"));
        assert_eq!(names(&merged[1].directors), ["Lana", "Lilly"]);
        assert_eq!(names(&merged[1].actors), ["Keanu", "Carrie-Anne", "Hugo"]);
    }

    #[test]
    fn movies_without_credits_get_empty_lists() {
        let movies = vec![Row(1, "a"), Row(2, "b"), Row(3, "c")];
        let directors = vec![Row(2, "d")];
        let actors: Vec<Row> = vec![Row(1, "x"), Row(3, "y")];

        let merged: Vec<_> = merge_join(movies, directors, actors).collect();

        assert!(merged[0].directors.is_empty());
        assert_eq!(names(&merged[0].actors), ["x"]);
        assert_eq!(names(&merged[1].directors), ["d"]);
        assert!(merged[1].actors.is_empty());
        assert!(merged[2].directors.is_empty());
        assert_eq!(names(&merged[2].actors), ["y"]);
    }

    #[test]
    fn no_movies_yields_nothing() {
        let merged: Vec<_> =
            merge_join(Vec::<Row>::new(), vec![Row(1, "d")], vec![Row(1, "a")]).collect();
        assert!(merged.is_empty());
    }

    #[test]
    fn matches_per_movie_grouping_for_sorted_input() {
        let movies: Vec<Row> = (1..=5).map(|id| Row(id, "m")).collect();
        let directors: Vec<Row> = [1, 1, 3, 4, 4, 4].iter().map(|&id| Row(id, "d")).collect();
        let actors: Vec<Row> = [2, 2, 3, 5].iter().map(|&id| Row(id, "a")).collect();

        let merged: Vec<_> = merge_join(movies.clone(), directors.clone(), actors.clone()).collect();

        for (entry, movie) in merged.iter().zip(&movies) {
            let expect_d: Vec<_> = directors.iter().filter(|d| d.0 == movie.0).cloned().collect();
            let expect_a: Vec<_> = actors.iter().filter(|a| a.0 == movie.0).cloned().collect();
            assert_eq!(entry.directors, expect_d);
            assert_eq!(entry.actors, expect_a);
        }
    }

    /// Ordering is a precondition, not something the merge repairs: an
    /// out-of-order director row stalls the director stream.
    #[test]
    fn unsorted_input_is_not_repaired() {
        let movies = vec![Row(1, "a"), Row(2, "b")];
        let directors = vec![Row(2, "late"), Row(1, "early")];

        let merged: Vec<_> = merge_join(movies, directors, Vec::<Row>::new()).collect();

        assert!(merged[0].directors.is_empty());
        assert_eq!(names(&merged[1].directors), ["late"]);
    }
}
