//! Inclusive release-year bounds.

use crate::traits::Filter;
use catalog::Movie;

pub struct YearRangeFilter {
    from: Option<u16>,
    to: Option<u16>,
}

impl YearRangeFilter {
    pub fn new(from: Option<u16>, to: Option<u16>) -> Self {
        Self { from, to }
    }
}

impl Filter for YearRangeFilter {
    fn name(&self) -> &str {
        "YearRangeFilter"
    }

    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|m| self.from.is_none_or(|from| m.year >= from))
            .filter(|m| self.to.is_none_or(|to| m.year <= to))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    #[test]
    fn test_bounds_are_inclusive() {
        let movies = [
            movie(1, "A", 1999, 7.0, &[]),
            movie(2, "B", 2000, 7.0, &[]),
            movie(3, "C", 2010, 7.0, &[]),
            movie(4, "D", 2011, 7.0, &[]),
        ];
        let all: Vec<&Movie> = movies.iter().collect();

        let kept = YearRangeFilter::new(Some(2000), Some(2010)).apply(all.clone());
        assert_eq!(kept.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 3]);

        let kept = YearRangeFilter::new(None, Some(2000)).apply(all);
        assert_eq!(kept.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let m = movie(1, "A", 2005, 7.0, &[]);
        assert!(YearRangeFilter::new(Some(2010), Some(2000)).apply(vec![&m]).is_empty());
    }
}
