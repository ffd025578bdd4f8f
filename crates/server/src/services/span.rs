//! Year span value object.

use serde::{Deserialize, Serialize};

/// A half-open range of calendar years `[start, end)`.
///
/// All span arithmetic lives here so the aggregation loops never compute
/// year bounds themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearSpan {
    start: i32,
    end: i32,
}

impl YearSpan {
    /// The span a "last `num_years` years" request covers, ending just
    /// before `end_year`.
    ///
    /// Starts at `end_year - num_years - 1`, so the span always covers
    /// `num_years + 1` years. Both query surfaces depend on these exact
    /// bounds; changing them is a behavior change.
    pub fn trailing(end_year: i32, num_years: i32) -> Self {
        Self {
            start: end_year - num_years - 1,
            end: end_year,
        }
    }

    /// First year covered by the span.
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Exclusive upper bound of the span.
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Ascending years covered by the span.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..self.end
    }

    /// Number of years covered.
    pub fn len(&self) -> usize {
        (self.end - self.start).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl std::fmt::Display for YearSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_years_spans_one_year() {
        let span = YearSpan::trailing(2024, 0);
        assert_eq!(span.years().collect::<Vec<_>>(), vec![2023]);
        assert_eq!(span.len(), 1);
    }

    #[test]
    fn test_trailing_span_covers_num_years_plus_one() {
        let span = YearSpan::trailing(2024, 5);
        assert_eq!(span.start(), 2018);
        assert_eq!(span.end(), 2024);
        assert_eq!(
            span.years().collect::<Vec<_>>(),
            vec![2018, 2019, 2020, 2021, 2022, 2023]
        );
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_years_are_ascending() {
        let years: Vec<i32> = YearSpan::trailing(2020, 2).years().collect();
        let mut sorted = years.clone();
        sorted.sort_unstable();
        assert_eq!(years, sorted);
    }

    #[test]
    fn test_degenerate_span_is_empty() {
        let span = YearSpan::trailing(2024, -2);
        assert!(span.is_empty());
        assert_eq!(span.years().count(), 0);
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(YearSpan::trailing(2024, 0).to_string(), "[2023, 2024)");
    }
}
