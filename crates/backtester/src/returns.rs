use core_types::{PricePoint, ReturnMap};

/// Converts an ascending price history into date-keyed daily returns.
///
/// A date is present only when its own price and the previous point's
/// price are both usable (previous must be > 0). The previous-price
/// tracker always advances, so a gap suppresses the gap date *and* the
/// date after it: gaps are carried through, never zero-filled. The
/// first point has no predecessor and never contributes.
pub fn daily_returns(series: &[PricePoint]) -> ReturnMap {
    let mut out = ReturnMap::new();
    let mut prev: Option<f64> = None;
    for point in series {
        if let (Some(prev_price), Some(price)) = (prev, point.price) {
            if prev_price > 0.0 {
                out.insert(point.date, price / prev_price - 1.0);
            }
        }
        prev = point.price;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn p(day: u32, price: Option<f64>) -> PricePoint {
        PricePoint {
            date: d(day),
            price,
        }
    }

    #[test]
    fn single_point_yields_empty_map() {
        assert!(daily_returns(&[p(2, Some(100.0))]).is_empty());
        assert!(daily_returns(&[]).is_empty());
    }

    #[test]
    fn pairwise_returns_keyed_by_current_date() {
        let map = daily_returns(&[p(2, Some(100.0)), p(3, Some(110.0)), p(4, Some(99.0))]);
        assert_eq!(map.len(), 2);
        assert!((map[&d(3)] - 0.10).abs() < 1e-12);
        assert!((map[&d(4)] - (-0.10)).abs() < 1e-12);
    }

    #[test]
    fn a_gap_suppresses_its_date_and_the_next() {
        let map = daily_returns(&[
            p(2, Some(100.0)),
            p(3, Some(110.0)),
            p(4, None),
            p(5, Some(121.0)),
            p(6, Some(133.1)),
        ]);
        assert_eq!(map.len(), 2);
        assert!(map.contains_key(&d(3)));
        assert!(!map.contains_key(&d(4)));
        assert!(!map.contains_key(&d(5)));
        assert!((map[&d(6)] - 0.10).abs() < 1e-12);
    }

    #[test]
    fn nonpositive_previous_price_emits_nothing() {
        let map = daily_returns(&[p(2, Some(0.0)), p(3, Some(50.0))]);
        assert!(map.is_empty());
        let map = daily_returns(&[p(2, Some(-1.0)), p(3, Some(50.0))]);
        assert!(map.is_empty());
    }
}
