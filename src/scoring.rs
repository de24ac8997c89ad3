// src/scoring.rs
//! # Trending Scorer
//! Pure, testable composite-score formulas. No I/O.
//!
//! Places: rating dominates (0–100), review count adds a capped bonus (0–50)
//! so extremely popular venues cannot inflate without bound. Posts: log of
//! upvotes, compressed into a range comparable to place scores. Absent
//! upstream numerics count as zero.

/// `rating * 20 + min(review_count / 100, 50)`
pub fn place_score(rating: Option<f64>, review_count: Option<u64>) -> f64 {
    let rating_score = rating.unwrap_or(0.0) * 20.0;
    let reviews_score = (review_count.unwrap_or(0) as f64 / 100.0).min(50.0);
    rating_score + reviews_score
}

/// `ln(upvotes + 1) * 30`
pub fn post_score(upvotes: u64) -> f64 {
    ((upvotes + 1) as f64).ln() * 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_formula_combines_rating_and_review_bonus() {
        assert!((place_score(Some(5.0), Some(10)) - 100.1).abs() < 1e-9);
        assert!((place_score(Some(4.5), Some(200)) - 92.0).abs() < 1e-9);
        assert!((place_score(Some(3.0), Some(50)) - 60.5).abs() < 1e-9);
    }

    #[test]
    fn review_bonus_is_capped_at_fifty() {
        let huge = place_score(Some(4.0), Some(10_000_000));
        assert!((huge - 130.0).abs() < 1e-9);
    }

    #[test]
    fn missing_fields_count_as_zero() {
        assert_eq!(place_score(None, None), 0.0);
        assert_eq!(post_score(0), 0.0);
    }

    #[test]
    fn post_score_is_logarithmic_and_finite() {
        let low = post_score(10);
        let high = post_score(100_000);
        assert!(low > 0.0 && high.is_finite());
        // 10x upvotes must not mean 10x score
        assert!(high < low * 10.0);
    }
}
