//! Ranking and enrichment of merged destination candidates.

use crate::catalog::destination_info;
use crate::domain::DestinationSuggestion;
use crate::engine::DestinationCandidate;

/// Sort candidates cheapest-first, truncate to the result cap, and attach
/// metadata and a budget-relative reason.
///
/// Returns the suggestions and the candidate count before truncation.
/// Candidates that never recorded a price are dropped; the merge never
/// inserts one, but the sentinel is handled rather than trusted.
pub(crate) fn rank_candidates(
    candidates: Vec<DestinationCandidate>,
    budget_per_person: u32,
    travelers: u8,
    max_results: u16,
    currency: &str,
) -> (Vec<DestinationSuggestion>, usize) {
    let mut priced: Vec<(f64, DestinationCandidate)> = candidates
        .into_iter()
        .filter_map(|candidate| candidate.best_price.map(|price| (price, candidate)))
        .collect();

    // The accumulator map is unordered; the first-seen index recovers
    // encounter order so equal prices rank deterministically.
    priced.sort_by(|left, right| {
        left.0
            .total_cmp(&right.0)
            .then_with(|| left.1.seen_order.cmp(&right.1.seen_order))
    });

    let total_found = priced.len();
    priced.truncate(usize::from(max_results));

    let suggestions = priced
        .into_iter()
        .map(|(price, candidate)| {
            let metadata = destination_info(candidate.code.as_str());
            DestinationSuggestion {
                destination_name: metadata.map(|m| m.city.to_owned()),
                country: metadata.map(|m| m.country.to_owned()),
                country_code: metadata.map(|m| m.country_code.to_owned()),
                destination_code: candidate.code,
                best_origin: candidate.best_origin,
                price_per_person: price,
                // Inspiration-search prices are quoted per traveler.
                total_price: price * f64::from(travelers),
                departure_date: candidate.departure_date,
                return_date: candidate.return_date,
                currency: currency.to_owned(),
                reasons: vec![budget_reason(price, budget_per_person).to_owned()],
            }
        })
        .collect();

    (suggestions, total_found)
}

fn budget_reason(price: f64, budget_per_person: u32) -> &'static str {
    let budget = f64::from(budget_per_person);
    if price <= budget * 0.5 {
        "Great value - well under budget"
    } else if price <= budget * 0.75 {
        "Good value"
    } else {
        "Within budget"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IataCode;

    fn candidate(code: &str, price: Option<f64>, seen_order: usize) -> DestinationCandidate {
        DestinationCandidate {
            code: IataCode::parse(code).expect("valid code"),
            best_price: price,
            best_origin: IataCode::parse("LTN").expect("valid code"),
            departure_date: Some(String::from("2025-05-02")),
            return_date: Some(String::from("2025-05-05")),
            seen_order,
        }
    }

    #[test]
    fn empty_candidate_set_yields_empty_response() {
        let (suggestions, total) = rank_candidates(Vec::new(), 200, 1, 30, "GBP");
        assert!(suggestions.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn sorts_ascending_and_counts_before_truncation() {
        let candidates = vec![
            candidate("AMS", Some(150.0), 1),
            candidate("BCN", Some(80.0), 0),
            candidate("LIS", Some(120.0), 2),
        ];

        let (suggestions, total) = rank_candidates(candidates, 200, 1, 2, "GBP");
        assert_eq!(total, 3);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].destination_code.as_str(), "BCN");
        assert_eq!(suggestions[1].destination_code.as_str(), "LIS");
    }

    #[test]
    fn equal_prices_keep_first_seen_order() {
        let candidates = vec![
            candidate("MAD", Some(80.0), 2),
            candidate("BCN", Some(80.0), 0),
            candidate("AMS", Some(150.0), 1),
        ];

        let (suggestions, _) = rank_candidates(candidates, 200, 1, 30, "GBP");
        let order: Vec<&str> = suggestions
            .iter()
            .map(|s| s.destination_code.as_str())
            .collect();
        assert_eq!(order, vec!["BCN", "MAD", "AMS"]);
    }

    #[test]
    fn reason_thresholds_are_inclusive() {
        let candidates = vec![
            candidate("BCN", Some(100.0), 0),
            candidate("AMS", Some(150.0), 1),
            candidate("LIS", Some(151.0), 2),
        ];

        let (suggestions, _) = rank_candidates(candidates, 200, 1, 30, "GBP");
        assert_eq!(
            suggestions[0].reasons,
            vec![String::from("Great value - well under budget")]
        );
        assert_eq!(suggestions[1].reasons, vec![String::from("Good value")]);
        assert_eq!(suggestions[2].reasons, vec![String::from("Within budget")]);
    }

    #[test]
    fn unpriced_candidates_are_dropped() {
        let candidates = vec![candidate("BCN", None, 0), candidate("AMS", Some(90.0), 1)];

        let (suggestions, total) = rank_candidates(candidates, 200, 1, 30, "GBP");
        assert_eq!(total, 1);
        assert_eq!(suggestions[0].destination_code.as_str(), "AMS");
    }

    #[test]
    fn total_price_scales_with_travelers() {
        let candidates = vec![candidate("BCN", Some(80.0), 0)];

        let (suggestions, _) = rank_candidates(candidates, 200, 4, 30, "GBP");
        assert_eq!(suggestions[0].price_per_person, 80.0);
        assert_eq!(suggestions[0].total_price, 320.0);
    }

    #[test]
    fn enrichment_leaves_unknown_codes_unset() {
        let candidates = vec![candidate("BCN", Some(80.0), 0), candidate("XYZ", Some(90.0), 1)];

        let (suggestions, _) = rank_candidates(candidates, 200, 1, 30, "GBP");
        assert_eq!(suggestions[0].destination_name.as_deref(), Some("Barcelona"));
        assert_eq!(suggestions[0].country_code.as_deref(), Some("ES"));
        assert!(suggestions[1].destination_name.is_none());
        assert!(suggestions[1].country.is_none());
    }
}
