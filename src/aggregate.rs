use std::collections::HashMap;

use tracing::debug;

use crate::models::{CategorySummary, ReviewAnalysis};

/// Per-category means over every review carrying that label. A review with
/// two labels contributes to two summaries; labels no review carries are
/// omitted rather than zero-filled. Output order is first appearance across
/// the review sequence.
pub fn summarize(per_review: &[ReviewAnalysis]) -> Vec<CategorySummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut sentiments: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut polarities: HashMap<&str, Vec<f64>> = HashMap::new();

    for review in per_review {
        for label in &review.named_labels {
            let entry = sentiments.entry(label.as_str()).or_default();
            if entry.is_empty() {
                order.push(label.as_str());
            }
            entry.push(review.sentiment);
            polarities
                .entry(label.as_str())
                .or_default()
                .push(review.polarity);
        }
    }

    let summaries: Vec<CategorySummary> = order
        .into_iter()
        .map(|label| CategorySummary {
            category: label.to_string(),
            average_sentiment: mean(&sentiments[label]),
            average_polarity: mean(&polarities[label]),
        })
        .collect();

    debug!("Aggregation completed - categories={}", summaries.len());
    summaries
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(sentiment: f64, polarity: f64, labels: &[&str]) -> ReviewAnalysis {
        ReviewAnalysis {
            sentiment,
            polarity,
            named_labels: labels.iter().map(|s| s.to_string()).collect(),
            cluster: 0,
        }
    }

    #[test]
    fn averages_per_label() {
        let reviews = vec![
            review(4.0, 3.0, &["staff"]),
            review(2.0, 1.0, &["staff"]),
            review(5.0, 5.0, &["equipment"]),
        ];
        let summaries = summarize(&reviews);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].category, "staff");
        assert!((summaries[0].average_sentiment - 3.0).abs() < 1e-12);
        assert!((summaries[0].average_polarity - 2.0).abs() < 1e-12);
        assert_eq!(summaries[1].category, "equipment");
        assert_eq!(summaries[1].average_sentiment, 5.0);
    }

    #[test]
    fn multi_label_review_contributes_to_every_group() {
        let reviews = vec![
            review(4.0, 4.0, &["staff", "equipment"]),
            review(2.0, 2.0, &["equipment"]),
        ];
        let summaries = summarize(&reviews);
        let equipment = summaries
            .iter()
            .find(|s| s.category == "equipment")
            .unwrap();
        assert!((equipment.average_sentiment - 3.0).abs() < 1e-12);
        let staff = summaries.iter().find(|s| s.category == "staff").unwrap();
        assert_eq!(staff.average_sentiment, 4.0);
    }

    #[test]
    fn order_is_first_appearance() {
        let reviews = vec![
            review(1.0, 1.0, &["parking"]),
            review(1.0, 1.0, &["staff", "parking"]),
        ];
        let summaries = summarize(&reviews);
        assert_eq!(summaries[0].category, "parking");
        assert_eq!(summaries[1].category, "staff");
    }

    #[test]
    fn unused_labels_are_omitted() {
        let summaries = summarize(&[review(3.0, 3.0, &["staff"])]);
        assert_eq!(summaries.len(), 1);
    }
}
