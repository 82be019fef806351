use staygenie::application::services::{
    ReviewFilter, classify_sentiment, digest_reviews, is_generic,
};
use staygenie::domain::{HotelReview, ReviewSentiment};

fn review(headline: &str, pros: &str, cons: &str) -> HotelReview {
    HotelReview {
        headline: Some(headline.to_string()),
        pros: Some(pros.to_string()),
        cons: Some(cons.to_string()),
        ..Default::default()
    }
}

#[test]
fn given_short_review_when_classifying_then_is_generic() {
    assert!(is_generic(&review("Nice", "Clean", "")));
    assert!(is_generic(&HotelReview::default()));
}

#[test]
fn given_boilerplate_only_review_when_classifying_then_is_generic() {
    assert!(is_generic(&review(
        "Great hotel. Good location!",
        "Thank you.",
        "Nothing."
    )));
}

#[test]
fn given_specific_review_when_classifying_then_is_not_generic() {
    assert!(!is_generic(&review(
        "Great location",
        "Five minutes walk to the Pantheon",
        "Thin walls"
    )));
}

#[test]
fn given_scores_when_classifying_sentiment_then_uses_thresholds() {
    assert_eq!(classify_sentiment(Some(8.0)), ReviewSentiment::Positive);
    assert_eq!(classify_sentiment(Some(9.6)), ReviewSentiment::Positive);
    assert_eq!(classify_sentiment(Some(7.9)), ReviewSentiment::Mixed);
    assert_eq!(classify_sentiment(Some(5.0)), ReviewSentiment::Mixed);
    assert_eq!(classify_sentiment(Some(4.9)), ReviewSentiment::Negative);
    assert_eq!(classify_sentiment(None), ReviewSentiment::Unknown);
}

#[test]
fn given_reviews_without_language_when_filtering_by_language_then_keeps_them() {
    let reviews = vec![
        HotelReview {
            language: None,
            average_score: Some(10.0),
            ..review("Rooftop bar was the highlight", "Breakfast", "")
        },
        HotelReview {
            language: Some("fr".to_string()),
            average_score: Some(2.0),
            ..review("Chambre bruyante et sale", "Rien de spécial", "")
        },
    ];
    let filter = ReviewFilter {
        language: Some("en".to_string()),
        include_generic: false,
    };

    let digest = digest_reviews(reviews, &filter);

    assert_eq!(digest.total, 2);
    assert_eq!(digest.reviews.len(), 1);
    assert_eq!(digest.average_score, Some(10.0));
}

#[test]
fn given_only_generic_reviews_when_digesting_then_average_is_absent() {
    let reviews = vec![review("Ok", "", ""), review("Good", "", "")];

    let digest = digest_reviews(reviews, &ReviewFilter::default());

    assert!(digest.reviews.is_empty());
    assert_eq!(digest.generic, 2);
    assert_eq!(digest.average_score, None);
}
