use crate::domain::{ClassifiedReview, HotelReview, ReviewSentiment};

pub const GENERIC_REVIEW_MIN_CHARS: usize = 20;

const BOILERPLATE: &[&str] = &[
    "all good",
    "bad",
    "clean",
    "everything",
    "excellent",
    "fine",
    "good",
    "good hotel",
    "good location",
    "good stay",
    "great",
    "great hotel",
    "great location",
    "great stay",
    "n/a",
    "na",
    "nice",
    "nice hotel",
    "nice stay",
    "no",
    "no comment",
    "no comments",
    "none",
    "nothing",
    "ok",
    "okay",
    "perfect",
    "thank you",
    "thanks",
];

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub language: Option<String>,
    pub include_generic: bool,
}

#[derive(Debug, Clone)]
pub struct ReviewDigest {
    pub reviews: Vec<ClassifiedReview>,
    pub total: usize,
    pub generic: usize,
    pub average_score: Option<f64>,
}

/// Short or boilerplate-only reviews carry no useful signal.
pub fn is_generic(review: &HotelReview) -> bool {
    let text = review.body_text();
    if text.chars().count() < GENERIC_REVIEW_MIN_CHARS {
        return true;
    }

    text.split(|c: char| matches!(c, '.' | ',' | '!' | ';' | '\n'))
        .map(|segment| segment.trim().to_lowercase())
        .filter(|segment| !segment.is_empty())
        .all(|segment| BOILERPLATE.contains(&segment.as_str()))
}

pub fn classify_sentiment(average_score: Option<f64>) -> ReviewSentiment {
    match average_score {
        Some(score) if score >= 8.0 => ReviewSentiment::Positive,
        Some(score) if score >= 5.0 => ReviewSentiment::Mixed,
        Some(_) => ReviewSentiment::Negative,
        None => ReviewSentiment::Unknown,
    }
}

pub fn digest_reviews(reviews: Vec<HotelReview>, filter: &ReviewFilter) -> ReviewDigest {
    let total = reviews.len();
    let wanted_language = filter
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_lowercase);

    let classified: Vec<ClassifiedReview> = reviews
        .into_iter()
        .filter(|review| match (&wanted_language, &review.language) {
            (Some(wanted), Some(language)) => language.trim().to_lowercase() == *wanted,
            _ => true,
        })
        .map(|review| ClassifiedReview {
            sentiment: classify_sentiment(review.average_score),
            generic: is_generic(&review),
            review,
        })
        .collect();

    let generic = classified.iter().filter(|r| r.generic).count();
    let kept: Vec<ClassifiedReview> = classified
        .into_iter()
        .filter(|r| filter.include_generic || !r.generic)
        .collect();

    let scores: Vec<f64> = kept
        .iter()
        .filter_map(|r| r.review.average_score)
        .collect();
    let average_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    ReviewDigest {
        reviews: kept,
        total,
        generic,
        average_score,
    }
}
