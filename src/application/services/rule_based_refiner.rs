use std::sync::LazyLock;

use regex::Regex;

use crate::domain::RefinementResult;

const FALLBACK_MIN_CHARS: usize = 3;
const FALLBACK_MAX_CHARS: usize = 49;

static PRICE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\s*(\d[\d,]*(?:\.\d+)?)\s*(?:-|to|and)\s*\$?\s*(\d[\d,]*(?:\.\d+)?)").unwrap()
});
static DOLLAR_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d[\d,]*(?:\.\d+)?)").unwrap());
static UNDER_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:under|less than|below|up to|max(?:imum)?)\s+(?:budget\s+)?(?:of\s+)?\$?\s*(\d[\d,]*(?:\.\d+)?)",
    )
    .unwrap()
});
static OVER_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:over|more than|above|at least|min(?:imum)?)\s+(?:budget\s+)?(?:of\s+)?\$?\s*(\d[\d,]*(?:\.\d+)?)",
    )
    .unwrap()
});

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:\s*-\s*(\d{1,2})(?:st|nd|rd|th)?)?\b",
    )
    .unwrap()
});
static SLASH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b").unwrap());
static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}-\d{1,2}-\d{1,2}\b").unwrap());

static STAR_RATING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([1-5])(?:\.\d)?\s*-?\s*stars?\b").unwrap());

const UNDER_TERMS: &[&str] = &["under", "less than", "below", "up to", "max", "maximum"];
const OVER_TERMS: &[&str] = &["over", "more than", "above", "at least", "min", "minimum"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Price,
    Dates,
    Amenity,
    Location,
    GuestProfile,
    Quality,
    Fallback,
}

/// Normalized view of one refinement turn.
pub struct RuleInput<'a> {
    raw: &'a str,
    normalized: String,
    current_search: &'a str,
}

impl<'a> RuleInput<'a> {
    pub fn new(user_message: &'a str, current_search: &'a str) -> Self {
        let raw = user_message.trim();
        Self {
            raw,
            normalized: raw.to_lowercase(),
            current_search,
        }
    }

    fn mentions(&self, term: &str) -> bool {
        self.normalized.contains(term)
    }

    fn mentions_any(&self, terms: &[&str]) -> bool {
        terms.iter().any(|term| self.mentions(term))
    }

    fn mentions_word(&self, term: &str) -> bool {
        contains_word(&self.normalized, term)
    }

    fn mentions_any_word(&self, terms: &[&str]) -> bool {
        terms.iter().any(|term| self.mentions_word(term))
    }

    fn append(&self, phrase: &str) -> String {
        let base = self.current_search.trim();
        if base.is_empty() {
            phrase.to_string()
        } else {
            format!("{} {}", base, phrase)
        }
    }
}

pub struct Rule {
    pub category: RuleCategory,
    apply: fn(&RuleInput<'_>) -> Option<RefinementResult>,
}

impl Rule {
    pub fn apply(&self, input: &RuleInput<'_>) -> Option<RefinementResult> {
        (self.apply)(input)
    }
}

/// Evaluated top to bottom; the first rule that answers wins. The last rule
/// always answers.
pub static RULES: &[Rule] = &[
    Rule {
        category: RuleCategory::Price,
        apply: price_rule,
    },
    Rule {
        category: RuleCategory::Dates,
        apply: dates_rule,
    },
    Rule {
        category: RuleCategory::Amenity,
        apply: amenity_rule,
    },
    Rule {
        category: RuleCategory::Location,
        apply: location_rule,
    },
    Rule {
        category: RuleCategory::GuestProfile,
        apply: guest_profile_rule,
    },
    Rule {
        category: RuleCategory::Quality,
        apply: quality_rule,
    },
    Rule {
        category: RuleCategory::Fallback,
        apply: fallback_rule,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub category: RuleCategory,
    pub result: RefinementResult,
}

pub fn evaluate_rules(user_message: &str, current_search: &str) -> RuleOutcome {
    let input = RuleInput::new(user_message, current_search);
    RULES
        .iter()
        .find_map(|rule| {
            rule.apply(&input).map(|result| RuleOutcome {
                category: rule.category,
                result,
            })
        })
        .unwrap_or_else(|| RuleOutcome {
            category: RuleCategory::Fallback,
            result: help_response(),
        })
}

pub fn refine_with_rules(user_message: &str, current_search: &str) -> RefinementResult {
    let outcome = evaluate_rules(user_message, current_search);
    tracing::debug!(category = ?outcome.category, "Rule-based refinement matched");
    outcome.result
}

fn price_rule(input: &RuleInput<'_>) -> Option<RefinementResult> {
    if !input.mentions_any(&["$", "budget", "price"]) {
        return None;
    }

    let text = input
        .normalized
        .replace("no more than", "up to")
        .replace("no less than", "at least");

    // "2 to 3 adults" is not a price range; require `$` or "between".
    let range = PRICE_RANGE
        .captures(&text)
        .filter(|caps| caps[0].contains('$') || input.mentions_word("between"));
    if let Some(caps) = range {
        return Some(range_result(
            input,
            &normalize_amount(&caps[1]),
            &normalize_amount(&caps[2]),
        ));
    }

    let ceiling = qualified_amount(&UNDER_AMOUNT, &text);
    let floor = qualified_amount(&OVER_AMOUNT, &text);

    match (ceiling, floor) {
        (Some(max), Some(min)) => Some(range_result(input, &min, &max)),
        (Some(price), None) => Some(under_result(input, &price)),
        (None, Some(price)) => Some(
            RefinementResult::refine(
                format!("Sure, showing hotels over ${} per night.", price),
                input.append(&format!("over {}", price)),
            )
            .with_suggestions(["Show luxury hotels", "Add spa access"]),
        ),
        (None, None) => match dollar_amount(&text) {
            Some(price) => Some(under_result(input, &price)),
            None if input.mentions_any_word(UNDER_TERMS)
                || input.mentions_any_word(OVER_TERMS)
                || input.mentions_word("between") =>
            {
                Some(
                    RefinementResult::reply(
                        "What's your nightly budget? Try something like \"under $200\".",
                    )
                    .with_suggestions(["Under $200", "Between $100-$300"]),
                )
            }
            None => None,
        },
    }
}

fn under_result(input: &RuleInput<'_>, price: &str) -> RefinementResult {
    RefinementResult::refine(
        format!("Got it! Looking for hotels under ${} per night.", price),
        input.append(&format!("under {}", price)),
    )
    .with_suggestions(["Add free breakfast", "Show 4+ star hotels"])
}

/// Orders the bounds by value so "over 300 under 100" still reads low to high.
fn range_result(input: &RuleInput<'_>, first: &str, second: &str) -> RefinementResult {
    let (min, max) = match (first.parse::<f64>(), second.parse::<f64>()) {
        (Ok(a), Ok(b)) if a > b => (second, first),
        _ => (first, second),
    };
    RefinementResult::refine(
        format!("Looking for hotels between ${} and ${} per night.", min, max),
        input.append(&format!("${}-${}", min, max)),
    )
    .with_suggestions(["Add free cancellation", "Show 4+ star hotels"])
}

fn dates_rule(input: &RuleInput<'_>) -> Option<RefinementResult> {
    if !input.mentions_any(&["date", "check", "stay"]) {
        return None;
    }

    let dates = find_dates(&input.normalized);
    let result = match dates.as_slice() {
        [first, second, ..] => RefinementResult::refine(
            format!("Updating your stay to {} through {}.", first, second),
            input.append(&format!("{} to {}", first, second)),
        )
        .with_suggestions(["Add free cancellation", "Show hotels with breakfast"]),
        [only] => RefinementResult::refine(
            format!("Check-in set to {}. When would you like to check out?", only),
            input.append(&format!("starting {}", only)),
        )
        .with_suggestions(["Stay 2 nights", "Stay a week"]),
        [] => RefinementResult::reply(
            "Which dates work for you? Try something like \"March 15 to March 18\" or \"3/15 to 3/18\".",
        )
        .with_suggestions(["March 15 to March 18", "3/15 to 3/18"]),
    };
    Some(result)
}

struct CanonicalPhrase {
    matches: fn(&RuleInput<'_>) -> bool,
    phrase: &'static str,
    response: &'static str,
    suggestions: &'static [&'static str],
}

static AMENITIES: &[CanonicalPhrase] = &[
    CanonicalPhrase {
        matches: |i| i.mentions("breakfast"),
        phrase: "with free breakfast",
        response: "Adding free breakfast to your search.",
        suggestions: &["Add free WiFi", "Show free cancellation"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["wifi", "wi-fi", "internet"]),
        phrase: "with free WiFi",
        response: "Filtering for hotels with free WiFi.",
        suggestions: &["Add free breakfast", "Near city center"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions("pool") && i.mentions("indoor"),
        phrase: "with indoor pool",
        response: "Looking for hotels with an indoor pool.",
        suggestions: &["Add spa access", "Family-friendly"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions("pool") && i.mentions("outdoor"),
        phrase: "with outdoor pool",
        response: "Looking for hotels with an outdoor pool.",
        suggestions: &["Near the beach", "Family-friendly"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions("pool"),
        phrase: "with pool",
        response: "Showing hotels with a pool.",
        suggestions: &["Indoor pool", "Outdoor pool"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions("parking"),
        phrase: "with free parking",
        response: "Adding free parking to your search.",
        suggestions: &["Add free WiFi", "Show free cancellation"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_word("spa"),
        phrase: "with spa",
        response: "Looking for hotels with a spa.",
        suggestions: &["Show luxury hotels", "Romantic for couples"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_word("gym") || i.mentions("fitness"),
        phrase: "with fitness center",
        response: "Filtering for hotels with a fitness center.",
        suggestions: &["For business travelers", "Add free breakfast"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions("cancellation") || i.mentions_word("cancel"),
        phrase: "with free cancellation",
        response: "Showing hotels with free cancellation.",
        suggestions: &["Add free breakfast", "Under $200"],
    },
];

static LOCATIONS: &[CanonicalPhrase] = &[
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["downtown", "city center", "city centre"]),
        phrase: "in city center",
        response: "Focusing on hotels in the city center.",
        suggestions: &["In walkable area", "Add free breakfast"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["beach", "ocean"]) && i.mentions("view"),
        phrase: "with ocean view",
        response: "Looking for rooms with an ocean view.",
        suggestions: &["Romantic for couples", "With pool"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["beach", "ocean"]),
        phrase: "near the beach",
        response: "Showing hotels near the beach.",
        suggestions: &["With ocean view", "Family-friendly"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["quiet", "peaceful"]),
        phrase: "in quiet area",
        response: "Looking for hotels in a quiet area.",
        suggestions: &["With spa", "Romantic for couples"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["walkable", "walking distance"]),
        phrase: "in walkable area",
        response: "Finding hotels in walkable neighborhoods.",
        suggestions: &["In city center", "Add free breakfast"],
    },
];

static GUEST_PROFILES: &[CanonicalPhrase] = &[
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["family", "kids", "children"]),
        phrase: "family-friendly",
        response: "Showing family-friendly hotels.",
        suggestions: &["With pool", "Add free breakfast"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions("business") || i.mentions_word("work"),
        phrase: "for business travelers",
        response: "Focusing on hotels suited to business travel.",
        suggestions: &["Add free WiFi", "In city center"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["romantic", "couple"]),
        phrase: "romantic for couples",
        response: "Looking for romantic hotels for couples.",
        suggestions: &["With ocean view", "With spa"],
    },
];

static QUALITY: &[CanonicalPhrase] = &[
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["star", "rated", "rating"]),
        phrase: "highly rated",
        response: "Showing highly rated hotels.",
        suggestions: &["4+ star rating", "Show luxury hotels"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["luxury", "upscale"]),
        phrase: "luxury",
        response: "Showing luxury hotels.",
        suggestions: &["With spa", "5+ star rating"],
    },
    CanonicalPhrase {
        matches: |i| i.mentions_any(&["budget", "cheap", "affordable"]),
        phrase: "budget-friendly",
        response: "Looking for budget-friendly options.",
        suggestions: &["Under $100", "With free cancellation"],
    },
];

fn first_canonical(
    input: &RuleInput<'_>,
    table: &'static [CanonicalPhrase],
) -> Option<RefinementResult> {
    table
        .iter()
        .find(|entry| (entry.matches)(input))
        .map(|entry| {
            RefinementResult::refine(entry.response, input.append(entry.phrase))
                .with_suggestions(entry.suggestions.iter().copied())
        })
}

fn amenity_rule(input: &RuleInput<'_>) -> Option<RefinementResult> {
    first_canonical(input, AMENITIES)
}

fn location_rule(input: &RuleInput<'_>) -> Option<RefinementResult> {
    first_canonical(input, LOCATIONS)
}

fn guest_profile_rule(input: &RuleInput<'_>) -> Option<RefinementResult> {
    first_canonical(input, GUEST_PROFILES)
}

fn quality_rule(input: &RuleInput<'_>) -> Option<RefinementResult> {
    if let Some(caps) = STAR_RATING.captures(&input.normalized) {
        let stars = &caps[1];
        return Some(
            RefinementResult::refine(
                format!("Showing hotels rated {} stars and up.", stars),
                input.append(&format!("{}+ star rating", stars)),
            )
            .with_suggestions(["Add free breakfast", "In city center"]),
        );
    }
    first_canonical(input, QUALITY)
}

fn fallback_rule(input: &RuleInput<'_>) -> Option<RefinementResult> {
    let length = input.raw.chars().count();
    if (FALLBACK_MIN_CHARS..=FALLBACK_MAX_CHARS).contains(&length) {
        return Some(
            RefinementResult::refine(
                format!("Searching for \"{}\" along with your current search.", input.raw),
                input.append(input.raw),
            )
            .with_suggestions(["Under $200", "Add free breakfast"]),
        );
    }
    Some(help_response())
}

fn help_response() -> RefinementResult {
    RefinementResult::reply(
        "I can help narrow your search. Try \"under $200\", \"with free breakfast\", \"near the beach\" or \"4 star hotels\".",
    )
    .with_suggestions(["Under $200", "Add free breakfast"])
}

fn normalize_amount(raw: &str) -> String {
    raw.replace(',', "")
}

fn dollar_amount(text: &str) -> Option<String> {
    DOLLAR_AMOUNT
        .captures(text)
        .map(|caps| normalize_amount(&caps[1]))
}

/// Amount written directly after a qualifier, with or without `$`.
fn qualified_amount(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .map(|caps| normalize_amount(&caps[1]))
}

/// Tries each date pattern in order and returns the matches of the first
/// pattern that finds anything.
fn find_dates(text: &str) -> Vec<String> {
    let month_days: Vec<String> = MONTH_DAY
        .captures_iter(text)
        .flat_map(|caps| {
            let month = caps[1].to_string();
            let mut dates = vec![format!("{} {}", month, &caps[2])];
            if let Some(end) = caps.get(3) {
                dates.push(format!("{} {}", month, end.as_str()));
            }
            dates
        })
        .collect();
    if !month_days.is_empty() {
        return month_days;
    }

    let slashed: Vec<String> = SLASH_DATE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    if !slashed.is_empty() {
        return slashed;
    }

    ISO_DATE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn contains_word(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(start, _)| {
        let end = start + term.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
    })
}
