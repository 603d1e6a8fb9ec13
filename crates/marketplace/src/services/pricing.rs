//! Price range suggestions for an artwork.
//!
//! The model is asked for a range; the first range found in its reply is
//! narrowed if it is too wide and the remaining text becomes the rationale.
//! Replies without a usable range or without markdown structure are filled
//! in from the medium-based tables below.

use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use crate::grok::{ChatMessage, ChatOptions, ContentPart, GrokClient, GrokError};

const SYSTEM_PROMPT: &str = "You are an art pricing expert. Provide a price range for this artwork.";
const TEXT_ONLY_NOTE: &str =
    " (Note: Image URL was invalid or missing, so this is a text-only analysis.)";

/// Ranges wider than this are narrowed to their middle 60%.
const MAX_RANGE_SPAN: u64 = 300;

static PRICE_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\$[\d,]+\s*(-|to)\s*\$[\d,]+)|(\d+\s*(-|to)\s*\d+\s*(USD|HKD|EUR|GBP))")
        .expect("Invalid regex")
});

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*").expect("Invalid regex"));

/// Optional details sent with a pricing request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepts `"2024"` or `2024`.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Year>::deserialize(d)?.map(|year| match year {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    }))
}

/// Response body for a pricing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSuggestion {
    pub success: bool,
    pub price_range: String,
    pub rationale: String,
    pub full_response: String,
}

impl PriceSuggestion {
    fn new(price_range: String, rationale: String) -> Self {
        Self {
            success: true,
            full_response: format!("{price_range}\n\n{rationale}"),
            price_range,
            rationale,
        }
    }
}

/// Resolved request context: medium, year and whether the year is current.
struct PricingContext<'a> {
    title: &'a str,
    medium: String,
    year: String,
    is_current_year: bool,
    description: &'a str,
}

impl<'a> PricingContext<'a> {
    fn new(details: &'a ArtworkDetails, current_year: i32) -> Self {
        let year = details
            .year
            .clone()
            .filter(|y| !y.trim().is_empty())
            .unwrap_or_else(|| current_year.to_string());
        let is_current_year = year.trim().parse::<i32>().ok() == Some(current_year);

        Self {
            title: details.title.as_deref().unwrap_or("Untitled"),
            medium: details
                .medium
                .as_deref()
                .map_or_else(|| "unknown".to_string(), str::to_lowercase),
            year,
            is_current_year,
            description: details.description.as_deref().unwrap_or(""),
        }
    }
}

/// Ask the model for a price range.
///
/// # Errors
///
/// Returns an error if the upstream call fails. An empty reply is not an
/// error: the medium-based fallback is returned instead.
#[instrument(skip(grok, image_url, details))]
pub async fn suggest_price(
    grok: &GrokClient,
    image_url: &str,
    details: &ArtworkDetails,
) -> Result<PriceSuggestion, GrokError> {
    let current_year = chrono::Utc::now().year();
    let context = PricingContext::new(details, current_year);

    let prompt = format!(
        "I need to price a {} artwork created in {}. What would be a reasonable price range?",
        details
            .medium
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Digital Art"),
        context.year,
    );

    let user = if image_url.starts_with("data:") || image_url.starts_with("http") {
        ChatMessage::user_parts(vec![
            ContentPart::text(prompt),
            ContentPart::image(image_url),
        ])
    } else {
        tracing::debug!("Image URL unusable, pricing from text only");
        ChatMessage::user_parts(vec![ContentPart::text(format!("{prompt}{TEXT_ONLY_NOTE}"))])
    };

    let messages = [ChatMessage::system(SYSTEM_PROMPT), user];

    match grok.chat(&messages, ChatOptions::new(0.1, 100)).await {
        Ok(content) => Ok(from_reply(&content, &context)),
        Err(GrokError::EmptyResponse) => {
            tracing::warn!("Empty pricing reply, using fallback analysis");
            Ok(fallback_suggestion(&context))
        }
        Err(e) => Err(e),
    }
}

fn from_reply(content: &str, context: &PricingContext<'_>) -> PriceSuggestion {
    let (price_range, mut rationale) = match PRICE_RANGE_REGEX.find(content) {
        Some(found) => (
            narrow_price_range(found.as_str()),
            content.replacen(found.as_str(), "", 1).trim().to_string(),
        ),
        None => (
            fallback_price_for_medium(&context.medium, context.is_current_year).to_string(),
            content.trim().to_string(),
        ),
    };

    if !rationale.contains("##") {
        rationale = market_analysis(context, &price_range, None);
    }

    PriceSuggestion::new(price_range, rationale)
}

fn fallback_suggestion(context: &PricingContext<'_>) -> PriceSuggestion {
    let price_range = fallback_price_for_medium(&context.medium, context.is_current_year);
    let career = if context.description.chars().count() < 20 {
        &EMERGING_CAREER_ADVICE
    } else {
        &DEVELOPING_CAREER_ADVICE
    };
    let rationale = market_analysis(context, price_range, Some(career));
    PriceSuggestion::new(price_range.to_string(), rationale)
}

/// Narrow a range wider than 300 to `min + 20%` .. `max - 20%`.
///
/// Keeps the `$` prefix when the original had one.
#[must_use]
pub fn narrow_price_range(range: &str) -> String {
    let numbers: Vec<u64> = NUMBER_REGEX
        .find_iter(range)
        .filter_map(|m| m.as_str().replace(',', "").parse().ok())
        .collect();

    let (Some(&min), Some(&max)) = (numbers.first(), numbers.get(1)) else {
        return range.to_string();
    };
    if max.saturating_sub(min) <= MAX_RANGE_SPAN {
        return range.to_string();
    }

    // span / 5 rounded half up; u128 so the doubling cannot overflow
    let (min, max) = (u128::from(min), u128::from(max));
    let fifth = ((max - min) * 2 + 5) / 10;
    let symbol = if range.contains('$') { "$" } else { "" };
    format!("{symbol}{} - {symbol}{}", min + fifth, max - fifth)
}

/// Price range used when the model gives none.
#[must_use]
pub fn fallback_price_for_medium(medium: &str, is_current_year: bool) -> &'static str {
    let medium = medium.to_lowercase();
    let has = |terms: &[&str]| terms.iter().any(|t| medium.contains(t));

    if has(&["digital"]) {
        if is_current_year {
            "$550 - $850"
        } else {
            "$450 - $750"
        }
    } else if has(&["oil", "acrylic", "paint"]) {
        "$800 - $1,100"
    } else if has(&["sculpt", "3d"]) {
        "$1,000 - $1,400"
    } else if has(&["mixed"]) {
        "$600 - $900"
    } else if has(&["photo"]) {
        "$400 - $700"
    } else if has(&["draw", "pencil", "charcoal"]) {
        "$350 - $650"
    } else {
        "$450 - $750"
    }
}

struct MarketInsights {
    trends: [String; 3],
    preferences: [&'static str; 3],
    prices: [&'static str; 3],
}

fn market_insights(medium: &str, is_current_year: bool, year: &str) -> MarketInsights {
    let has = |terms: &[&str]| terms.iter().any(|t| medium.contains(t));

    if has(&["digital"]) {
        let period = if is_current_year { year } else { "recent years" };
        MarketInsights {
            trends: [
                format!(
                    "Digital art market has grown 34% in {period}, with particular interest in AI-assisted works"
                ),
                "Limited edition digital prints are outperforming open editions by 3:1 in sales volume".into(),
                "Digital art with physical components (phygital) commands 40% higher prices on average".into(),
            ],
            preferences: [
                "Collectors are increasingly valuing digital art with unique authentication methods",
                "Works exploring sustainability themes through digital means are trending upward",
                "Digital art that incorporates interactive elements is seeing premium pricing",
            ],
            prices: [
                "The average price for digital artworks by emerging artists is $400-$800",
                "Limited edition digital prints (editions of 10 or fewer) average $600-$1,200",
                "Digital artworks with physical components command 30-50% higher prices",
            ],
        }
    } else if has(&["oil", "acrylic", "paint"]) {
        MarketInsights {
            trends: [
                "Traditional painting market remains stable with 12% growth in contemporary styles".into(),
                "Smaller format paintings (under 30×40 inches) are showing stronger sales velocity".into(),
                "Abstract and contemporary figurative works lead market demand".into(),
            ],
            preferences: [
                "Collectors are seeking paintings that blend traditional techniques with contemporary themes",
                "Works addressing cultural identity and social issues are attracting premium buyers",
                "Sustainable and eco-friendly painting practices are increasingly valued",
            ],
            prices: [
                "Small to medium paintings by emerging artists average $800-$2,000",
                "Paintings with exhibition history typically command 20-30% higher prices",
                "Works with unique or innovative techniques can see a 15-25% premium",
            ],
        }
    } else if has(&["sculpt", "3d"]) {
        MarketInsights {
            trends: [
                "Sculpture market has seen 18% growth in small to medium sized works".into(),
                "3D-printed sculptures are establishing a significant market presence".into(),
                "Sustainable and upcycled materials are driving premium pricing".into(),
            ],
            preferences: [
                "Collectors are seeking sculptures that integrate technology or interactive elements",
                "Works that address environmental themes through material choices are trending",
                "Sculptures that can be displayed in multiple configurations have increased appeal",
            ],
            prices: [
                "Small sculptures by emerging artists typically range from $800-$2,500",
                "Mixed material sculptures command 15-20% higher prices than single-material works",
                "Limited edition sculptures (editions of 5 or fewer) see a 30-40% premium",
            ],
        }
    } else if has(&["mixed"]) {
        MarketInsights {
            trends: [
                "Mixed media market has grown 22% with particular interest in digital-physical hybrids".into(),
                "Works incorporating sustainable or upcycled materials show premium pricing".into(),
                "Collectors are seeking pieces that blur boundaries between traditional categories".into(),
            ],
            preferences: [
                "Narrative-driven mixed media works are attracting significant collector interest",
                "Pieces that document cultural heritage or personal identity stories command premiums",
                "Interactive or evolving mixed media installations are establishing higher price points",
            ],
            prices: [
                "Mixed media works by emerging artists average $600-$1,800",
                "Works combining traditional craftsmanship with digital elements see 20-30% higher prices",
                "Textural complexity and layering techniques correlate with higher pricing",
            ],
        }
    } else if has(&["photo"]) {
        MarketInsights {
            trends: [
                "Photography market is seeing renewed growth with 15% increase in limited editions".into(),
                "Alternative process and experimental photography commands premium prices".into(),
                "Documentary and social commentary photography is gaining collector interest".into(),
            ],
            preferences: [
                "Collectors value limited edition prints with smaller edition sizes (under 10)",
                "Works that tell compelling stories or document important moments are preferred",
                "Experimental techniques and alternative processes attract premium buyers",
            ],
            prices: [
                "Limited edition photographs by emerging artists average $400-$1,200",
                "Alternative process photographs command 25-40% higher prices",
                "Larger print sizes (over 24×36 inches) typically see a 30% premium",
            ],
        }
    } else {
        MarketInsights {
            trends: [
                "The art market has shown resilience with steady growth in the past year".into(),
                "Online sales continue to expand, now representing 25% of total market volume".into(),
                "Emerging artists are gaining more attention from collectors and institutions".into(),
            ],
            preferences: [
                "Collectors are increasingly valuing works with clear provenance and artist statements",
                "There is growing interest in art that engages with contemporary social issues",
                "Limited editions and series are particularly attractive to new collectors",
            ],
            prices: [
                "Similar works by emerging artists typically sell in the $500-$1,500 range",
                "Mid-career artists command 30-50% higher prices for comparable works",
                "Gallery representation typically adds a 15-25% premium to pricing",
            ],
        }
    }
}

const EMERGING_CAREER_ADVICE: [&str; 3] = [
    "For emerging artists, establishing consistent pricing is crucial for market positioning",
    "Consider offering limited editions to create multiple price points",
    "Building a strong online portfolio and social media presence can justify higher pricing",
];

const DEVELOPING_CAREER_ADVICE: [&str; 3] = [
    "As your portfolio develops, gradual price increases of 10-15% annually are sustainable",
    "Documenting exhibitions and sales history helps justify premium pricing",
    "Collaborations with established artists or brands can accelerate price appreciation",
];

fn bullets<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown market analysis for the artwork's medium.
fn market_analysis(
    context: &PricingContext<'_>,
    price_range: &str,
    career: Option<&[&str; 3]>,
) -> String {
    let PricingContext {
        title,
        medium,
        year,
        is_current_year,
        ..
    } = context;
    let insights = market_insights(medium, *is_current_year, year);

    let mut doc = format!(
        "## Market Analysis for \"{title}\" ({medium}, {year})\n\n\
         ### Suggested Price Range: {price_range}\n\n\
         ### Current Market Trends:\n{}\n\n\
         ### Customer Preferences in {year}:\n{}\n\n\
         ### Average Price Comparison:\n{}\n\n",
        bullets(&insights.trends),
        bullets(&insights.preferences),
        bullets(&insights.prices),
    );

    if let Some(career) = career {
        doc.push_str("### Recommendations for Your Career Stage:\n");
        doc.push_str(&bullets(career));
        doc.push_str("\n\n");
    }

    doc.push_str(&format!(
        "This price range is based on current market data for {medium} works created in {year}, \
         taking into account recent sales, collector preferences, and medium-specific factors. \
         For optimal pricing, consider offering limited editions or including certificates of \
         authenticity to increase perceived value."
    ));
    doc
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn details(medium: &str, year: &str) -> ArtworkDetails {
        ArtworkDetails {
            title: Some("Harbour Lights".to_string()),
            medium: Some(medium.to_string()),
            year: Some(year.to_string()),
            description: None,
        }
    }

    #[test]
    fn test_narrow_wide_dollar_range() {
        assert_eq!(narrow_price_range("$500 - $1,500"), "$700 - $1300");
        assert_eq!(narrow_price_range("$600 to $800"), "$600 to $800");
    }

    #[test]
    fn test_narrow_currency_suffixed_range() {
        assert_eq!(narrow_price_range("1000 - 2000 HKD"), "1200 - 1800");
    }

    #[test]
    fn test_narrow_range_at_integer_limit() {
        assert_eq!(
            narrow_price_range("$0 - $18446744073709551615"),
            "$3689348814741910323 - $14757395258967641292"
        );
        // Values past u64 are not read as prices.
        assert_eq!(
            narrow_price_range("$1 - $99999999999999999999999"),
            "$1 - $99999999999999999999999"
        );
    }

    #[test]
    fn test_fallback_price_by_medium() {
        assert_eq!(fallback_price_for_medium("Digital Art", true), "$550 - $850");
        assert_eq!(fallback_price_for_medium("digital", false), "$450 - $750");
        assert_eq!(fallback_price_for_medium("Oil on canvas", false), "$800 - $1,100");
        assert_eq!(fallback_price_for_medium("3D print", false), "$1,000 - $1,400");
        assert_eq!(fallback_price_for_medium("Mixed media", false), "$600 - $900");
        assert_eq!(fallback_price_for_medium("Photography", false), "$400 - $700");
        assert_eq!(fallback_price_for_medium("Charcoal", false), "$350 - $650");
        assert_eq!(fallback_price_for_medium("Ink", false), "$450 - $750");
    }

    #[test]
    fn test_reply_with_range_and_markdown_is_kept() {
        let details = details("Oil", "2020");
        let context = PricingContext::new(&details, 2026);
        let reply = "$800 - $1,000\n\n## Why\nStrong composition.";

        let suggestion = from_reply(reply, &context);
        assert_eq!(suggestion.price_range, "$800 - $1,000");
        assert_eq!(suggestion.rationale, "## Why\nStrong composition.");
        assert_eq!(
            suggestion.full_response,
            "$800 - $1,000\n\n## Why\nStrong composition."
        );
    }

    #[test]
    fn test_plain_reply_without_range_is_reformatted() {
        let details = details("Photography", "2019");
        let context = PricingContext::new(&details, 2026);

        let suggestion = from_reply("It depends on the print size.", &context);
        assert_eq!(suggestion.price_range, "$400 - $700");
        assert!(
            suggestion
                .rationale
                .starts_with("## Market Analysis for \"Harbour Lights\" (photography, 2019)")
        );
        assert!(suggestion.rationale.contains("### Suggested Price Range: $400 - $700"));
        assert!(!suggestion.rationale.contains("Career Stage"));
    }

    #[test]
    fn test_fallback_includes_career_advice() {
        let details = ArtworkDetails::default();
        let context = PricingContext::new(&details, 2026);

        let suggestion = fallback_suggestion(&context);
        assert_eq!(suggestion.price_range, "$450 - $750");
        assert!(suggestion.rationale.contains("(unknown, 2026)"));
        assert!(suggestion.rationale.contains("For emerging artists"));
    }

    #[test]
    fn test_digital_current_year_insights_name_the_year() {
        let details = details("digital painting", "2026");
        let context = PricingContext::new(&details, 2026);
        let suggestion = fallback_suggestion(&context);
        assert_eq!(suggestion.price_range, "$550 - $850");
        assert!(suggestion.rationale.contains("grown 34% in 2026"));
    }

    #[test]
    fn test_details_accept_numeric_year() {
        let details: ArtworkDetails =
            serde_json::from_str(r#"{"medium": "Oil", "year": 2021}"#).unwrap();
        assert_eq!(details.year.as_deref(), Some("2021"));
    }
}
