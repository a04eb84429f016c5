use regex::Regex;
use std::sync::LazyLock;

/// Unit words recognised after a quantity, matched case-insensitively.
///
/// English, Dutch, French and German are mixed in one flat list. Short tokens
/// such as `el` or `c` can collide across languages; the list is tuned against
/// real recipe sites, so keep additions conservative.
pub const UNIT_WORDS: &[&str] = &[
    // English
    "cup", "cups", "c",
    "tablespoon", "tablespoons", "tbsp", "tbsps", "tbs", "tbl", "tblsp",
    "teaspoon", "teaspoons", "tsp", "tsps",
    "ounce", "ounces", "oz", "fl oz", "fluid ounce", "fluid ounces",
    "pound", "pounds", "lb", "lbs",
    "gram", "grams", "g", "gr",
    "kilogram", "kilograms", "kg", "milligram", "milligrams", "mg",
    "milliliter", "milliliters", "millilitre", "millilitres", "ml",
    "liter", "liters", "litre", "litres", "l",
    "pint", "pints", "pt", "quart", "quarts", "qt", "gallon", "gallons",
    "pinch", "pinches", "dash", "dashes",
    "clove", "cloves", "can", "cans", "jar", "jars",
    "slice", "slices", "piece", "pieces", "stick", "sticks",
    "bunch", "bunches", "sprig", "sprigs", "handful", "handfuls",
    "package", "packages", "pkg", "inch", "inches", "cm",
    // Dutch
    "el", "tl", "eetlepel", "eetlepels", "theelepel", "theelepels",
    "kop", "kopje", "kopjes", "snufje", "snufjes",
    "stuk", "stuks", "teen", "teentje", "teentjes",
    "blik", "blikje", "blikjes", "zakje", "zakjes",
    "ons", "dl", "cl", "takje", "takjes", "bosje",
    // French
    "cuillère à soupe", "cuillères à soupe", "cuillère à café", "cuillères à café",
    "c. à soupe", "c. à café", "c. à s", "c. à c",
    "cs", "cc", "cas", "cac",
    "pincée", "pincées", "gousse", "gousses", "verre", "verres",
    "tasse", "tasses", "sachet", "sachets", "tranche", "tranches", "boîte", "boîtes",
    // German
    "esslöffel", "teelöffel", "prise", "prisen", "zehe", "zehen",
    "becher", "tassen", "stück", "pck", "päckchen", "packung", "packungen",
    "dose", "dosen", "bund", "scheibe", "scheiben", "msp",
];

const NUMBER_CHARS: &str = r"\d½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞";

/// Longest-first alternation so `cups` wins over `c` and `fl oz` over `fl`.
fn unit_alternation() -> String {
    let mut words: Vec<&str> = UNIT_WORDS.to_vec();
    words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// A unit at the very start of the text, with an optional trailing period.
pub static LEADING_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^({})\b\.?", unit_alternation()))
        .expect("Invalid leading unit regex")
});

/// An alternate measurement such as ` / 1 lb` or ` / 225 g.`
pub static ALTERNATE_MEASUREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\s/\s*([{n}][{n}.,/]*(?:\s+\d+/\d+)?\s*(?:{u})\b\.?)",
        n = NUMBER_CHARS,
        u = unit_alternation()
    ))
    .expect("Invalid alternate measurement regex")
});

/// Match a unit at the start of `text`, returning the lowercased unit and the
/// byte length consumed.
pub fn match_leading_unit(text: &str) -> Option<(String, usize)> {
    let m = LEADING_UNIT.find(text)?;
    let unit = m.as_str().trim_end_matches('.').to_lowercase();
    Some((unit, m.end()))
}
