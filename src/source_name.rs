use url::Url;

/// Publisher names for well-known recipe domains, keyed without `www.`.
const KNOWN_SOURCES: &[(&str, &str)] = &[
    ("seriouseats.com", "Serious Eats"),
    ("allrecipes.com", "Allrecipes"),
    ("bbcgoodfood.com", "BBC Good Food"),
    ("bbc.co.uk", "BBC Food"),
    ("cooking.nytimes.com", "NYT Cooking"),
    ("nytimes.com", "The New York Times"),
    ("bonappetit.com", "Bon Appétit"),
    ("epicurious.com", "Epicurious"),
    ("food52.com", "Food52"),
    ("foodnetwork.com", "Food Network"),
    ("delish.com", "Delish"),
    ("tasty.co", "Tasty"),
    ("thekitchn.com", "The Kitchn"),
    ("simplyrecipes.com", "Simply Recipes"),
    ("smittenkitchen.com", "Smitten Kitchen"),
    ("budgetbytes.com", "Budget Bytes"),
    ("minimalistbaker.com", "Minimalist Baker"),
    ("halfbakedharvest.com", "Half Baked Harvest"),
    ("cookieandkate.com", "Cookie and Kate"),
    ("loveandlemons.com", "Love and Lemons"),
    ("recipetineats.com", "RecipeTin Eats"),
    ("natashaskitchen.com", "Natasha's Kitchen"),
    ("jamieoliver.com", "Jamie Oliver"),
    ("ottolenghi.co.uk", "Ottolenghi"),
    ("theguardian.com", "The Guardian"),
    ("kingarthurbaking.com", "King Arthur Baking"),
    ("ah.nl", "Allerhande"),
    ("24kitchen.nl", "24Kitchen"),
    ("leukerecepten.nl", "Leuke Recepten"),
    ("smulweb.nl", "Smulweb"),
    ("chefkoch.de", "Chefkoch"),
    ("lecker.de", "Lecker"),
    ("essen-und-trinken.de", "essen & trinken"),
    ("marmiton.org", "Marmiton"),
    ("750g.com", "750g"),
    ("cuisineaz.com", "CuisineAZ"),
    ("instagram.com", "Instagram"),
    ("tiktok.com", "TikTok"),
    ("youtube.com", "YouTube"),
    ("pinterest.com", "Pinterest"),
];

/// Path segments on instagram.com that are never account handles.
const INSTAGRAM_RESERVED: &[&str] = &["p", "reel", "reels", "stories", "explore", "tv"];

fn bare_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Human-readable publisher name for a recipe URL.
///
/// Exact domain match first, then any known domain the host is a subdomain
/// of, else the bare host. Unparseable input is returned unchanged.
pub fn get_source_name_from_url(url: &str) -> String {
    let Some(host) = bare_host(url) else {
        return url.to_string();
    };

    if let Some((_, name)) = KNOWN_SOURCES.iter().find(|(domain, _)| *domain == host) {
        return name.to_string();
    }

    KNOWN_SOURCES
        .iter()
        .find(|(domain, _)| host.ends_with(&format!(".{domain}")))
        .map(|(_, name)| name.to_string())
        .unwrap_or(host)
}

/// The account handle from an Instagram profile, post or reel URL, when the
/// URL carries one (e.g. `instagram.com/chef_name/reel/abc`).
pub fn get_instagram_handle(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if host != "instagram.com" && !host.ends_with(".instagram.com") {
        return None;
    }

    let first = parsed.path_segments()?.find(|s| !s.is_empty())?;
    let handle = first.trim_start_matches('@');
    if handle.is_empty() || INSTAGRAM_RESERVED.contains(&handle.to_lowercase().as_str()) {
        return None;
    }
    Some(handle.to_string())
}
