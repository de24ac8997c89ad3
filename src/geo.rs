// src/geo.rs
//! Static reference tables: city centers, country region codes, landmark
//! keyword lists, and the subreddit sets consulted per country/city.

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// City center used to bias place searches when the caller gave no GPS fix.
pub fn city_center(city: &str) -> Option<GeoPoint> {
    let (lat, lng) = match city {
        "Tokyo" => (35.6762, 139.6503),
        "Osaka" => (34.6937, 135.5023),
        "Kyoto" => (35.0116, 135.7681),
        "Sapporo" => (43.0618, 141.3545),
        "Fukuoka" => (33.5902, 130.4017),
        "Bangkok" => (13.7563, 100.5018),
        "Phuket" => (8.6353, 98.2948),
        "Chiang Mai" => (18.7883, 98.9853),
        "Pattaya" => (12.9271, 100.8765),
        "Krabi" => (8.3192, 98.9264),
        "Kuala Lumpur" => (3.1390, 101.6869),
        "Penang" => (5.3520, 100.3330),
        "Johor Bahru" => (1.4854, 103.7618),
        "Malacca" => (2.1896, 102.2501),
        "Kota Kinabalu" => (5.9788, 118.0753),
        "Manila" => (14.5995, 120.9842),
        "Cebu" => (10.3157, 123.8854),
        "Boracay" => (11.9674, 121.9248),
        "Palawan" => (9.8349, 118.7384),
        "Davao" => (7.1907, 125.4553),
        _ => return None,
    };
    Some(GeoPoint::new(lat, lng))
}

/// ccTLD region code used to bias the places directory.
pub fn region_code(country: &str) -> Option<&'static str> {
    match country {
        "Japan" => Some("jp"),
        "Hong Kong" => Some("hk"),
        "Thailand" => Some("th"),
        "Malaysia" => Some("my"),
        "Philippines" => Some("ph"),
        _ => None,
    }
}

/// City-specific landmark names; a place whose name matches one of these is
/// classified as a Popular Destination regardless of its type tags.
pub fn city_landmarks(country: &str, city: &str) -> &'static [&'static str] {
    match (country, city) {
        ("Japan", "Tokyo") => &[
            "tokyo tower",
            "tokyo skytree",
            "imperial palace",
            "ueno park",
            "meiji shrine",
            "sensō-ji",
            "senso-ji",
        ],
        ("Japan", "Osaka") => &["osaka castle", "dotonbori", "umeda sky", "shitennoji"],
        ("Japan", "Kyoto") => &[
            "fushimi inari",
            "kinkaku-ji",
            "ginkaku-ji",
            "arashiyama",
            "kiyomizu",
        ],
        ("Japan", "Sapporo") => &["odori park", "sapporo clock tower", "moerenuma"],
        ("Japan", "Fukuoka") => &["ohori park", "dazaifu", "canal city"],
        ("Hong Kong", "Central") => &["victoria peak", "peak tram", "man mo temple", "ifc"],
        ("Hong Kong", "Tsim Sha Tsui") => &[
            "avenue of stars",
            "harbour city",
            "star ferry",
            "k11 musea",
        ],
        ("Hong Kong", "Mong Kok") => &["ladies market", "temple street", "sneakers street"],
        ("Hong Kong", "Causeway Bay") => &["times square", "victoria park", "sogo"],
        ("Hong Kong", "Lantau Island") => &[
            "ngong ping",
            "tian tan buddha",
            "big buddha",
            "po lin monastery",
        ],
        ("Thailand", "Bangkok") => &[
            "grand palace",
            "wat phra kaew",
            "wat arun",
            "wat saket",
            "lumphini park",
            "chatuchak market",
        ],
        ("Thailand", "Phuket") => &[
            "patong beach",
            "big buddha",
            "phang nga bay",
            "old phuket town",
            "phuket town",
        ],
        ("Thailand", "Chiang Mai") => &[
            "wat chedi luang",
            "wat phra singh",
            "old city",
            "sunday night bazaar",
            "doi suthep",
        ],
        ("Thailand", "Pattaya") => &[
            "walking street",
            "sanctuary of truth",
            "jomtien beach",
            "bottom bar",
        ],
        ("Thailand", "Krabi") => &[
            "railay beach",
            "ao nang beach",
            "emerald pool",
            "tiger cave temple",
        ],
        ("Malaysia", "Kuala Lumpur") => &[
            "petronas towers",
            "kuala lumpur tower",
            "menara kl",
            "bukit bintang",
            "chinatown kl",
        ],
        ("Malaysia", "Penang") => &[
            "penang hill",
            "george town",
            "kek lok si temple",
            "cheong fatt tze mansion",
        ],
        ("Malaysia", "Johor Bahru") => &[
            "legoland",
            "istana bukit serene",
            "nusajaya",
            "desaru beach",
        ],
        ("Malaysia", "Malacca") => &[
            "malacca city center",
            "jonker street",
            "menara taming sari",
            "christ church",
        ],
        ("Malaysia", "Kota Kinabalu") => &[
            "mount kinabalu",
            "sabah museum",
            "kota kinabalu waterfront",
            "tunku abdul rahman park",
        ],
        _ => &[],
    }
}

/// Lower-cased country/city names used to validate that a story mentions the
/// destination at all.
pub fn country_keywords(country: &str) -> &'static [&'static str] {
    match country {
        "Japan" => &["japan", "tokyo", "osaka", "kyoto", "sapporo", "hiroshima"],
        "Hong Kong" => &["hong kong", "hk"],
        "Thailand" => &["thailand", "bangkok", "phuket", "chiang mai", "pattaya", "krabi"],
        "Malaysia" => &[
            "malaysia",
            "kuala lumpur",
            "kl",
            "penang",
            "johor bahru",
            "malacca",
        ],
        _ => &[],
    }
}

/// Channels whose content is not scoped to one destination; stories from
/// these need a stricter relevance check.
pub const GENERIC_SUBREDDITS: &[&str] = &["travel", "solotravel", "travelhacks", "traveladvice"];

/// Subreddits consulted for travel stories, per country. Unknown countries
/// fall back to the generic travel channels.
pub fn story_subreddits(country: &str) -> &'static [&'static str] {
    match country {
        "Japan" => &["JapanTravel", "JapanTravelTips", "solotravel", "travelhacks", "travel"],
        "Hong Kong" => &["HongKong", "solotravel", "travelhacks", "travel"],
        "Thailand" => &["Thailand", "ThailandTourism", "solotravel", "travelhacks", "travel"],
        "Malaysia" => &["Malaysia", "MalaysiaTravel", "solotravel", "travelhacks", "travel"],
        _ => &["travel", "solotravel", "travelhacks"],
    }
}

/// Subreddits polled for trending posts about a city.
pub fn trending_subreddits(city: &str) -> Vec<String> {
    let mut subs = vec!["JapanTravel".to_string(), "JapanTravelTips".to_string()];
    subs.push(city.to_lowercase());
    if matches!(city, "Tokyo" | "Osaka" | "Kyoto") {
        subs.push(city.to_string());
    }
    subs
}

/// Neighborhood keywords searched when pulling stories for one subreddit,
/// joined as an OR query. Falls back to the bare city name.
pub fn city_search_keywords(country: &str, city: &str) -> Vec<String> {
    let fixed: &[&str] = match (country, city) {
        ("Japan", "Tokyo") => &["tokyo", "shibuya", "shinjuku", "asakusa"],
        ("Japan", "Osaka") => &["osaka", "dotonbori", "umeda"],
        ("Japan", "Kyoto") => &["kyoto", "arashiyama", "fushimi"],
        ("Japan", "Sapporo") => &["sapporo", "hokkaido"],
        ("Japan", "Hiroshima") => &["hiroshima"],
        ("Hong Kong", "Victoria Peak") => &["victoria peak", "hong kong"],
        ("Hong Kong", "Central") => &["central", "hong kong"],
        ("Hong Kong", "Mong Kok") => &["mong kok", "hong kong"],
        ("Hong Kong", "Tsim Sha Tsui") => &["tsim sha tsui", "hong kong"],
        ("Hong Kong", "Stanley") => &["stanley", "hong kong"],
        ("Thailand", "Bangkok") => &["bangkok", "sukhumvit", "silom"],
        ("Thailand", "Phuket") => &["phuket", "patong"],
        ("Thailand", "Chiang Mai") => &["chiang mai", "old city"],
        ("Thailand", "Pattaya") => &["pattaya"],
        ("Thailand", "Krabi") => &["krabi", "phi phi"],
        ("Malaysia", "Kuala Lumpur") => &["kuala lumpur", "kl", "petronas"],
        ("Malaysia", "Penang") => &["penang", "georgetown"],
        ("Malaysia", "Johor Bahru") => &["johor bahru", "jb"],
        ("Malaysia", "Malacca") => &["malacca", "melaka"],
        _ => return vec![city.to_lowercase()],
    };
    fixed.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_city_has_center() {
        let c = city_center("Tokyo").unwrap();
        assert!((c.lat - 35.6762).abs() < 1e-9);
        assert!(city_center("Atlantis").is_none());
    }

    #[test]
    fn region_lookup() {
        assert_eq!(region_code("Japan"), Some("jp"));
        assert_eq!(region_code("Narnia"), None);
    }

    #[test]
    fn story_subreddits_fall_back_to_generic() {
        assert_eq!(
            story_subreddits("Iceland"),
            &["travel", "solotravel", "travelhacks"]
        );
        assert!(story_subreddits("Japan").contains(&"JapanTravel"));
    }

    #[test]
    fn trending_subreddits_include_city_channel() {
        let subs = trending_subreddits("Tokyo");
        assert!(subs.contains(&"tokyo".to_string()));
        assert!(subs.contains(&"Tokyo".to_string()));
        let subs = trending_subreddits("Fukuoka");
        assert!(subs.contains(&"fukuoka".to_string()));
        assert!(!subs.contains(&"Fukuoka".to_string()));
    }

    #[test]
    fn search_keywords_fall_back_to_city_name() {
        assert_eq!(city_search_keywords("France", "Paris"), vec!["paris"]);
        assert!(city_search_keywords("Japan", "Tokyo").contains(&"shibuya".to_string()));
    }
}
