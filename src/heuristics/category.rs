// src/heuristics/category.rs
//! Category assignment for places and tips.
//!
//! Both follow the same scheme: scan a fixed ordered table and return the
//! first category with a match, with a catch-all default. For places the
//! Popular Destinations check runs BEFORE the type-based categories — a
//! landmark tagged as a park is still a landmark.

use serde::{Deserialize, Serialize};

use crate::geo::city_landmarks;

/// Generic landmark terms; a place name containing one of these is a
/// Popular Destination regardless of type tags.
const POPULAR_DESTINATION_KEYWORDS: &[&str] = &[
    "tower",
    "skytree",
    "sky tree",
    "palace",
    "castle",
    "garden",
    "museum",
    "park",
    "shrine",
    "temple",
    "mount",
    "mt ",
    "observation",
    "viewpoint",
    "national",
    "heritage",
];

/// Display category of an aggregated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceCategory {
    Food,
    Nightlife,
    Shopping,
    Attractions,
    Landmarks,
    #[serde(rename = "Popular Destinations")]
    PopularDestinations,
    Trending,
}

impl PlaceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Food => "Food",
            PlaceCategory::Nightlife => "Nightlife",
            PlaceCategory::Shopping => "Shopping",
            PlaceCategory::Attractions => "Attractions",
            PlaceCategory::Landmarks => "Landmarks",
            PlaceCategory::PopularDestinations => "Popular Destinations",
            PlaceCategory::Trending => "Trending",
        }
    }
}

/// Tip category, ordered as scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Food,
    Transport,
    Itinerary,
    Budget,
    Mistakes,
    General,
}

// Ordered: first category whose keyword list matches wins.
const TIP_CATEGORY_KEYWORDS: &[(TipCategory, &[&str])] = &[
    (
        TipCategory::Food,
        &[
            "food", "eat", "restaurant", "ramen", "sushi", "meal", "cuisine", "café", "coffee",
            "drink", "taste", "flavor",
        ],
    ),
    (
        TipCategory::Transport,
        &[
            "train", "bus", "transport", "taxi", "subway", "metro", "rail", "ticket", "suica",
            "ic card", "walk", "bike",
        ],
    ),
    (
        TipCategory::Itinerary,
        &[
            "itinerary", "day trip", "planning", "schedule", "visit", "explore", "route",
            "circuit", "order", "when",
        ],
    ),
    (
        TipCategory::Budget,
        &[
            "budget", "cost", "expensive", "cheap", "price", "money", "save", "value",
            "discount", "pass", "free",
        ],
    ),
    (
        TipCategory::Mistakes,
        &[
            "avoid", "don't", "mistake", "wrong", "learned", "regret", "wish", "not",
            "don't waste", "trap",
        ],
    ),
];

/// First matching category, substring match over the lower-cased text;
/// `General` when nothing matches.
pub fn categorize_tip(text: &str) -> TipCategory {
    let lower = text.to_lowercase();
    for (category, keywords) in TIP_CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return *category;
        }
    }
    TipCategory::General
}

/// Categorize a place from its type tags and name. Landmark-by-name takes
/// precedence over every type-based bucket.
pub fn categorize_place(types: &[String], name: &str, city: &str, country: &str) -> PlaceCategory {
    let joined_types = types.join(" ").to_lowercase();
    let name_lower = name.to_lowercase();

    let is_landmark_name = POPULAR_DESTINATION_KEYWORDS
        .iter()
        .any(|kw| name_lower.contains(kw))
        || city_landmarks(country, city)
            .iter()
            .any(|kw| name_lower.contains(kw));
    if is_landmark_name {
        return PlaceCategory::PopularDestinations;
    }

    let has_type = |t: &str| types.iter().any(|x| x == t);

    if has_type("restaurant") || has_type("cafe") || has_type("bar") || joined_types.contains("food")
    {
        return PlaceCategory::Food;
    }
    if has_type("night_club") || has_type("bar") || has_type("nightclub")
        || joined_types.contains("night")
    {
        return PlaceCategory::Nightlife;
    }
    if has_type("shopping_mall") || has_type("store") || has_type("department_store")
        || joined_types.contains("shop")
    {
        return PlaceCategory::Shopping;
    }
    if has_type("amusement_park")
        || has_type("park")
        || has_type("point_of_interest")
        || has_type("tourist_attraction")
        || has_type("museum")
        || has_type("library")
        || joined_types.contains("park")
        || joined_types.contains("temple")
        || joined_types.contains("shrine")
        || joined_types.contains("landmark")
        || joined_types.contains("monument")
    {
        return PlaceCategory::Attractions;
    }
    if joined_types.contains("temple")
        || joined_types.contains("shrine")
        || joined_types.contains("historic")
        || joined_types.contains("cathedral")
        || joined_types.contains("mosque")
        || has_type("mosque")
        || joined_types.contains("observation")
    {
        return PlaceCategory::Landmarks;
    }

    PlaceCategory::Attractions
}
