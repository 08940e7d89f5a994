//! Static per-platform and per-category model coefficients.
//!
//! Lookup tables are `const fn` matches so a new platform or category is a
//! compile error until every table has a row for it.

use clout_types::{Category, Platform};

/// Coefficients the growth model reads for one platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformProfile {
    /// Additive weekly growth term.
    pub base_growth: f64,
    /// Half-width of the uniform growth variance.
    pub variance: f64,
    /// Impressions per follower relative to the baseline.
    pub view_multiplier: f64,
    /// Revenue per thousand followers at a full week.
    pub rpm: f64,
    /// Relative weight when a newcomer picks a platform.
    pub debut_weight: u32,
}

/// Coefficients the growth model reads for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    /// Additive weekly growth term.
    pub base_growth: f64,
    /// Revenue multiplier.
    pub revenue_multiplier: f64,
}

/// Look up the coefficients for a platform.
pub const fn platform_profile(platform: Platform) -> PlatformProfile {
    match platform {
        Platform::LongVideo => PlatformProfile {
            base_growth: 0.012,
            variance: 0.010,
            view_multiplier: 1.2,
            rpm: 4.0,
            debut_weight: 25,
        },
        Platform::ShortVideo => PlatformProfile {
            base_growth: 0.020,
            variance: 0.020,
            view_multiplier: 2.5,
            rpm: 1.5,
            debut_weight: 30,
        },
        Platform::Livestream => PlatformProfile {
            base_growth: 0.010,
            variance: 0.012,
            view_multiplier: 0.6,
            rpm: 3.0,
            debut_weight: 15,
        },
        Platform::PhotoFeed => PlatformProfile {
            base_growth: 0.014,
            variance: 0.010,
            view_multiplier: 1.5,
            rpm: 2.0,
            debut_weight: 20,
        },
        Platform::Podcast => PlatformProfile {
            base_growth: 0.008,
            variance: 0.006,
            view_multiplier: 0.4,
            rpm: 3.5,
            debut_weight: 10,
        },
    }
}

/// Look up the coefficients for a category.
pub const fn category_profile(category: Category) -> CategoryProfile {
    match category {
        Category::Gaming => CategoryProfile {
            base_growth: 0.004,
            revenue_multiplier: 1.0,
        },
        Category::Comedy => CategoryProfile {
            base_growth: 0.005,
            revenue_multiplier: 0.9,
        },
        Category::Beauty => CategoryProfile {
            base_growth: 0.003,
            revenue_multiplier: 1.3,
        },
        Category::Education => CategoryProfile {
            base_growth: 0.002,
            revenue_multiplier: 1.1,
        },
        Category::Music => CategoryProfile {
            base_growth: 0.004,
            revenue_multiplier: 0.8,
        },
        Category::Fitness => CategoryProfile {
            base_growth: 0.003,
            revenue_multiplier: 1.2,
        },
        Category::Tech => CategoryProfile {
            base_growth: 0.002,
            revenue_multiplier: 1.4,
        },
        Category::Lifestyle => CategoryProfile {
            base_growth: 0.003,
            revenue_multiplier: 1.0,
        },
    }
}

/// How likely a newcomer on `platform` is to make `category` content.
///
/// Weights are relative within one platform.
pub const fn category_affinity(platform: Platform, category: Category) -> u32 {
    match (platform, category) {
        (Platform::LongVideo, Category::Gaming | Category::Education | Category::Tech) => 20,
        (Platform::LongVideo, Category::Comedy) => 15,
        (Platform::LongVideo, _) => 7,
        (Platform::ShortVideo, Category::Comedy | Category::Beauty) => 25,
        (Platform::ShortVideo, Category::Music | Category::Lifestyle) => 15,
        (Platform::ShortVideo, _) => 5,
        (Platform::Livestream, Category::Gaming) => 50,
        (Platform::Livestream, Category::Music | Category::Tech) => 12,
        (Platform::Livestream, _) => 5,
        (Platform::PhotoFeed, Category::Beauty | Category::Lifestyle) => 30,
        (Platform::PhotoFeed, Category::Fitness) => 20,
        (Platform::PhotoFeed, _) => 4,
        (Platform::Podcast, Category::Comedy | Category::Education) => 25,
        (Platform::Podcast, Category::Tech) => 20,
        (Platform::Podcast, _) => 6,
    }
}
