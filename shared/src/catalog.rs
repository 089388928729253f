//! Static food-category content and placeholder image lookup.
//!
//! Read-only tables consumed by presentation code; nothing here is computed.

use serde::Serialize;

/// A curated food category shown on the landing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub health_benefits: &'static [&'static str],
    pub image_id: &'static str,
}

/// A placeholder image reference.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderImage {
    pub id: &'static str,
    pub image_url: &'static str,
    pub description: &'static str,
    pub image_hint: &'static str,
}

pub const FOOD_CATEGORIES: &[FoodCategory] = &[
    FoodCategory {
        id: "leafy-greens",
        name: "Leafy Greens",
        description: "Packed with vitamins, minerals, and fiber, leafy greens like spinach, kale, and lettuce are a cornerstone of a healthy diet.",
        health_benefits: &[
            "Rich in vitamins A, C, and K.",
            "Excellent source of antioxidants.",
            "Promotes bone health with high calcium content.",
            "Supports heart health by improving cholesterol levels.",
        ],
        image_id: "leafy-greens",
    },
    FoodCategory {
        id: "fruits",
        name: "Colorful Fruits",
        description: "Naturally sweet and loaded with nutrients, fruits like berries, oranges, and apples provide essential vitamins and fight inflammation.",
        health_benefits: &[
            "High in fiber, aiding digestion and promoting fullness.",
            "Boosts immune system with high vitamin C content.",
            "Reduces risk of chronic diseases.",
            "Provides natural energy.",
        ],
        image_id: "fruits",
    },
    FoodCategory {
        id: "whole-grains",
        name: "Whole Grains",
        description: "Whole grains such as oats, quinoa, and brown rice are complex carbohydrates that provide sustained energy and are rich in fiber.",
        health_benefits: &[
            "Lowers risk of heart disease, stroke, and type 2 diabetes.",
            "Supports healthy digestion and prevents constipation.",
            "Helps with weight management.",
            "Provides important nutrients like B vitamins and iron.",
        ],
        image_id: "whole-grains",
    },
    FoodCategory {
        id: "lean-proteins",
        name: "Lean Proteins",
        description: "Essential for building and repairing tissues, lean proteins like chicken, fish, and legumes are vital for muscle growth and function.",
        health_benefits: &[
            "Builds and maintains muscle mass.",
            "Keeps you feeling full longer, aiding in weight control.",
            "Supports a healthy metabolism.",
            "Essential for hormone production and immune function.",
        ],
        image_id: "lean-proteins",
    },
    FoodCategory {
        id: "healthy-fats",
        name: "Healthy Fats",
        description: "Found in avocados, nuts, seeds, and olive oil, healthy fats are crucial for brain health and reducing inflammation.",
        health_benefits: &[
            "Supports brain function and improves memory.",
            "Reduces bad cholesterol levels.",
            "Helps absorb fat-soluble vitamins (A, D, E, K).",
            "Promotes healthy skin and hair.",
        ],
        image_id: "healthy-fats",
    },
    FoodCategory {
        id: "dairy-alternatives",
        name: "Dairy & Alternatives",
        description: "Sources of calcium and vitamin D, dairy products and their plant-based alternatives (like almond or soy milk) support strong bones.",
        health_benefits: &[
            "Crucial for building and maintaining strong bones and teeth.",
            "Provides high-quality protein.",
            "Fortified versions are a great source of Vitamin D.",
            "Supports nerve function and muscle contraction.",
        ],
        image_id: "dairy-alternatives",
    },
];

pub const PLACEHOLDER_IMAGES: &[PlaceholderImage] = &[
    PlaceholderImage {
        id: "student-project-hero",
        image_url: "https://picsum.photos/seed/student-project-hero/1600/900",
        description: "A colorful spread of healthy food on a wooden table",
        image_hint: "healthy food",
    },
    PlaceholderImage {
        id: "leafy-greens",
        image_url: "https://picsum.photos/seed/leafy-greens/600/400",
        description: "A bowl of fresh spinach and kale leaves",
        image_hint: "leafy greens",
    },
    PlaceholderImage {
        id: "fruits",
        image_url: "https://picsum.photos/seed/fruits/600/400",
        description: "An assortment of colorful fresh fruits",
        image_hint: "colorful fruits",
    },
    PlaceholderImage {
        id: "whole-grains",
        image_url: "https://picsum.photos/seed/whole-grains/600/400",
        description: "Bowls of oats, quinoa, and brown rice",
        image_hint: "whole grains",
    },
    PlaceholderImage {
        id: "lean-proteins",
        image_url: "https://picsum.photos/seed/lean-proteins/600/400",
        description: "Grilled chicken breast served with legumes",
        image_hint: "lean protein",
    },
    PlaceholderImage {
        id: "healthy-fats",
        image_url: "https://picsum.photos/seed/healthy-fats/600/400",
        description: "Sliced avocado, mixed nuts, and olive oil",
        image_hint: "healthy fats",
    },
    PlaceholderImage {
        id: "dairy-alternatives",
        image_url: "https://picsum.photos/seed/dairy-alternatives/600/400",
        description: "A glass of milk beside almond and soy alternatives",
        image_hint: "dairy products",
    },
];

/// Look up the placeholder image backing a category's image reference.
pub fn category_image(image_id: &str) -> Option<&'static PlaceholderImage> {
    PLACEHOLDER_IMAGES.iter().find(|img| img.id == image_id)
}
