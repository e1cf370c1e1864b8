//! Built-in Disease Catalogue
//!
//! English reference text for every disease class the classifier can emit.
//! Seeds a `LocaleStore` so the resolver's bundle step can answer without an
//! external locale file.
//!
//! Keys follow the disease key format: `<Crop>___<Disease_With_Underscores>`.

use serde_json::{json, Map, Value};

/// A single catalogue entry.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub description: &'static str,
    pub treatment: &'static [&'static str],
    pub prevention: &'static [&'static str],
    pub organic_pesticides: &'static [&'static str],
}

impl CatalogEntry {
    fn to_json(&self) -> Value {
        json!({
            "description": self.description,
            "treatment": self.treatment,
            "prevention": self.prevention,
            "organic_pesticides": self.organic_pesticides,
        })
    }
}

// ============================================================================
// EMBEDDED CATALOGUE
// ============================================================================

static DISEASES: &[CatalogEntry] = &[
    CatalogEntry {
        key: "Rice___Brown_Spot",
        description: "Brown lesions on leaves, reducing grain filling and leading to poor yield.",
        treatment: &["Use azoxystrobin-based fungicides", "Apply potassium fertilizers"],
        prevention: &["Use nitrogen fertilizer correctly", "Avoid prolonged leaf wetness"],
        organic_pesticides: &["Neem seed extract", "Trichoderma-based biofungicide"],
    },
    CatalogEntry {
        key: "Rice___Leaf_Blast",
        description: "Fungal infection causing spindle-shaped lesions, leading to leaf collapse.",
        treatment: &["Use tricyclazole fungicides", "Drain flooded fields"],
        prevention: &["Maintain optimal plant spacing", "Apply silicon fertilizers"],
        organic_pesticides: &["Bacillus subtilis spray", "Garlic-chili extract"],
    },
    CatalogEntry {
        key: "Rice___Neck_Blast",
        description: "Affects rice panicles, causing them to turn black and dry, leading to yield loss.",
        treatment: &["Apply tricyclazole fungicides", "Remove infected panicles"],
        prevention: &["Use balanced fertilization", "Avoid excessive nitrogen"],
        organic_pesticides: &["Neem cake extract", "Asafoetida-based spray"],
    },
    CatalogEntry {
        key: "Wheat___Brown_Rust",
        description: "A fungal disease causing reddish-brown pustules on wheat leaves, reducing grain quality.",
        treatment: &["Spray propiconazole fungicide", "Increase potassium levels"],
        prevention: &["Use resistant wheat varieties", "Apply balanced fertilizers"],
        organic_pesticides: &["Sulfur dust", "Garlic oil solution"],
    },
    CatalogEntry {
        key: "Wheat___Yellow_Rust",
        description: "Yellowish pustules on wheat leaves leading to reduced photosynthesis and yield loss.",
        treatment: &["Use tebuconazole fungicides", "Apply foliar sulfur sprays"],
        prevention: &["Avoid late sowing", "Ensure proper plant nutrition"],
        organic_pesticides: &["Bordeaux mixture", "Neem seed oil"],
    },
    CatalogEntry {
        key: "Corn___Common_Rust",
        description: "A fungal disease causing orange to brown pustules on leaves, reducing photosynthesis.",
        treatment: &["Apply fungicides like mancozeb", "Remove infected plant debris"],
        prevention: &[
            "Plant resistant varieties",
            "Use proper crop rotation",
            "Avoid overhead irrigation",
        ],
        organic_pesticides: &["Neem oil spray", "Copper-based fungicides"],
    },
    CatalogEntry {
        key: "Corn___Gray_Leaf_Spot",
        description: "Grayish lesions on leaves that expand and merge, leading to reduced crop yield.",
        treatment: &["Use foliar fungicides", "Increase nitrogen levels moderately"],
        prevention: &["Ensure good air circulation", "Rotate crops regularly"],
        organic_pesticides: &["Baking soda solution", "Garlic oil spray"],
    },
    CatalogEntry {
        key: "Corn___Northern_Leaf_Blight",
        description: "A fungal disease causing elongated grayish lesions on corn leaves, reducing yield.",
        treatment: &["Use triazole-based fungicides", "Destroy infected leaves"],
        prevention: &["Plant resistant hybrids", "Avoid excessive nitrogen use"],
        organic_pesticides: &["Neem extract spray", "Bordeaux mixture"],
    },
    CatalogEntry {
        key: "Potato___Early_Blight",
        description: "Dark concentric spots on leaves that can spread and cause defoliation.",
        treatment: &["Apply chlorothalonil fungicide", "Remove infected leaves"],
        prevention: &["Use certified disease-free seeds", "Ensure proper drainage"],
        organic_pesticides: &["Compost tea spray", "Copper sulfate"],
    },
    CatalogEntry {
        key: "Potato___Late_Blight",
        description: "A severe fungal disease causing water-soaked lesions, leading to crop destruction.",
        treatment: &["Use metalaxyl-based fungicides", "Destroy infected tubers"],
        prevention: &["Rotate potato crops", "Plant resistant varieties"],
        organic_pesticides: &["Bordeaux mixture", "Neem oil"],
    },
    CatalogEntry {
        key: "Sugarcane___Bacterial_Blight",
        description: "Bacterial infection in sugarcane causing leaf streaks, reducing sugar production.",
        treatment: &["Use copper bactericides", "Remove infected canes"],
        prevention: &["Plant disease-free sugarcane", "Avoid overhead irrigation"],
        organic_pesticides: &["Bacillus-based biopesticides", "Chitosan spray"],
    },
    CatalogEntry {
        key: "Sugarcane___Red_Rot",
        description: "A severe fungal disease in sugarcane causing reddish discoloration inside stems.",
        treatment: &["Apply lime sulfur solution", "Destroy infected canes"],
        prevention: &["Use resistant sugarcane varieties", "Avoid mechanical injuries"],
        organic_pesticides: &["Neem leaf extract", "Fungus-based biocontrol agents"],
    },
];

// ============================================================================
// LOOKUP
// ============================================================================

/// Find the entry for a disease key (`Rice___Leaf_Blast`).
pub fn lookup(key: &str) -> Option<&'static CatalogEntry> {
    DISEASES.iter().find(|entry| entry.key == key)
}

/// Catalogue as a locale document: `{ "diseases": { "<key>": { ...four fields } } }`.
pub fn to_locale_document() -> Value {
    let diseases: Map<String, Value> = DISEASES
        .iter()
        .map(|entry| (entry.key.to_string(), entry.to_json()))
        .collect();
    json!({ "diseases": diseases })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::CropLabel;

    #[test]
    fn test_every_disease_class_is_catalogued() {
        for crop in CropLabel::ALL {
            for class in crop.disease_classes() {
                if class.ends_with("___Healthy") {
                    continue;
                }
                assert!(lookup(class).is_some(), "missing catalogue entry for {}", class);
            }
        }
    }

    #[test]
    fn test_locale_document_shape() {
        let doc = to_locale_document();
        let red_rot = &doc["diseases"]["Sugarcane___Red_Rot"];
        assert_eq!(red_rot["treatment"][0], "Apply lime sulfur solution");
        assert_eq!(red_rot["organic_pesticides"].as_array().map(Vec::len), Some(2));
    }
}
