//! Shared data types for report synthesis.
//!
//! Data sources:
//! - Diagnosis: decoded from the classification service's JSON response
//! - Localized disease text: locale store keyed by `diseases.<Crop>___<Disease>`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::report::utils::capitalize_first;

// ============================================================================
// Crop labels
// ============================================================================

/// The five crops the classifier has models for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropLabel {
    Rice,
    Wheat,
    Corn,
    Potato,
    Sugarcane,
}

impl CropLabel {
    pub const ALL: [CropLabel; 5] = [
        CropLabel::Rice,
        CropLabel::Wheat,
        CropLabel::Corn,
        CropLabel::Potato,
        CropLabel::Sugarcane,
    ];

    /// Wire label, as submitted in the `crop` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            CropLabel::Rice => "rice",
            CropLabel::Wheat => "wheat",
            CropLabel::Corn => "corn",
            CropLabel::Potato => "potato",
            CropLabel::Sugarcane => "sugarcane",
        }
    }

    /// Wire label with the first letter capitalized ("sugarcane" -> "Sugarcane").
    /// Used both for display and as the disease key prefix.
    pub fn display_name(&self) -> String {
        capitalize_first(self.as_str())
    }

    /// Class names emitted by this crop's model, in training order.
    pub fn disease_classes(&self) -> &'static [&'static str] {
        match self {
            CropLabel::Rice => &[
                "Rice___Brown_Spot",
                "Rice___Healthy",
                "Rice___Leaf_Blast",
                "Rice___Neck_Blast",
            ],
            CropLabel::Wheat => &["Wheat___Brown_Rust", "Wheat___Healthy", "Wheat___Yellow_Rust"],
            CropLabel::Corn => &[
                "Corn___Common_Rust",
                "Corn___Healthy",
                "Corn___Gray_Leaf_Spot",
                "Corn___Northern_Leaf_Blight",
            ],
            CropLabel::Potato => &["Potato___Early_Blight", "Potato___Healthy", "Potato___Late_Blight"],
            CropLabel::Sugarcane => &[
                "Sugarcane___Bacterial_Blight",
                "Sugarcane___Healthy",
                "Sugarcane___Red_Rot",
            ],
        }
    }
}

impl fmt::Display for CropLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropLabel {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        CropLabel::ALL
            .into_iter()
            .find(|crop| crop.as_str() == wanted)
            .ok_or_else(|| ReportError::UnknownCrop(s.to_string()))
    }
}

// ============================================================================
// Diagnosis
// ============================================================================

/// Photo the diagnosis was made from, embedded as a thumbnail when present.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Baseline JPEG bytes.
    pub jpeg: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("bytes", &self.jpeg.len())
            .field("width_px", &self.width_px)
            .field("height_px", &self.height_px)
            .finish()
    }
}

/// Result of one classification call. Read-only for the whole synthesis.
#[derive(Debug, Clone, Default)]
pub struct DiagnosisResult {
    /// Display name, e.g. "Red Rot". Empty for healthy results.
    pub disease_label: String,
    /// 0-100.
    pub confidence_percent: f64,
    pub is_healthy: bool,
    pub description: String,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
    pub organic_remedies: Option<Vec<String>>,
    pub source_image: Option<SourceImage>,
}

impl DiagnosisResult {
    /// The field as carried on the result itself (last step of the resolver cascade).
    pub fn field(&self, field: DiseaseField) -> FieldValue {
        match field {
            DiseaseField::Description => FieldValue::Text(self.description.clone()),
            DiseaseField::Treatment => FieldValue::List(self.treatment.clone()),
            DiseaseField::Prevention => FieldValue::List(self.prevention.clone()),
            DiseaseField::OrganicPesticides => {
                FieldValue::List(self.organic_remedies.clone().unwrap_or_default())
            }
        }
    }
}

// ============================================================================
// Disease information fields
// ============================================================================

/// The four fields of a disease information bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiseaseField {
    Description,
    Treatment,
    Prevention,
    OrganicPesticides,
}

impl DiseaseField {
    pub const ALL: [DiseaseField; 4] = [
        DiseaseField::Description,
        DiseaseField::Treatment,
        DiseaseField::Prevention,
        DiseaseField::OrganicPesticides,
    ];

    /// Key of this field inside a locale bundle.
    pub fn key(&self) -> &'static str {
        match self {
            DiseaseField::Description => "description",
            DiseaseField::Treatment => "treatment",
            DiseaseField::Prevention => "prevention",
            DiseaseField::OrganicPesticides => "organic_pesticides",
        }
    }

    pub fn is_list(&self) -> bool {
        !matches!(self, DiseaseField::Description)
    }
}

/// A resolved field: free text for the description, a list otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Decode a locale value for `field`. `None` when the JSON type does not fit.
    pub fn from_json(field: DiseaseField, value: &Value) -> Option<Self> {
        if field.is_list() {
            let items = value.as_array()?;
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(FieldValue::List)
        } else {
            value.as_str().map(|s| FieldValue::Text(s.to_string()))
        }
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::List(items) => items.join(" "),
        }
    }

    pub fn into_list(self) -> Vec<String> {
        match self {
            FieldValue::Text(text) if text.is_empty() => Vec::new(),
            FieldValue::Text(text) => vec![text],
            FieldValue::List(items) => items,
        }
    }
}

/// Localized counterpart of the disease fields on `DiagnosisResult`.
/// Rebuilt per render from the Text Resolver, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseInfoBundle {
    pub description: String,
    pub treatment: Vec<String>,
    pub prevention: Vec<String>,
    pub organic_pesticides: Vec<String>,
}

impl DiseaseInfoBundle {
    pub fn get(&self, field: DiseaseField) -> FieldValue {
        match field {
            DiseaseField::Description => FieldValue::Text(self.description.clone()),
            DiseaseField::Treatment => FieldValue::List(self.treatment.clone()),
            DiseaseField::Prevention => FieldValue::List(self.prevention.clone()),
            DiseaseField::OrganicPesticides => FieldValue::List(self.organic_pesticides.clone()),
        }
    }
}

// ============================================================================
// Classification response (wire format)
// ============================================================================

/// JSON body returned by the classification service on success.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResponse {
    pub is_healthy: bool,
    #[serde(default)]
    pub disease: Option<String>,
    pub confidence: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
    #[serde(default, rename = "organic_pesticides")]
    pub organic_pesticides: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ClassificationResponse {
    /// Decode a response body, turning `{ "error": ... }` bodies into
    /// `ReportError::Classification`.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ReportError::InvalidResponse(e.to_string()))?;

        if let Ok(err) = serde_json::from_value::<ErrorBody>(value.clone()) {
            return Err(ReportError::Classification(err.error));
        }

        serde_json::from_value(value).map_err(|e| ReportError::InvalidResponse(e.to_string()))
    }

    /// Validate and convert into the immutable result the synthesizer consumes.
    pub fn into_diagnosis(self) -> Result<DiagnosisResult> {
        if !(0.0..=100.0).contains(&self.confidence) {
            return Err(ReportError::InvalidResponse(format!(
                "confidence {} outside 0-100",
                self.confidence
            )));
        }

        let disease_label = match (self.is_healthy, self.disease) {
            (true, _) => String::new(),
            (false, Some(disease)) if !disease.trim().is_empty() => disease,
            (false, _) => {
                return Err(ReportError::InvalidResponse(
                    "diseased result without a disease label".to_string(),
                ))
            }
        };

        Ok(DiagnosisResult {
            disease_label,
            confidence_percent: self.confidence,
            is_healthy: self.is_healthy,
            description: self.description,
            treatment: self.treatment,
            prevention: self.prevention,
            organic_remedies: self.organic_pesticides,
            source_image: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_crop_parse_is_case_insensitive() {
        assert_eq!("Sugarcane".parse::<CropLabel>().unwrap(), CropLabel::Sugarcane);
        assert_eq!(" rice ".parse::<CropLabel>().unwrap(), CropLabel::Rice);
        assert!(matches!("barley".parse::<CropLabel>(), Err(ReportError::UnknownCrop(_))));
    }

    #[test]
    fn test_crop_display_name() {
        assert_eq!(CropLabel::Potato.display_name(), "Potato");
        assert_eq!(CropLabel::Sugarcane.display_name(), "Sugarcane");
    }

    #[test]
    fn test_every_crop_has_a_healthy_class() {
        for crop in CropLabel::ALL {
            let healthy = format!("{}___Healthy", crop.display_name());
            assert!(crop.disease_classes().contains(&healthy.as_str()));
        }
    }

    #[test]
    fn test_field_value_from_json() {
        let list = FieldValue::from_json(DiseaseField::Treatment, &json!(["a", "b"]));
        assert_eq!(list, Some(FieldValue::List(vec!["a".into(), "b".into()])));

        // Mixed arrays and wrong types do not decode
        assert_eq!(FieldValue::from_json(DiseaseField::Treatment, &json!(["a", 1])), None);
        assert_eq!(FieldValue::from_json(DiseaseField::Description, &json!(["a"])), None);
    }

    #[test]
    fn test_decode_diseased_response() {
        let body = r#"{
            "isHealthy": false,
            "disease": "Leaf Rust",
            "confidence": 55,
            "description": "Orange pustules.",
            "treatment": ["t1", "t2"],
            "prevention": ["p1"],
            "organic_pesticides": []
        }"#;
        let result = ClassificationResponse::from_json(body)
            .unwrap()
            .into_diagnosis()
            .unwrap();

        assert_eq!(result.disease_label, "Leaf Rust");
        assert_eq!(result.confidence_percent, 55.0);
        assert_eq!(result.treatment.len(), 2);
        assert_eq!(result.organic_remedies, Some(vec![]));
    }

    #[test]
    fn test_decode_healthy_response_without_disease() {
        let body = r#"{"isHealthy": true, "confidence": 96.4, "description": "Fine",
                       "treatment": [], "prevention": ["Keep watching"]}"#;
        let result = ClassificationResponse::from_json(body)
            .unwrap()
            .into_diagnosis()
            .unwrap();

        assert!(result.is_healthy);
        assert!(result.disease_label.is_empty());
        assert!(result.organic_remedies.is_none());
    }

    #[test]
    fn test_decode_error_body() {
        let err = ClassificationResponse::from_json(r#"{"error": "Invalid crop type"}"#).unwrap_err();
        assert!(matches!(err, ReportError::Classification(msg) if msg == "Invalid crop type"));
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let body = r#"{"isHealthy": true, "confidence": 140}"#;
        let err = ClassificationResponse::from_json(body)
            .unwrap()
            .into_diagnosis()
            .unwrap_err();
        assert!(matches!(err, ReportError::InvalidResponse(_)));
    }
}
