//! Text Resolver
//!
//! Resolves a disease-dependent field (description, treatment, prevention,
//! organic remedies) through an ordered list of strategies. The first strategy
//! that answers wins; the default list always ends with the result's own text.

pub mod store;
pub mod strategies;

pub use store::{LocaleLookup, LocaleStore};
pub use strategies::{
    default_strategies, lookup_bundle, BundleStrategy, FieldStrategy, ResolveRequest,
    ResolveStrategy, ResultFallback,
};

use crate::error::Result;
use crate::report::types::{CropLabel, DiagnosisResult, DiseaseField, DiseaseInfoBundle, FieldValue};

/// Separator between the crop and disease parts of a disease key.
pub const KEY_SEPARATOR: &str = "___";

/// Build the composite lookup key: `sugarcane` + `"Red Rot"` -> `Sugarcane___Red_Rot`.
pub fn disease_key(crop: CropLabel, disease_label: &str) -> String {
    format!(
        "{}{}{}",
        crop.display_name(),
        KEY_SEPARATOR,
        disease_label.replace(' ', "_")
    )
}

pub struct TextResolver {
    locale: Box<dyn LocaleLookup>,
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl TextResolver {
    /// Resolver over `locale` with the standard bundle -> field -> result cascade.
    pub fn new(locale: impl LocaleLookup + 'static) -> Self {
        Self::with_strategies(locale, default_strategies())
    }

    pub fn with_strategies(
        locale: impl LocaleLookup + 'static,
        strategies: Vec<Box<dyn ResolveStrategy>>,
    ) -> Self {
        Self {
            locale: Box::new(locale),
            strategies,
        }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve one field. Healthy results skip the locale strategies because
    /// there is no disease to build a key from.
    pub fn resolve(
        &self,
        crop: CropLabel,
        result: &DiagnosisResult,
        field: DiseaseField,
    ) -> Result<FieldValue> {
        let key = if result.is_healthy || result.disease_label.is_empty() {
            None
        } else {
            Some(disease_key(crop, &result.disease_label))
        };

        let request = ResolveRequest {
            key: key.as_deref(),
            field,
            result,
            locale: self.locale.as_ref(),
        };

        for strategy in &self.strategies {
            if let Some(value) = strategy.resolve(&request)? {
                tracing::debug!(
                    "Resolved `{}` for {} via {}",
                    field.key(),
                    key.as_deref().unwrap_or("<healthy>"),
                    strategy.name()
                );
                return Ok(value);
            }
        }

        // Custom strategy lists may omit the fallback; the result's text still applies
        Ok(result.field(field))
    }

    pub fn resolve_text(
        &self,
        crop: CropLabel,
        result: &DiagnosisResult,
        field: DiseaseField,
    ) -> Result<String> {
        self.resolve(crop, result, field).map(FieldValue::into_text)
    }

    pub fn resolve_list(
        &self,
        crop: CropLabel,
        result: &DiagnosisResult,
        field: DiseaseField,
    ) -> Result<Vec<String>> {
        self.resolve(crop, result, field).map(FieldValue::into_list)
    }

    /// All four fields, each resolved independently.
    pub fn bundle(&self, crop: CropLabel, result: &DiagnosisResult) -> Result<DiseaseInfoBundle> {
        Ok(DiseaseInfoBundle {
            description: self.resolve_text(crop, result, DiseaseField::Description)?,
            treatment: self.resolve_list(crop, result, DiseaseField::Treatment)?,
            prevention: self.resolve_list(crop, result, DiseaseField::Prevention)?,
            organic_pesticides: self.resolve_list(crop, result, DiseaseField::OrganicPesticides)?,
        })
    }
}

impl Default for TextResolver {
    fn default() -> Self {
        Self::new(LocaleStore::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn red_rot() -> DiagnosisResult {
        DiagnosisResult {
            disease_label: "Red Rot".to_string(),
            confidence_percent: 88.0,
            description: "result description".to_string(),
            treatment: vec!["result treatment".to_string()],
            prevention: vec!["result prevention".to_string()],
            organic_remedies: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_disease_key_format() {
        assert_eq!(disease_key(CropLabel::Sugarcane, "Red Rot"), "Sugarcane___Red_Rot");
        assert_eq!(
            disease_key(CropLabel::Corn, "Northern Leaf Blight"),
            "Corn___Northern_Leaf_Blight"
        );
    }

    #[test]
    fn test_full_bundle_takes_precedence() {
        let resolver = TextResolver::new(LocaleStore::builtin());
        let treatment = resolver
            .resolve_list(CropLabel::Sugarcane, &red_rot(), DiseaseField::Treatment)
            .unwrap();
        assert_eq!(treatment[0], "Apply lime sulfur solution");
    }

    #[test]
    fn test_partial_bundle_falls_through_to_field_lookup() {
        // Bundle lacks organic_pesticides, so its description must not be used;
        // the per-field entry answers instead.
        let locale = LocaleStore::from_value(json!({
            "diseases": { "Sugarcane___Red_Rot": {
                "description": { "description": "per-field description" },
                "treatment": ["bundle treatment"],
                "prevention": ["bundle prevention"]
            }}
        }));
        let resolver = TextResolver::new(locale);
        let description = resolver
            .resolve_text(CropLabel::Sugarcane, &red_rot(), DiseaseField::Description)
            .unwrap();
        assert_eq!(description, "per-field description");

        // Treatment has no per-field object either: falls back to the result
        let treatment = resolver
            .resolve_list(CropLabel::Sugarcane, &red_rot(), DiseaseField::Treatment)
            .unwrap();
        assert_eq!(treatment, vec!["result treatment".to_string()]);
    }

    #[test]
    fn test_no_locale_uses_result() {
        let resolver = TextResolver::new(LocaleStore::empty());
        let bundle = resolver.bundle(CropLabel::Sugarcane, &red_rot()).unwrap();
        assert_eq!(bundle.description, "result description");
        assert!(bundle.organic_pesticides.is_empty());
    }

    #[test]
    fn test_healthy_result_ignores_locale() {
        let resolver = TextResolver::default();
        let healthy = DiagnosisResult {
            is_healthy: true,
            confidence_percent: 96.0,
            description: "No signs of disease detected.".to_string(),
            ..Default::default()
        };
        let description = resolver
            .resolve_text(CropLabel::Rice, &healthy, DiseaseField::Description)
            .unwrap();
        assert_eq!(description, "No signs of disease detected.");
    }

    #[test]
    fn test_custom_strategy_order() {
        let resolver = TextResolver::with_strategies(
            LocaleStore::builtin(),
            vec![Box::new(ResultFallback), Box::new(BundleStrategy)],
        );
        assert_eq!(resolver.strategy_names(), vec!["result", "bundle"]);

        let description = resolver
            .resolve_text(CropLabel::Sugarcane, &red_rot(), DiseaseField::Description)
            .unwrap();
        assert_eq!(description, "result description");
    }

    #[test]
    fn test_disease_label_with_dot_still_resolves() {
        let locale = LocaleStore::from_value(json!({
            "diseases": { "Corn___Leaf_Spot_v.2": {
                "description": "dotted bundle",
                "treatment": ["dotted treatment"],
                "prevention": [],
                "organic_pesticides": []
            }}
        }));
        let resolver = TextResolver::new(locale);
        let result = DiagnosisResult {
            disease_label: "Leaf Spot v.2".to_string(),
            confidence_percent: 70.0,
            description: "result description".to_string(),
            ..Default::default()
        };

        let description = resolver
            .resolve_text(CropLabel::Corn, &result, DiseaseField::Description)
            .unwrap();
        assert_eq!(description, "dotted bundle");
    }
}
