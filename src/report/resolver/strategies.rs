//! Resolver strategies, tried in order until one answers.
//!
//! Default cascade:
//! 1. `BundleStrategy`  - full four-field bundle at `diseases.<key>`
//! 2. `FieldStrategy`   - per-field object at `diseases.<key>.<field>`
//! 3. `ResultFallback`  - the text already carried on the diagnosis result

use serde_json::Value;

use crate::error::{ReportError, Result};
use crate::report::resolver::store::LocaleLookup;
use crate::report::types::{DiagnosisResult, DiseaseField, DiseaseInfoBundle, FieldValue};

/// Everything a strategy may look at for one field lookup.
pub struct ResolveRequest<'a> {
    /// Disease key, `None` for healthy results (there is no disease to key on).
    pub key: Option<&'a str>,
    pub field: DiseaseField,
    pub result: &'a DiagnosisResult,
    pub locale: &'a dyn LocaleLookup,
}

pub trait ResolveStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `Ok(None)` passes the request to the next strategy.
    /// `Err` aborts the whole resolution.
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<FieldValue>>;
}

/// Root of all disease entries in a locale document.
pub const DISEASES_NAMESPACE: &str = "diseases";

// ============================================================================
// Bundle
// ============================================================================

/// Accepts `diseases.<key>` only when it is an object holding all four fields.
pub struct BundleStrategy;

impl ResolveStrategy for BundleStrategy {
    fn name(&self) -> &'static str {
        "bundle"
    }

    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<FieldValue>> {
        let Some(key) = request.key else {
            return Ok(None);
        };

        let bundle = match lookup_bundle(request.locale, key) {
            Ok(Some(bundle)) => bundle,
            Ok(None) => return Ok(None),
            Err(ReportError::ResolutionIncomplete { key, field }) => {
                tracing::debug!("Bundle {} rejected: missing `{}`", key, field);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        // An empty description counts as absent and defers to the next strategy
        match bundle.get(request.field) {
            FieldValue::Text(text) if text.is_empty() => Ok(None),
            value => Ok(Some(value)),
        }
    }
}

/// Look up and validate the bundle for `key`.
///
/// - `Ok(None)`: nothing (or a non-object) stored under the key
/// - `Err(ResolutionIncomplete)`: an object missing at least one required field
/// - `Err(MalformedBundle)`: all four fields present, one with the wrong type
pub fn lookup_bundle(locale: &dyn LocaleLookup, key: &str) -> Result<Option<DiseaseInfoBundle>> {
    tracing::debug!("Looking up disease bundle {}.{}", DISEASES_NAMESPACE, key);

    let Some(Value::Object(map)) = locale.lookup_path(&[DISEASES_NAMESPACE, key]) else {
        return Ok(None);
    };

    if let Some(missing) = DiseaseField::ALL.iter().find(|f| !map.contains_key(f.key())) {
        return Err(ReportError::ResolutionIncomplete {
            key: key.to_string(),
            field: missing.key(),
        });
    }

    let decode = |field: DiseaseField| {
        FieldValue::from_json(field, &map[field.key()]).ok_or_else(|| ReportError::MalformedBundle {
            key: key.to_string(),
            field: field.key(),
        })
    };

    Ok(Some(DiseaseInfoBundle {
        description: decode(DiseaseField::Description)?.into_text(),
        treatment: decode(DiseaseField::Treatment)?.into_list(),
        prevention: decode(DiseaseField::Prevention)?.into_list(),
        organic_pesticides: decode(DiseaseField::OrganicPesticides)?.into_list(),
    }))
}

// ============================================================================
// Per-field
// ============================================================================

/// Looks up `diseases.<key>.<field>` and accepts it only when that value is
/// itself an object containing `<field>`.
pub struct FieldStrategy;

impl ResolveStrategy for FieldStrategy {
    fn name(&self) -> &'static str {
        "field"
    }

    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<FieldValue>> {
        let Some(key) = request.key else {
            return Ok(None);
        };

        let field_key = request.field.key();
        let dotted = format!("{}.{}.{}", DISEASES_NAMESPACE, key, field_key);
        tracing::debug!("Trying per-field key {}", dotted);

        let Some(Value::Object(map)) =
            request.locale.lookup_path(&[DISEASES_NAMESPACE, key, field_key])
        else {
            return Ok(None);
        };

        let value = map
            .get(field_key)
            .and_then(|inner| FieldValue::from_json(request.field, inner));
        if value.is_none() {
            tracing::debug!("Per-field entry {} has no usable `{}`", dotted, field_key);
        }
        Ok(value)
    }
}

// ============================================================================
// Fallback
// ============================================================================

/// The diagnosis result's own text. Always answers.
pub struct ResultFallback;

impl ResolveStrategy for ResultFallback {
    fn name(&self) -> &'static str {
        "result"
    }

    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<FieldValue>> {
        Ok(Some(request.result.field(request.field)))
    }
}

/// The standard three-step cascade.
pub fn default_strategies() -> Vec<Box<dyn ResolveStrategy>> {
    vec![
        Box::new(BundleStrategy),
        Box::new(FieldStrategy),
        Box::new(ResultFallback),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::resolver::store::LocaleStore;
    use serde_json::json;

    fn diseased() -> DiagnosisResult {
        DiagnosisResult {
            disease_label: "Red Rot".to_string(),
            confidence_percent: 91.0,
            description: "from result".to_string(),
            treatment: vec!["result treatment".to_string()],
            ..Default::default()
        }
    }

    fn request<'a>(
        locale: &'a LocaleStore,
        result: &'a DiagnosisResult,
        field: DiseaseField,
    ) -> ResolveRequest<'a> {
        ResolveRequest { key: Some("Sugarcane___Red_Rot"), field, result, locale }
    }

    #[test]
    fn test_bundle_requires_all_four_fields() {
        let locale = LocaleStore::from_value(json!({
            "diseases": { "Sugarcane___Red_Rot": {
                "description": "partial",
                "treatment": ["a"],
                "prevention": ["b"]
            }}
        }));
        let result = diseased();

        let err = lookup_bundle(&locale, "Sugarcane___Red_Rot").unwrap_err();
        assert!(matches!(err, ReportError::ResolutionIncomplete { field: "organic_pesticides", .. }));

        let value = BundleStrategy
            .resolve(&request(&locale, &result, DiseaseField::Description))
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_bundle_with_wrong_type_is_fatal() {
        let locale = LocaleStore::from_value(json!({
            "diseases": { "Sugarcane___Red_Rot": {
                "description": "ok",
                "treatment": "not a list",
                "prevention": [],
                "organic_pesticides": []
            }}
        }));
        let result = diseased();

        let err = BundleStrategy
            .resolve(&request(&locale, &result, DiseaseField::Description))
            .unwrap_err();
        assert!(matches!(err, ReportError::MalformedBundle { field: "treatment", .. }));
    }

    #[test]
    fn test_bundle_empty_description_defers() {
        let locale = LocaleStore::from_value(json!({
            "diseases": { "Sugarcane___Red_Rot": {
                "description": "",
                "treatment": [],
                "prevention": [],
                "organic_pesticides": []
            }}
        }));
        let result = diseased();

        let description = BundleStrategy
            .resolve(&request(&locale, &result, DiseaseField::Description))
            .unwrap();
        assert_eq!(description, None);

        // Empty lists are still an answer
        let treatment = BundleStrategy
            .resolve(&request(&locale, &result, DiseaseField::Treatment))
            .unwrap();
        assert_eq!(treatment, Some(FieldValue::List(vec![])));
    }

    #[test]
    fn test_field_strategy_needs_object_containing_field() {
        let locale = LocaleStore::from_value(json!({
            "diseases": { "Sugarcane___Red_Rot": {
                "description": { "description": "nested" },
                "treatment": ["plain list is not accepted"]
            }}
        }));
        let result = diseased();

        let description = FieldStrategy
            .resolve(&request(&locale, &result, DiseaseField::Description))
            .unwrap();
        assert_eq!(description, Some(FieldValue::Text("nested".to_string())));

        let treatment = FieldStrategy
            .resolve(&request(&locale, &result, DiseaseField::Treatment))
            .unwrap();
        assert_eq!(treatment, None);
    }

    #[test]
    fn test_locale_strategies_skip_without_key() {
        let locale = LocaleStore::builtin();
        let result = DiagnosisResult { is_healthy: true, ..Default::default() };
        let request = ResolveRequest {
            key: None,
            field: DiseaseField::Description,
            result: &result,
            locale: &locale,
        };

        assert_eq!(BundleStrategy.resolve(&request).unwrap(), None);
        assert_eq!(FieldStrategy.resolve(&request).unwrap(), None);
        assert!(ResultFallback.resolve(&request).unwrap().is_some());
    }
}
