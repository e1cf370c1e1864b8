//! Report configuration.
//!
//! Defaults suit local development; deployments override them through
//! environment variables:
//! - `REPORT_OUTPUT_DIR` - where saved reports land (default `.`)
//! - `REPORT_LOCALE_FILE` - optional JSON locale document overlaid on the
//!   builtin disease catalogue
//! - `REPORT_BRAND` - name printed in the header and footer

use std::path::PathBuf;

use crate::report::layout::PageGeometry;

pub const DEFAULT_BRAND: &str = "FieldGuardian AI";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub page: PageGeometry,
    pub brand: String,
    pub output_dir: PathBuf,
    pub locale_file: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::a4(),
            brand: DEFAULT_BRAND.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            locale_file: None,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            page: defaults.page,
            brand: var("REPORT_BRAND").unwrap_or(defaults.brand),
            output_dir: var("REPORT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            locale_file: var("REPORT_LOCALE_FILE").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::from_lookup(|_| None);
        assert_eq!(config.brand, DEFAULT_BRAND);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(config.locale_file.is_none());
        assert_eq!(config.page, PageGeometry::a4());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("REPORT_BRAND", "AgriScan"),
            ("REPORT_OUTPUT_DIR", "/tmp/out"),
            ("REPORT_LOCALE_FILE", "/etc/report/hi.json"),
        ]
        .into_iter()
        .collect();
        let config = ReportConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.brand, "AgriScan");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.locale_file, Some(PathBuf::from("/etc/report/hi.json")));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = ReportConfig::from_lookup(|k| (k == "REPORT_BRAND").then(|| "  ".to_string()));
        assert_eq!(config.brand, DEFAULT_BRAND);
    }
}
