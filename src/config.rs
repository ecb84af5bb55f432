//! Chart configuration import and export.
//!
//! A configuration is one JSON object: `data` (the item list) plus the nine
//! chart settings in camelCase. Import is lenient per field: a key whose value
//! has the wrong type is skipped and reported, the rest still apply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ConfigError;
use crate::log;
use crate::model::{Chart, ChartSettings, DataItem};

/// Serialized form of a chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub data: Vec<DataItem>,
    #[serde(flatten)]
    pub settings: ChartSettings,
}

impl ChartConfig {
    pub fn from_chart(chart: &Chart) -> Self {
        Self {
            data: chart.items().to_vec(),
            settings: chart.settings.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Pretty JSON for the whole chart.
pub fn export(chart: &Chart) -> Result<String, ConfigError> {
    ChartConfig::from_chart(chart).to_json()
}

/// A field that was present but could not be applied.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedField {
    pub field: String,
    pub reason: String,
}

/// What an import did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReport {
    /// Keys that were applied, in key order.
    pub applied: Vec<String>,
    /// Keys with a value of the wrong shape. The chart keeps its old value.
    pub skipped: Vec<SkippedField>,
    /// Keys this version does not know.
    pub ignored: Vec<String>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn was_applied(&self, field: &str) -> bool {
        self.applied.iter().any(|f| f == field)
    }

    pub fn was_skipped(&self, field: &str) -> bool {
        self.skipped.iter().any(|s| s.field == field)
    }
}

/// Import `text` into `chart`. See [`import_named`].
pub fn import(chart: &mut Chart, text: &str) -> Result<ImportReport, ConfigError> {
    import_named(chart, "config.json", text)
}

/// Import `text` into `chart`; `name` labels the source in diagnostics.
///
/// Fails only when the text is not JSON or not an object. Anything else is
/// applied field by field.
pub fn import_named(chart: &mut Chart, name: &str, text: &str) -> Result<ImportReport, ConfigError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ConfigError::syntax(name, text, &err))?;
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(ConfigError::NotAnObject {
                found: json_type(&other),
            });
        }
    };

    let mut report = ImportReport::default();
    for (key, value) in &map {
        let result = match key.as_str() {
            "data" => items(value).map(|items| chart.replace_items(items)),
            "showValueInLabel" => boolean(value).map(|v| chart.settings.show_value_in_label = v),
            "innerRadius" => number(value).map(|v| chart.settings.inner_radius = v),
            "gapEnabled" => boolean(value).map(|v| chart.settings.gap_enabled = v),
            "centerText" => string(value).map(|v| chart.settings.center_text = v),
            "boldText" => boolean(value).map(|v| chart.settings.bold_text = v),
            "centerCircleStrokeWidth" => {
                number(value).map(|v| chart.settings.center_circle_stroke_width = v)
            }
            "centerCircleStrokeColor" => {
                string(value).map(|v| chart.settings.center_circle_stroke_color = v)
            }
            "labelTextColor" => string(value).map(|v| chart.settings.label_text_color = v),
            "centerTextColor" => string(value).map(|v| chart.settings.center_text_color = v),
            _ => {
                log::debug!(key = %key, "ignoring unknown configuration key");
                report.ignored.push(key.clone());
                continue;
            }
        };
        match result {
            Ok(()) => report.applied.push(key.clone()),
            Err(reason) => {
                log::warn!(field = %key, %reason, "skipping configuration field");
                report.skipped.push(SkippedField {
                    field: key.clone(),
                    reason,
                });
            }
        }
    }

    log::info!(
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        "imported configuration"
    );
    Ok(report)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(what: &str, value: &Value) -> String {
    format!("expected {what}, found {}", json_type(value))
}

fn boolean(value: &Value) -> Result<bool, String> {
    value.as_bool().ok_or_else(|| expected("a boolean", value))
}

fn number(value: &Value) -> Result<f64, String> {
    match value.as_f64() {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err("expected a finite number".to_string()),
        None => Err(expected("a number", value)),
    }
}

fn string(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| expected("a string", value))
}

/// Every element must be a valid item, or none are applied.
fn items(value: &Value) -> Result<Vec<DataItem>, String> {
    let Value::Array(elements) = value else {
        return Err(expected("an array", value));
    };
    elements
        .iter()
        .enumerate()
        .map(|(i, element)| {
            DataItem::deserialize(element).map_err(|err| format!("item {i}: {err}"))
        })
        .collect()
}
