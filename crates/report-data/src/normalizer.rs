use report_core::models::UsageRecord;
use report_core::schema::FieldMap;
use serde_json::Value;

// ── RecordNormalizer ──────────────────────────────────────────────────────────

/// Converts one raw JSON record into a canonical [`UsageRecord`], handling the
/// different key-name conventions used by the reporting endpoints.
///
/// Normalization is total: absent keys, `null` values and unparseable numbers
/// become `""` or `0.0`, and keys not named by the [`FieldMap`] are ignored.
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Normalize `raw` and tag the result with `source_label`.
    ///
    /// `raw` is normally a JSON object; any other value yields a record made
    /// entirely of defaults.
    pub fn normalize(raw: &Value, source_label: &str, fields: &FieldMap) -> UsageRecord {
        UsageRecord {
            agency_name: Self::find_string(raw, &fields.agency_name),
            branch_name: Self::find_string(raw, &fields.branch_name),
            medium: Self::find_string(raw, &fields.medium),
            estimate_total: Self::find_number(raw, &fields.estimate_total),
            ro_total: Self::find_number(raw, &fields.ro_total),
            ib_total: Self::find_number(raw, &fields.ib_total),
            ob_total: Self::find_number(raw, &fields.ob_total),
            source_label: source_label.to_string(),
        }
    }

    /// First alias whose value is present and non-null.
    fn lookup<'v>(raw: &'v Value, keys: &[String]) -> Option<&'v Value> {
        keys.iter()
            .filter_map(|key| raw.get(key.as_str()))
            .find(|v| !v.is_null())
    }

    fn find_string(raw: &Value, keys: &[String]) -> String {
        Self::lookup(raw, keys).map(coerce_string).unwrap_or_default()
    }

    fn find_number(raw: &Value, keys: &[String]) -> f64 {
        Self::lookup(raw, keys).map(coerce_number).unwrap_or(0.0)
    }
}

// ── Coercion helpers ──────────────────────────────────────────────────────────

/// Render a non-null JSON value as a string field.
///
/// Strings are taken verbatim; scalars use their JSON text; arrays and objects
/// are kept as compact JSON.
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Interpret a non-null JSON value as a finite double, defaulting to `0.0`.
fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
