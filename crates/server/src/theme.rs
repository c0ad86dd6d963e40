//! Page rendering with Tera templates.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tera::{Tera, Value};
use tracing::debug;

/// Placeholder shown for missing values.
const MISSING: &str = "-";

/// Template engine for the HTML pages.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine loading `**/*.html` from the given directory.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;

        let mut tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        Self::register_filters(&mut tera);

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Create a theme engine from in-memory templates.
    pub fn from_raw(templates: &[(&str, &str)]) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates.iter().copied())
            .context("failed to parse templates")?;
        Self::register_filters(&mut tera);
        Ok(Self { tera })
    }

    fn register_filters(tera: &mut Tera) {
        tera.register_filter("display", display);
    }

    /// Render a named template.
    pub fn render(&self, template: &str, context: &tera::Context) -> tera::Result<String> {
        self.tera.render(template, context)
    }
}

/// `display` filter: null and empty strings become a placeholder, floats
/// are shown with at most three decimals.
fn display(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let shown = match value {
        Value::Null => MISSING.to_string(),
        Value::String(s) if s.trim().is_empty() => MISSING.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), format_float),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    Ok(Value::String(shown))
}

fn format_float(value: f64) -> String {
    let fixed = format!("{value:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
