//! The dashboard page as seen by the chart code: a flat list of elements.
//!
//! A page can come from:
//! - an HTML document (the portal's rendered dashboard)
//! - a JSON attribute map (`{"donationChart": {"data-trends": "..."}}`)
//! - an HTTP fetch of the dashboard (`fetch`)

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::AppError;
use crate::io::html::{Element, scan_elements};

/// Name of the page-level function that period controls call.
pub const SWITCH_FUNCTION: &str = "switchChartPeriod";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn from_html(html: &str) -> Self {
        Self {
            elements: scan_elements(html),
        }
    }

    /// Build a page from `{ "<element id>": { "<attribute>": <value> } }`.
    ///
    /// String values are taken verbatim; other JSON values are written back
    /// out as JSON text, the way a template would embed them.
    pub fn from_attribute_map(json: &str) -> Result<Self, AppError> {
        let map: serde_json::Map<String, Value> = serde_json::from_str(json)
            .map_err(|e| AppError::input(format!("Invalid attribute map JSON: {e}")))?;

        let mut elements = Vec::with_capacity(map.len());
        for (id, attrs) in map {
            let Value::Object(attrs) = attrs else {
                return Err(AppError::input(format!(
                    "Attribute map entry '{id}' must be an object of attributes."
                )));
            };
            let mut element = Element::new("canvas").with_attr("id", id);
            for (name, value) in attrs {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                element = element.with_attr(name.to_ascii_lowercase(), text);
            }
            elements.push(element);
        }

        Ok(Self { elements })
    }

    /// Load a page file. `.json` files are attribute maps, anything else HTML.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path)
            .map_err(|e| AppError::input(format!("Failed to read page '{}': {e}", path.display())))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let page = if is_json {
            Self::from_attribute_map(&text)?
        } else {
            Self::from_html(&text)
        };
        tracing::info!(path = %path.display(), elements = page.elements.len(), "loaded page");
        Ok(page)
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == Some(id))
    }

    /// Arguments of every period control on the page, in document order.
    ///
    /// A control is an element whose `onclick` calls the switch function;
    /// its argument is the first quoted token of the call.
    pub fn period_control_args(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter_map(|e| e.attr("onclick"))
            .filter(|js| js.trim_start().starts_with(SWITCH_FUNCTION))
            .filter_map(quoted_argument)
            .collect()
    }
}

fn quoted_argument(call: &str) -> Option<String> {
    let start = call.find(['\'', '"'])?;
    let quote = call[start..].chars().next()?;
    let body = &call[start + 1..];
    let end = body.find(quote)?;
    Some(body[..end].to_string())
}
