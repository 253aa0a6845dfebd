use std::collections::{BTreeMap, BTreeSet};

use sankey_timeline::{
    Filters, LayoutParams, RenderOptions, layout_with_options, render_with_options,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineRequest {
    min_year: f64,
    max_year: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    is_mobile: bool,
    #[serde(default)]
    show_cross_links: bool,
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    filters: Option<FilterRequest>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterRequest {
    year_range: Option<(f64, f64)>,
    #[serde(default)]
    excluded: BTreeMap<String, BTreeSet<String>>,
}

impl TimelineRequest {
    fn params(&self) -> LayoutParams {
        LayoutParams {
            min_year: self.min_year,
            max_year: self.max_year,
            width: self.width,
            height: self.height,
            is_mobile: self.is_mobile,
            show_cross_links: self.show_cross_links,
        }
    }

    fn filters(&self) -> Option<Filters> {
        self.filters.as_ref().map(|f| Filters {
            year_range: f.year_range,
            excluded: f.excluded.clone(),
        })
    }

    fn options(&self) -> RenderOptions {
        if self.theme.as_deref() == Some("classic") {
            RenderOptions::classic()
        } else {
            RenderOptions::modern()
        }
    }
}

fn parse_request(request_json: &str) -> Result<TimelineRequest, JsValue> {
    serde_json::from_str(request_json).map_err(|error| JsValue::from_str(&error.to_string()))
}

/// Lays out `data` (JSON entity list) and returns the layout as JSON.
/// A `null` or empty `data` yields an empty layout.
#[wasm_bindgen]
pub fn compute_timeline_json(data: Option<String>, request_json: &str) -> Result<String, JsValue> {
    let request = parse_request(request_json)?;
    let data = data.unwrap_or_else(|| "[]".to_string());
    let filters = request.filters();
    let layout = layout_with_options(
        &data,
        &request.params(),
        filters.as_ref(),
        &request.options(),
    )
    .map_err(|error| JsValue::from_str(&error.to_string()))?;
    serde_json::to_string(&layout).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[wasm_bindgen]
pub fn render_timeline_svg(data: &str, request_json: &str) -> Result<String, JsValue> {
    let request = parse_request(request_json)?;
    let filters = request.filters();
    render_with_options(data, &request.params(), filters.as_ref(), &request.options())
        .map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"[
        { "id": "a", "tradition": { "key": "x" }, "year_start": 1000, "year_finish": 1050, "successors": ["b"] },
        { "id": "b", "tradition": { "key": "x" }, "year_start": 1060, "year_finish": 1100 }
    ]"#;

    const REQUEST: &str = r#"{
        "minYear": 1000, "maxYear": 1100, "width": 400, "height": 300,
        "filters": { "excluded": { "regions": ["south"] } }
    }"#;

    #[test]
    fn request_maps_onto_layout_inputs() {
        let request = parse_request(REQUEST).unwrap();
        let params = request.params();
        assert_eq!(params.width, 400.0);
        assert!(!params.show_cross_links);
        assert!(request.filters().unwrap().excluded["regions"].contains("south"));
    }

    #[test]
    fn renders_svg_for_sample_data() {
        let request = parse_request(REQUEST).unwrap();
        let svg = render_with_options(DATA, &request.params(), None, &request.options()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("<path"));
    }

    #[test]
    fn layout_json_uses_camel_case_keys() {
        let json = compute_timeline_json(Some(DATA.to_string()), REQUEST).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let node = &value["nodes"][0];
        assert!(node["xMid"].is_number());
        assert!(node["yMid"].is_number());
        assert_eq!(node["filterOut"], false);
        assert!(node.get("x_mid").is_none());
        let link = &value["links"][0];
        assert_eq!(link["type"], "successors");
        assert_eq!(link["sourceNode"], 0);
        assert_eq!(link["targetNode"], 1);
        assert!(link["strokeWidth"].is_number());
        assert!(value["minYear"].is_number());
    }
}
