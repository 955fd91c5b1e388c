use crate::map::{PolylineStyle, TileSource};

pub const DEFAULT_API_ROOT: &str = "/api/recommend_courses";
pub const DEFAULT_ZOOM: u8 = 14;
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const ROUTE_COLOR: &str = "blue";
const ROUTE_WEIGHT: u32 = 5;
/// Fraction of the routes' extent added on each side when fitting the view.
const FIT_PADDING: f64 = 0.1;

/// DOM ids the page is wired to.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementIds {
    pub mount: &'static str,
    pub search_button: &'static str,
    pub distance_input: &'static str,
    pub status: &'static str,
    pub map: &'static str,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            mount: "app",
            search_button: "searchBtn",
            distance_input: "distanceInput",
            status: "statusMessage",
            map: "map",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub container_id: String,
    pub zoom: u8,
    pub tiles: TileSource,
    pub route_style: PolylineStyle,
    pub fit_padding: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: ElementIds::default().map.to_string(),
            zoom: DEFAULT_ZOOM,
            tiles: TileSource {
                url_template: OSM_TILE_URL.to_string(),
                attribution: OSM_ATTRIBUTION.to_string(),
            },
            route_style: PolylineStyle {
                color: ROUTE_COLOR.to_string(),
                weight: ROUTE_WEIGHT,
            },
            fit_padding: FIT_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_root: String,
    pub elements: ElementIds,
    pub map: MapConfig,
}

impl AppConfig {
    /// Reads `FRONTEND_API_ROOT` as baked in at compile time.
    pub fn from_env() -> Self {
        Self::with_api_root(option_env!("FRONTEND_API_ROOT"))
    }

    pub fn with_api_root(api_root: Option<&str>) -> Self {
        let api_root = api_root
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_ROOT)
            .to_string();
        Self {
            api_root,
            elements: ElementIds::default(),
            map: MapConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        assert_eq!(AppConfig::with_api_root(None).api_root, DEFAULT_API_ROOT);
        assert_eq!(AppConfig::with_api_root(Some("  ")).api_root, DEFAULT_API_ROOT);
    }

    #[test]
    fn test_endpoint_override_trims_trailing_slash() {
        let config = AppConfig::with_api_root(Some("http://localhost:5000/api/recommend_courses/"));
        assert_eq!(config.api_root, "http://localhost:5000/api/recommend_courses");
    }

    #[test]
    fn test_map_container_matches_element_ids() {
        let config = AppConfig::with_api_root(None);
        assert_eq!(config.map.container_id, config.elements.map);
        assert_eq!(config.map.zoom, 14);
    }
}
