//! Rendering capabilities the search controller needs from a slippy-map
//! library. The browser build implements them with Leaflet
//! (`crate::leaflet`); tests substitute a recording fake.

use shared::{Bounds, Coordinate};

use crate::error::MapError;

#[derive(Debug, Clone, PartialEq)]
pub struct TileSource {
    pub url_template: String,
    pub attribution: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: u32,
}

/// Handles returned by a port stay valid for the page lifetime; the
/// controller keeps them and never asks for a second map or marker.
pub trait MapPort {
    type Map;
    type Marker;
    type Overlay;

    fn create_map(
        &mut self,
        container_id: &str,
        center: Coordinate,
        zoom: u8,
    ) -> Result<Self::Map, MapError>;

    fn set_view(&mut self, map: &Self::Map, center: Coordinate, zoom: u8) -> Result<(), MapError>;

    fn add_tile_layer(&mut self, map: &Self::Map, tiles: &TileSource) -> Result<(), MapError>;

    /// Empty layer group already attached to `map`.
    fn create_overlay(&mut self, map: &Self::Map) -> Result<Self::Overlay, MapError>;

    fn create_marker(&mut self, map: &Self::Map, at: Coordinate) -> Result<Self::Marker, MapError>;

    fn move_marker(&mut self, marker: &Self::Marker, at: Coordinate) -> Result<(), MapError>;

    /// Binds `html` as the marker popup and opens it.
    fn open_marker_popup(&mut self, marker: &Self::Marker, html: &str) -> Result<(), MapError>;

    /// Removes every shape from the group, keeping the group itself.
    fn clear_overlay(&mut self, overlay: &Self::Overlay) -> Result<(), MapError>;

    fn add_polyline(
        &mut self,
        overlay: &Self::Overlay,
        path: &[Coordinate],
        style: &PolylineStyle,
        popup_html: &str,
    ) -> Result<(), MapError>;

    fn fit_bounds(&mut self, map: &Self::Map, bounds: Bounds) -> Result<(), MapError>;
}
