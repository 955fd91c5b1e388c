use serde_wasm_bindgen::to_value;
use shared::{Bounds, Coordinate};
use wasm_bindgen::{
    JsCast,
    prelude::{JsValue, wasm_bindgen},
};

use crate::error::MapError;
use crate::map::{MapPort, PolylineStyle, TileSource};

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = leafletAvailable)]
    fn leaflet_available() -> bool;
    #[wasm_bindgen(js_name = createMap, catch)]
    fn create_map_js(container_id: &str, lat: f64, lon: f64, zoom: u8) -> Result<u32, JsValue>;
    #[wasm_bindgen(js_name = setView, catch)]
    fn set_view_js(map: u32, lat: f64, lon: f64, zoom: u8) -> Result<(), JsValue>;
    #[wasm_bindgen(js_name = addTileLayer, catch)]
    fn add_tile_layer_js(map: u32, url_template: &str, attribution: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(js_name = createLayerGroup, catch)]
    fn create_layer_group_js(map: u32) -> Result<u32, JsValue>;
    #[wasm_bindgen(js_name = createMarker, catch)]
    fn create_marker_js(map: u32, lat: f64, lon: f64) -> Result<u32, JsValue>;
    #[wasm_bindgen(js_name = moveMarker, catch)]
    fn move_marker_js(marker: u32, lat: f64, lon: f64) -> Result<(), JsValue>;
    #[wasm_bindgen(js_name = openMarkerPopup, catch)]
    fn open_marker_popup_js(marker: u32, html: &str) -> Result<(), JsValue>;
    #[wasm_bindgen(js_name = clearLayerGroup, catch)]
    fn clear_layer_group_js(group: u32) -> Result<(), JsValue>;
    #[wasm_bindgen(js_name = addPolyline, catch)]
    fn add_polyline_js(
        group: u32,
        coords: JsValue,
        color: &str,
        weight: u32,
        popup_html: &str,
    ) -> Result<(), JsValue>;
    #[wasm_bindgen(js_name = fitBounds, catch)]
    fn fit_bounds_js(
        map: u32,
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    ) -> Result<(), JsValue>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerGroupHandle(u32);

pub fn is_available() -> bool {
    leaflet_available()
}

/// `MapPort` backed by the Leaflet global loaded by the host page.
#[derive(Debug, Default)]
pub struct LeafletMap;

impl MapPort for LeafletMap {
    type Map = MapHandle;
    type Marker = MarkerHandle;
    type Overlay = LayerGroupHandle;

    fn create_map(
        &mut self,
        container_id: &str,
        center: Coordinate,
        zoom: u8,
    ) -> Result<MapHandle, MapError> {
        if seed::document().get_element_by_id(container_id).is_none() {
            return Err(MapError::ContainerMissing(container_id.to_string()));
        }
        create_map_js(container_id, center.lat, center.lon, zoom)
            .map(MapHandle)
            .map_err(js_error)
    }

    fn set_view(&mut self, map: &MapHandle, center: Coordinate, zoom: u8) -> Result<(), MapError> {
        set_view_js(map.0, center.lat, center.lon, zoom).map_err(js_error)
    }

    fn add_tile_layer(&mut self, map: &MapHandle, tiles: &TileSource) -> Result<(), MapError> {
        add_tile_layer_js(map.0, &tiles.url_template, &tiles.attribution).map_err(js_error)
    }

    fn create_overlay(&mut self, map: &MapHandle) -> Result<LayerGroupHandle, MapError> {
        create_layer_group_js(map.0)
            .map(LayerGroupHandle)
            .map_err(js_error)
    }

    fn create_marker(&mut self, map: &MapHandle, at: Coordinate) -> Result<MarkerHandle, MapError> {
        create_marker_js(map.0, at.lat, at.lon)
            .map(MarkerHandle)
            .map_err(js_error)
    }

    fn move_marker(&mut self, marker: &MarkerHandle, at: Coordinate) -> Result<(), MapError> {
        move_marker_js(marker.0, at.lat, at.lon).map_err(js_error)
    }

    fn open_marker_popup(&mut self, marker: &MarkerHandle, html: &str) -> Result<(), MapError> {
        open_marker_popup_js(marker.0, html).map_err(js_error)
    }

    fn clear_overlay(&mut self, overlay: &LayerGroupHandle) -> Result<(), MapError> {
        clear_layer_group_js(overlay.0).map_err(js_error)
    }

    fn add_polyline(
        &mut self,
        overlay: &LayerGroupHandle,
        path: &[Coordinate],
        style: &PolylineStyle,
        popup_html: &str,
    ) -> Result<(), MapError> {
        // Coordinates serialise as [lat, lon] pairs, which Leaflet accepts as-is.
        let coords = to_value(path).map_err(|err| MapError::Js(err.to_string()))?;
        add_polyline_js(overlay.0, coords, &style.color, style.weight, popup_html)
            .map_err(js_error)
    }

    fn fit_bounds(&mut self, map: &MapHandle, bounds: Bounds) -> Result<(), MapError> {
        let sw = bounds.south_west();
        let ne = bounds.north_east();
        fit_bounds_js(map.0, sw.lat, sw.lon, ne.lat, ne.lon).map_err(js_error)
    }
}

fn js_error(value: JsValue) -> MapError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));
    MapError::Js(message)
}
