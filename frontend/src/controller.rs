//! Search pipeline state: the lazily created map, the user marker, the route
//! overlay and the status region, driven through
//! `Idle -> Locating -> Fetching -> Idle`.

use shared::{Bounds, Coordinate, Course, SearchRequest, SearchResponse};
use tracing::{debug, error, info, warn};

use crate::config::MapConfig;
use crate::error::{DistanceError, GeolocationError, MapError, SearchError};
use crate::map::MapPort;

pub const USER_LOCATION_POPUP: &str = "Your Current Location";
pub const LOCATING_TEXT: &str = "Getting your location...";
pub const SEARCHING_TEXT: &str = "Searching for courses...";
pub const NO_COURSES_TEXT: &str = "No suitable courses found matching your criteria.";
pub const GEOLOCATION_UNSUPPORTED_TEXT: &str = "Geolocation is not supported by this browser.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn alert_class(self) -> &'static str {
        match self {
            Self::Info => "alert-info",
            Self::Success => "alert-success",
            Self::Warning => "alert-warning",
            Self::Danger => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub text: String,
    pub severity: Severity,
    pub visible: bool,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            text: String::new(),
            severity: Severity::Info,
            visible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Locating,
    Fetching,
}

/// What the click handler must do next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStart {
    /// Request one position fix, then fetch with this distance.
    Locate { distance_km: f64 },
    /// Input rejected; show a blocking alert with the error text.
    Rejected(DistanceError),
    Unsupported,
    /// A search is already in flight.
    Busy,
}

/// Parses the raw distance field. Only an empty string counts as "empty";
/// whitespace falls through to the numeric check.
pub fn parse_distance(raw: &str) -> Result<f64, DistanceError> {
    if raw.is_empty() {
        return Err(DistanceError::Empty);
    }
    match raw.trim().parse::<f64>() {
        Ok(distance) if distance.is_finite() && distance > 0.0 => Ok(distance),
        _ => Err(DistanceError::Invalid),
    }
}

pub fn course_popup(course: &Course, length_km: f64) -> String {
    format!("Course ID: {}<br>Length: {length_km:.2} km", course.id)
}

struct MapState<P: MapPort> {
    map: Option<P::Map>,
    tiles_attached: bool,
    user_marker: Option<P::Marker>,
    route_overlay: Option<P::Overlay>,
}

impl<P: MapPort> Default for MapState<P> {
    fn default() -> Self {
        Self {
            map: None,
            tiles_attached: false,
            user_marker: None,
            route_overlay: None,
        }
    }
}

pub struct MapSearchController<P: MapPort> {
    port: P,
    config: MapConfig,
    state: MapState<P>,
    status: Status,
    phase: SearchPhase,
}

impl<P: MapPort> MapSearchController<P> {
    pub fn new(port: P, config: MapConfig) -> Self {
        Self {
            port,
            config,
            state: MapState::default(),
            status: Status::default(),
            phase: SearchPhase::Idle,
        }
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    #[cfg(test)]
    fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// The search control is disabled for as long as this holds.
    pub fn is_searching(&self) -> bool {
        self.phase != SearchPhase::Idle
    }

    #[cfg(test)]
    fn has_map(&self) -> bool {
        self.state.map.is_some()
    }

    #[cfg(test)]
    fn port(&self) -> &P {
        &self.port
    }

    fn set_status(&mut self, text: impl Into<String>, severity: Severity) {
        self.status = Status {
            text: text.into(),
            severity,
            visible: true,
        };
    }

    /// Click on the search control.
    pub fn begin_search(&mut self, raw_distance: &str, geolocation_supported: bool) -> SearchStart {
        if self.is_searching() {
            debug!("search already in flight, ignoring click");
            return SearchStart::Busy;
        }
        info!("search button clicked");

        let distance_km = match parse_distance(raw_distance) {
            Ok(distance) => distance,
            Err(err) => {
                warn!("rejected distance {raw_distance:?}: {err}");
                self.set_status(err.to_string(), Severity::Warning);
                return SearchStart::Rejected(err);
            }
        };

        self.set_status(LOCATING_TEXT, Severity::Info);
        self.phase = SearchPhase::Locating;

        if !geolocation_supported {
            warn!("geolocation capability missing");
            self.set_status(GEOLOCATION_UNSUPPORTED_TEXT, Severity::Warning);
            self.phase = SearchPhase::Idle;
            return SearchStart::Unsupported;
        }
        SearchStart::Locate { distance_km }
    }

    /// Position fix arrived: place the map, then start the course fetch.
    pub fn location_found(&mut self, position: Coordinate, distance_km: f64) -> SearchRequest {
        info!(
            "user location lat={:.5} lon={:.5}",
            position.lat, position.lon
        );
        self.init_or_update_map(position.lat, position.lon);
        self.begin_fetch(position.lat, position.lon, distance_km)
    }

    pub fn location_failed(&mut self, err: GeolocationError) {
        error!("error getting location: {err:?}");
        self.set_status(err.to_string(), Severity::Danger);
        self.phase = SearchPhase::Idle;
    }

    /// Creates the map on first use, re-centres it afterwards, and keeps the
    /// single user marker on `(lat, lon)` with its popup open.
    pub fn init_or_update_map(&mut self, lat: f64, lon: f64) {
        if let Err(err) = self.place_map(Coordinate::new(lat, lon)) {
            error!("could not update map: {err}");
        }
    }

    fn place_map(&mut self, center: Coordinate) -> Result<(), MapError> {
        let zoom = self.config.zoom;
        if let Some(map) = &self.state.map {
            self.port.set_view(map, center, zoom)?;
        } else {
            // Leaflet claims the container as soon as the map exists, so the
            // handle is kept even if the layers below fail.
            let map = self
                .port
                .create_map(&self.config.container_id, center, zoom)?;
            self.state.map = Some(map);
            debug!("map created at zoom {zoom}");
        }
        if let Some(map) = &self.state.map {
            if !self.state.tiles_attached {
                self.port.add_tile_layer(map, &self.config.tiles)?;
                self.state.tiles_attached = true;
            }
            if self.state.route_overlay.is_none() {
                let overlay = self.port.create_overlay(map)?;
                self.state.route_overlay = Some(overlay);
            }
        }

        if let Some(marker) = &self.state.user_marker {
            self.port.move_marker(marker, center)?;
        } else if let Some(map) = &self.state.map {
            let marker = self.port.create_marker(map, center)?;
            self.state.user_marker = Some(marker);
        }
        if let Some(marker) = &self.state.user_marker {
            self.port.open_marker_popup(marker, USER_LOCATION_POPUP)?;
        }
        Ok(())
    }

    /// First half of a course fetch: clears old routes, shows progress and
    /// returns the body to post.
    pub fn begin_fetch(&mut self, lat: f64, lon: f64, distance_km: f64) -> SearchRequest {
        if let Some(overlay) = &self.state.route_overlay {
            if let Err(err) = self.port.clear_overlay(overlay) {
                error!("could not clear routes: {err}");
            }
        }
        self.set_status(SEARCHING_TEXT, Severity::Info);
        self.phase = SearchPhase::Fetching;
        SearchRequest {
            latitude: lat,
            longitude: lon,
            distance_km,
        }
    }

    /// Second half of a course fetch. Always returns the controller to
    /// `Idle`, whatever the outcome.
    pub fn settle_fetch(&mut self, outcome: Result<SearchResponse, SearchError>) {
        let rendered = outcome.and_then(|response| self.render_courses(response));
        if let Err(err) = rendered {
            error!("error fetching or displaying courses: {err}");
            self.set_status(format!("Error: {err}"), Severity::Danger);
        }
        self.phase = SearchPhase::Idle;
    }

    fn render_courses(&mut self, response: SearchResponse) -> Result<(), SearchError> {
        let courses = response.courses.unwrap_or_default();
        if courses.is_empty() {
            let text = response
                .message
                .unwrap_or_else(|| NO_COURSES_TEXT.to_string());
            self.set_status(text, Severity::Warning);
            return Ok(());
        }

        self.set_status(
            format!("Found {} course(s). Displaying routes.", courses.len()),
            Severity::Success,
        );

        let mut collected = Vec::with_capacity(courses.len());
        for course in &courses {
            let path = course.path();
            let Some(bounds) = Bounds::from_points(path) else {
                debug!("course {} has no coordinates, skipping", course.id);
                continue;
            };
            let length_km = course
                .length_km
                .ok_or_else(|| SearchError::MissingLength(course.id.to_string()))?;
            let overlay = self
                .state
                .route_overlay
                .as_ref()
                .ok_or(MapError::NotInitialised)?;
            let popup = course_popup(course, length_km);
            self.port
                .add_polyline(overlay, path, &self.config.route_style, &popup)?;
            collected.push(bounds);
        }

        match Bounds::union_all(collected) {
            Some(overall) => {
                if overall.is_valid() {
                    let map = self.state.map.as_ref().ok_or(MapError::NotInitialised)?;
                    self.port
                        .fit_bounds(map, overall.pad(self.config.fit_padding))?;
                }
            }
            None => self.set_status(NO_COURSES_TEXT, Severity::Warning),
        }

        // Only reachable with an empty course list, which returned above.
        if let Some(message) = response.message {
            if courses.is_empty() {
                self.set_status(message, Severity::Warning);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{PolylineStyle, TileSource};
    use shared::CourseId;

    #[derive(Default)]
    struct RecordingMap {
        fail_create: bool,
        fail_tiles_once: bool,
        maps_created: usize,
        tile_layers: usize,
        overlays_created: usize,
        markers_created: usize,
        views: Vec<Coordinate>,
        marker_moves: Vec<Coordinate>,
        popups: Vec<String>,
        clears: usize,
        polylines: Vec<(Vec<Coordinate>, String)>,
        fits: Vec<Bounds>,
    }

    impl MapPort for RecordingMap {
        type Map = usize;
        type Marker = usize;
        type Overlay = usize;

        fn create_map(&mut self, container_id: &str, center: Coordinate, _zoom: u8) -> Result<usize, MapError> {
            if self.fail_create {
                return Err(MapError::ContainerMissing(container_id.to_string()));
            }
            self.maps_created += 1;
            self.views.push(center);
            Ok(self.maps_created)
        }

        fn set_view(&mut self, _map: &usize, center: Coordinate, _zoom: u8) -> Result<(), MapError> {
            self.views.push(center);
            Ok(())
        }

        fn add_tile_layer(&mut self, _map: &usize, _tiles: &TileSource) -> Result<(), MapError> {
            if std::mem::take(&mut self.fail_tiles_once) {
                return Err(MapError::Js("tile layer rejected".into()));
            }
            self.tile_layers += 1;
            Ok(())
        }

        fn create_overlay(&mut self, _map: &usize) -> Result<usize, MapError> {
            self.overlays_created += 1;
            Ok(self.overlays_created)
        }

        fn create_marker(&mut self, _map: &usize, _at: Coordinate) -> Result<usize, MapError> {
            self.markers_created += 1;
            Ok(self.markers_created)
        }

        fn move_marker(&mut self, _marker: &usize, at: Coordinate) -> Result<(), MapError> {
            self.marker_moves.push(at);
            Ok(())
        }

        fn open_marker_popup(&mut self, _marker: &usize, html: &str) -> Result<(), MapError> {
            self.popups.push(html.to_string());
            Ok(())
        }

        fn clear_overlay(&mut self, _overlay: &usize) -> Result<(), MapError> {
            self.clears += 1;
            Ok(())
        }

        fn add_polyline(
            &mut self,
            _overlay: &usize,
            path: &[Coordinate],
            _style: &PolylineStyle,
            popup_html: &str,
        ) -> Result<(), MapError> {
            self.polylines.push((path.to_vec(), popup_html.to_string()));
            Ok(())
        }

        fn fit_bounds(&mut self, _map: &usize, bounds: Bounds) -> Result<(), MapError> {
            self.fits.push(bounds);
            Ok(())
        }
    }

    fn controller() -> MapSearchController<RecordingMap> {
        MapSearchController::new(RecordingMap::default(), MapConfig::default())
    }

    /// Runs a click through to the point where the fetch is in flight.
    fn fetching(ctrl: &mut MapSearchController<RecordingMap>) -> SearchRequest {
        let SearchStart::Locate { distance_km } = ctrl.begin_search("5", true) else {
            panic!("expected a geolocation request");
        };
        ctrl.location_found(Coordinate::new(45.0, 5.0), distance_km)
    }

    fn course(id: &str, coords: &[[f64; 2]], length_km: f64) -> Course {
        Course {
            id: CourseId::Text(id.to_string()),
            coordinates: Some(coords.iter().copied().map(Coordinate::from).collect()),
            length_km: Some(length_km),
        }
    }

    #[test]
    fn test_empty_distance_is_rejected() {
        let mut ctrl = controller();
        assert_eq!(
            ctrl.begin_search("", true),
            SearchStart::Rejected(DistanceError::Empty)
        );
        assert!(!ctrl.is_searching());
        assert_eq!(ctrl.status().text, "Please enter your desired distance.");
        assert_eq!(ctrl.status().severity, Severity::Warning);
        assert!(ctrl.status().visible);
        assert_eq!(ctrl.port().maps_created, 0);
    }

    #[test]
    fn test_invalid_distances_are_rejected() {
        for raw in ["abc", "0", "-3", "   ", "NaN", "inf"] {
            let mut ctrl = controller();
            assert_eq!(
                ctrl.begin_search(raw, true),
                SearchStart::Rejected(DistanceError::Invalid),
                "input {raw:?}"
            );
            assert!(!ctrl.is_searching());
            assert_eq!(
                ctrl.status().text,
                "Please enter a valid distance (positive number)."
            );
        }
    }

    #[test]
    fn test_valid_distance_starts_locating() {
        let mut ctrl = controller();
        assert_eq!(
            ctrl.begin_search(" 7.5 ", true),
            SearchStart::Locate { distance_km: 7.5 }
        );
        assert_eq!(ctrl.phase(), SearchPhase::Locating);
        assert_eq!(ctrl.status().text, LOCATING_TEXT);
        assert_eq!(ctrl.status().severity, Severity::Info);
    }

    #[test]
    fn test_second_click_while_in_flight_is_ignored() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        assert_eq!(ctrl.begin_search("5", true), SearchStart::Busy);
        assert_eq!(ctrl.status().text, SEARCHING_TEXT);
    }

    #[test]
    fn test_geolocation_unsupported() {
        let mut ctrl = controller();
        assert_eq!(ctrl.begin_search("5", false), SearchStart::Unsupported);
        assert!(!ctrl.is_searching());
        assert_eq!(ctrl.status().text, GEOLOCATION_UNSUPPORTED_TEXT);
        assert_eq!(ctrl.status().severity, Severity::Warning);
    }

    #[test]
    fn test_permission_denied_re_enables_without_fetch() {
        let mut ctrl = controller();
        ctrl.begin_search("5", true);
        ctrl.location_failed(GeolocationError::PermissionDenied);
        assert!(!ctrl.is_searching());
        assert_eq!(
            ctrl.status().text,
            "Could not get location. Permission denied."
        );
        assert_eq!(ctrl.status().severity, Severity::Danger);
        assert_eq!(ctrl.port().maps_created, 0);
        assert_eq!(ctrl.port().clears, 0);
    }

    #[test]
    fn test_location_found_builds_request() {
        let mut ctrl = controller();
        let request = fetching(&mut ctrl);
        assert_eq!(
            request,
            SearchRequest {
                latitude: 45.0,
                longitude: 5.0,
                distance_km: 5.0
            }
        );
        assert_eq!(ctrl.phase(), SearchPhase::Fetching);
        assert_eq!(ctrl.status().text, SEARCHING_TEXT);
        assert_eq!(ctrl.port().clears, 1);
    }

    #[test]
    fn test_repeated_fixes_reuse_map_and_marker() {
        let mut ctrl = controller();
        ctrl.init_or_update_map(45.0, 5.0);
        ctrl.init_or_update_map(46.0, 6.0);
        let port = ctrl.port();
        assert_eq!(port.maps_created, 1);
        assert_eq!(port.tile_layers, 1);
        assert_eq!(port.overlays_created, 1);
        assert_eq!(port.markers_created, 1);
        assert_eq!(port.marker_moves, vec![Coordinate::new(46.0, 6.0)]);
        assert_eq!(port.views.last(), Some(&Coordinate::new(46.0, 6.0)));
        assert_eq!(port.popups, vec![USER_LOCATION_POPUP, USER_LOCATION_POPUP]);
    }

    #[test]
    fn test_failed_tile_layer_keeps_single_map() {
        let mut ctrl = MapSearchController::new(
            RecordingMap {
                fail_tiles_once: true,
                ..RecordingMap::default()
            },
            MapConfig::default(),
        );
        ctrl.init_or_update_map(45.0, 5.0);
        assert!(ctrl.has_map());
        assert_eq!(ctrl.port().overlays_created, 0);

        ctrl.init_or_update_map(46.0, 6.0);
        let port = ctrl.port();
        assert_eq!(port.maps_created, 1);
        assert_eq!(port.tile_layers, 1);
        assert_eq!(port.overlays_created, 1);
        assert_eq!(port.markers_created, 1);
        assert_eq!(port.views.last(), Some(&Coordinate::new(46.0, 6.0)));
    }

    #[test]
    fn test_search_after_failed_tile_layer_draws_routes() {
        let mut ctrl = MapSearchController::new(
            RecordingMap {
                fail_tiles_once: true,
                ..RecordingMap::default()
            },
            MapConfig::default(),
        );
        fetching(&mut ctrl);
        ctrl.settle_fetch(Ok(SearchResponse::default()));
        fetching(&mut ctrl);
        ctrl.settle_fetch(Ok(SearchResponse {
            courses: Some(vec![course("path_0", &[[45.0, 5.0], [45.1, 5.1]], 2.0)]),
            message: None,
        }));
        assert_eq!(ctrl.status().text, "Found 1 course(s). Displaying routes.");
        assert_eq!(ctrl.port().maps_created, 1);
        assert_eq!(ctrl.port().polylines.len(), 1);
    }

    #[test]
    fn test_undrawn_course_without_length_is_skipped() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        let response: SearchResponse = serde_json::from_str(
            r#"{"courses":[
                {"id":"a","coordinates":[[45.0,5.0],[45.1,5.1]],"length_km":3.0},
                {"id":"b","coordinates":[]}
            ]}"#,
        )
        .unwrap();
        ctrl.settle_fetch(Ok(response));
        assert_eq!(ctrl.status().text, "Found 2 course(s). Displaying routes.");
        assert_eq!(ctrl.port().polylines.len(), 1);
    }

    #[test]
    fn test_drawn_course_without_length_is_an_error() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        let response: SearchResponse =
            serde_json::from_str(r#"{"courses":[{"id":"b","coordinates":[[45.0,5.0]]}]}"#)
                .unwrap();
        ctrl.settle_fetch(Ok(response));
        assert_eq!(ctrl.status().text, "Error: course b has no length");
        assert_eq!(ctrl.status().severity, Severity::Danger);
        assert!(!ctrl.is_searching());
    }

    #[test]
    fn test_courses_are_drawn_and_view_fitted() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        let response = SearchResponse {
            courses: Some(vec![
                course("path_0", &[[45.0, 5.0], [45.1, 5.2]], 4.876),
                course("path_1", &[[44.9, 4.9], [45.0, 5.0]], 5.2),
            ]),
            message: None,
        };
        ctrl.settle_fetch(Ok(response));

        assert!(!ctrl.is_searching());
        assert_eq!(ctrl.status().text, "Found 2 course(s). Displaying routes.");
        assert_eq!(ctrl.status().severity, Severity::Success);

        let port = ctrl.port();
        assert_eq!(port.polylines.len(), 2);
        assert_eq!(port.polylines[0].1, "Course ID: path_0<br>Length: 4.88 km");
        assert_eq!(port.fits.len(), 1);
        let union = Bounds {
            min_lat: 44.9,
            max_lat: 45.1,
            min_lon: 4.9,
            max_lon: 5.2,
        };
        assert_eq!(port.fits[0], union.pad(0.1));
        assert!(port.fits[0].contains(&union));
    }

    #[test]
    fn test_courses_without_coordinates_warn() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        let response = SearchResponse {
            courses: Some(vec![course("path_0", &[], 3.0)]),
            message: None,
        };
        ctrl.settle_fetch(Ok(response));
        assert_eq!(ctrl.status().text, NO_COURSES_TEXT);
        assert_eq!(ctrl.status().severity, Severity::Warning);
        assert!(ctrl.port().polylines.is_empty());
        assert!(ctrl.port().fits.is_empty());
    }

    #[test]
    fn test_message_is_ignored_when_courses_present() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        let response = SearchResponse {
            courses: Some(vec![course("path_0", &[[45.0, 5.0]], 1.0)]),
            message: Some("partial results".into()),
        };
        ctrl.settle_fetch(Ok(response));
        assert_eq!(ctrl.status().text, "Found 1 course(s). Displaying routes.");
    }

    #[test]
    fn test_empty_courses_show_server_message() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        ctrl.settle_fetch(Ok(SearchResponse {
            courses: Some(vec![]),
            message: Some("none".into()),
        }));
        assert_eq!(ctrl.status().text, "none");
        assert_eq!(ctrl.status().severity, Severity::Warning);
        assert!(!ctrl.is_searching());
    }

    #[test]
    fn test_missing_courses_show_generic_text() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        ctrl.settle_fetch(Ok(SearchResponse::default()));
        assert_eq!(ctrl.status().text, NO_COURSES_TEXT);
        assert_eq!(ctrl.status().severity, Severity::Warning);
    }

    #[test]
    fn test_server_error_is_reported_and_control_re_enabled() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        ctrl.settle_fetch(Err(SearchError::Server("bad coords".into())));
        assert_eq!(ctrl.status().text, "Error: bad coords");
        assert_eq!(ctrl.status().severity, Severity::Danger);
        assert!(!ctrl.is_searching());
    }

    #[test]
    fn test_rendering_without_map_is_an_error() {
        let mut ctrl = MapSearchController::new(
            RecordingMap {
                fail_create: true,
                ..RecordingMap::default()
            },
            MapConfig::default(),
        );
        fetching(&mut ctrl);
        assert!(!ctrl.has_map());
        ctrl.settle_fetch(Ok(SearchResponse {
            courses: Some(vec![course("path_0", &[[45.0, 5.0]], 1.0)]),
            message: None,
        }));
        assert_eq!(ctrl.status().text, "Error: map is not initialised");
        assert_eq!(ctrl.status().severity, Severity::Danger);
        assert!(!ctrl.is_searching());
    }

    #[test]
    fn test_overlay_cleared_on_every_search() {
        let mut ctrl = controller();
        fetching(&mut ctrl);
        ctrl.settle_fetch(Ok(SearchResponse::default()));
        fetching(&mut ctrl);
        assert_eq!(ctrl.port().clears, 2);
        assert_eq!(ctrl.port().overlays_created, 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-85.0..=85.0, -180.0..=180.0).prop_map(|(lat, lon)| Coordinate { lat, lon })
        }

        proptest! {
            #[test]
            fn prop_map_created_once(fixes in prop::collection::vec(valid_coord(), 1..10)) {
                let mut ctrl = controller();
                for fix in &fixes {
                    ctrl.init_or_update_map(fix.lat, fix.lon);
                }
                let port = ctrl.port();
                prop_assert_eq!(port.maps_created, 1);
                prop_assert_eq!(port.tile_layers, 1);
                prop_assert_eq!(port.markers_created, 1);
                prop_assert_eq!(port.marker_moves.len(), fixes.len() - 1);
            }

            #[test]
            fn prop_fit_covers_every_route(
                paths in prop::collection::vec(prop::collection::vec(valid_coord(), 1..8), 1..6)
            ) {
                let mut ctrl = controller();
                fetching(&mut ctrl);
                let courses = paths
                    .iter()
                    .enumerate()
                    .map(|(i, path)| Course {
                        id: CourseId::Number(i as i64),
                        coordinates: Some(path.clone()),
                        length_km: Some(1.0),
                    })
                    .collect::<Vec<_>>();
                ctrl.settle_fetch(Ok(SearchResponse { courses: Some(courses), message: None }));

                let expected = format!("Found {} course(s). Displaying routes.", paths.len());
                prop_assert_eq!(&ctrl.status().text, &expected);
                let port = ctrl.port();
                prop_assert_eq!(port.fits.len(), 1);
                for path in &paths {
                    let bounds = Bounds::from_points(path).unwrap();
                    prop_assert!(port.fits[0].contains(&bounds));
                }
                prop_assert!(!ctrl.is_searching());
            }
        }
    }
}
