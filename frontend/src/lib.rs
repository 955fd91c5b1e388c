mod api;
pub mod config;
pub mod controller;
pub mod error;
mod geolocation;
mod leaflet;
mod logging;
pub mod map;

use seed::{prelude::*, virtual_dom::AtValue, *};
use shared::{Coordinate, SearchResponse};
use tracing::{error, info};
use wasm_bindgen::prelude::wasm_bindgen;

pub use api::interpret_response;
use config::{AppConfig, ElementIds};
use controller::{MapSearchController, SearchStart};
use error::{GeolocationError, SearchError};
use leaflet::LeafletMap;

pub struct Model {
    config: AppConfig,
    distance: String,
    controller: MapSearchController<LeafletMap>,
}

pub enum Msg {
    DistanceChanged(String),
    Search,
    Located {
        distance_km: f64,
        fix: Result<Coordinate, GeolocationError>,
    },
    CoursesFetched(Result<SearchResponse, SearchError>),
    Rendered,
}

pub fn init(_: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.after_next_render(|_| Msg::Rendered);

    let config = AppConfig::from_env();
    info!("course endpoint: {}", config.api_root);
    let controller = MapSearchController::new(LeafletMap, config.map.clone());
    Model {
        config,
        distance: String::new(),
        controller,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::DistanceChanged(val) => model.distance = val,
        Msg::Search => {
            match model
                .controller
                .begin_search(&model.distance, geolocation::is_supported())
            {
                SearchStart::Locate { distance_km } => {
                    orders.perform_cmd(async move {
                        Msg::Located {
                            distance_km,
                            fix: geolocation::current_position().await,
                        }
                    });
                }
                SearchStart::Rejected(err) => {
                    if let Err(js) = window().alert_with_message(&err.to_string()) {
                        error!("alert failed: {js:?}");
                    }
                }
                SearchStart::Unsupported | SearchStart::Busy => {}
            }
        }
        Msg::Located { distance_km, fix } => match fix {
            Ok(position) => {
                let payload = model.controller.location_found(position, distance_km);
                let endpoint = model.config.api_root.clone();
                orders.perform_cmd(async move {
                    Msg::CoursesFetched(api::recommend_courses(endpoint, payload).await)
                });
            }
            Err(err) => model.controller.location_failed(err),
        },
        Msg::CoursesFetched(result) => model.controller.settle_fetch(result),
        Msg::Rendered => check_dom_surface(&model.config.elements),
    }
}

/// Logs every page element the controller relies on that is missing.
fn check_dom_surface(ids: &ElementIds) {
    let expected = [
        (ids.search_button, "search button"),
        (ids.distance_input, "distance input field"),
        (ids.status, "status message region"),
        (ids.map, "map container"),
    ];
    for (id, label) in expected {
        if document().get_element_by_id(id).is_none() {
            error!("{label} not found (#{id})");
        }
    }
}

pub fn view(model: &Model) -> Node<Msg> {
    let ids = &model.config.elements;
    let status = model.controller.status();

    div![
        C!["search-panel"],
        h1!["Find a running course"],
        div![
            C!["input-group"],
            label![attrs! { At::For => ids.distance_input }, "Distance (km)"],
            input![
                C!["form-control"],
                attrs! {
                    At::Id => ids.distance_input,
                    At::Type => "number",
                    At::Min => "0",
                    At::Step => "0.5",
                    At::Value => model.distance.as_str(),
                },
                input_ev(Ev::Input, Msg::DistanceChanged),
            ],
            button![
                C!["btn", "btn-primary"],
                attrs! {
                    At::Id => ids.search_button,
                    At::Disabled => bool_attr(model.controller.is_searching()),
                },
                "Find courses",
                ev(Ev::Click, |event| {
                    event.prevent_default();
                    Msg::Search
                }),
            ],
        ],
        div![
            C!["alert", status.severity.alert_class(), "mt-2"],
            attrs! { At::Id => ids.status },
            style! { St::Display => if status.visible { "block" } else { "none" } },
            status.text.as_str(),
        ],
    ]
}

fn bool_attr(value: bool) -> AtValue {
    if value {
        AtValue::Some("true".into())
    } else {
        AtValue::Ignored
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    if leaflet::is_available() {
        info!("Leaflet library loaded successfully");
    } else {
        error!("Leaflet library not found");
    }
    App::start(ElementIds::default().mount, init, update, view);
}
