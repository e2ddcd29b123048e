use alert_core::geo;
use alert_core::model::Alert;
use alert_core::severity::classify;
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const INITIAL_CENTER: (f64, f64) = (20.0, 0.0);
const INITIAL_ZOOM: f64 = 2.0;
const FIT_PAD: f64 = 0.2;

fn js_err(err: JsValue) -> String {
    format!("{err:?}")
}

fn leaflet() -> Result<JsValue, String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let l = Reflect::get(&window, &JsValue::from_str("L"))
        .map_err(|_| "failed to access Leaflet global".to_string())?;
    if l.is_undefined() || l.is_null() {
        return Err("Leaflet is not loaded".into());
    }
    Ok(l)
}

fn call(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, String> {
    let value = Reflect::get(target, &JsValue::from_str(name)).map_err(js_err)?;
    let function: Function = value
        .dyn_into()
        .map_err(|_| format!("'{name}' is not a function"))?;
    match args {
        [] => function.call0(target),
        [a] => function.call1(target, a),
        [a, b] => function.call2(target, a, b),
        _ => {
            let list = Array::new();
            for arg in args {
                list.push(arg);
            }
            Reflect::apply(&function, target, &list)
        }
    }
    .map_err(js_err)
}

fn options(value: &serde_json::Value) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

fn lat_lng(lat: f64, lon: f64) -> JsValue {
    Array::of2(&JsValue::from_f64(lat), &JsValue::from_f64(lon)).into()
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn marker_icon_html(color: &str) -> String {
    format!(
        "<span style=\"background-color: {color}; width: 1.5rem; height: 1.5rem; \
         border-radius: 50%; display: flex; justify-content: center; align-items: center; \
         border: 2px solid white; box-shadow: 0 2px 5px rgba(0,0,0,0.3);\">\
         <span style=\"background-color: white; width: 0.5rem; height: 0.5rem; \
         border-radius: 50%;\"></span></span>"
    )
}

fn popup_html(alert: &Alert) -> String {
    let severity = classify(alert.severity);
    format!(
        "<div class=\"popup\">\
         <h3>{}</h3>\
         <p><strong>Summary:</strong> {}</p>\
         <p><strong>Location:</strong> {}</p>\
         <p><strong>Severity:</strong> <span style=\"color: {};\">{} ({})</span></p>\
         <p class=\"meta\">{}</p>\
         </div>",
        escape_html(&alert.alert_type),
        escape_html(&alert.summary),
        escape_html(&alert.location),
        severity.color(),
        severity.label(),
        alert.severity,
        alert.formatted_timestamp(),
    )
}

/// Handle to the mounted Leaflet map and the single layer group that owns
/// every alert marker.
#[derive(Clone)]
pub struct MapScene {
    map: JsValue,
    markers: JsValue,
}

impl MapScene {
    /// Creates the map in the given container with the world view and OSM
    /// tiles, plus an empty marker group.
    pub fn mount(container_id: &str) -> Result<Self, String> {
        let l = leaflet()?;

        let map = call(&l, "map", &[&JsValue::from_str(container_id)])?;
        let center = lat_lng(INITIAL_CENTER.0, INITIAL_CENTER.1);
        call(&map, "setView", &[&center, &JsValue::from_f64(INITIAL_ZOOM)])?;

        let tile_options = options(&serde_json::json!({ "attribution": TILE_ATTRIBUTION }))?;
        let tiles = call(&l, "tileLayer", &[&JsValue::from_str(TILE_URL), &tile_options])?;
        call(&tiles, "addTo", &[&map])?;

        let markers = call(&l, "layerGroup", &[])?;
        call(&markers, "addTo", &[&map])?;

        Ok(MapScene { map, markers })
    }

    /// Declarative redraw against the desired marker set: clear everything,
    /// place one marker per alert, then fit the viewport around them. An
    /// empty snapshot leaves the viewport where it was.
    pub fn reconcile(&self, alerts: &[Alert]) -> Result<(), String> {
        let l = leaflet()?;

        // The container may have just been unhidden by a tab switch.
        call(&self.map, "invalidateSize", &[])?;

        call(&self.markers, "clearLayers", &[])?;
        for alert in alerts {
            let marker = build_marker(&l, alert)?;
            call(&self.markers, "addLayer", &[&marker])?;
        }

        if let Some(bounds) = geo::fit_bounds(alerts, FIT_PAD) {
            let corners: JsValue = Array::of2(
                &lat_lng(bounds.south, bounds.west),
                &lat_lng(bounds.north, bounds.east),
            )
            .into();
            call(&self.map, "fitBounds", &[&corners])?;
        }
        Ok(())
    }
}

fn build_marker(l: &JsValue, alert: &Alert) -> Result<JsValue, String> {
    let severity = classify(alert.severity);
    let icon_options = options(&serde_json::json!({
        "html": marker_icon_html(severity.color()),
        "className": "",
        "iconSize": [24, 24],
        "iconAnchor": [12, 12],
    }))?;
    let icon = call(l, "divIcon", &[&icon_options])?;

    let marker_options: JsValue = Object::new().into();
    Reflect::set(&marker_options, &JsValue::from_str("icon"), &icon).map_err(js_err)?;

    let coords = lat_lng(alert.lat, alert.lon);
    let marker = call(l, "marker", &[&coords, &marker_options])?;
    call(&marker, "bindPopup", &[&JsValue::from_str(&popup_html(alert))])?;
    Ok(marker)
}
