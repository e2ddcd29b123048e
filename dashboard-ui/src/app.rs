use crate::api::ApiClient;
use crate::map::MapScene;
use alert_core::filter::{filter_alerts, AlertStats, SeverityFilters};
use alert_core::model::{Alert, HealthStatus};
use alert_core::report::{validate, FieldErrors, ReportDraft, SubmitOutcome};
use alert_core::severity::{classify, Severity};
use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::*;
use std::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

const REFRESH_INTERVAL: Duration = Duration::from_secs(30);
const MAP_CONTAINER_ID: &str = "map";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Dashboard,
    Map,
    Report,
}

fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

#[component]
pub fn App() -> impl IntoView {
    let client = ApiClient::from_window();

    let health = create_rw_signal(HealthStatus::default());
    let alerts = create_rw_signal(Vec::<Alert>::new());
    let loading = create_rw_signal(true);
    let filters = create_rw_signal(SeverityFilters::default());
    let page = create_rw_signal(Page::Dashboard);

    // Initial load: health and alerts in flight together, one transition to
    // ready once both settle. The client never rejects, so this cannot stall.
    {
        let client = client.clone();
        spawn_local(async move {
            let (health_data, alert_data) =
                futures::join!(client.check_health(), client.fetch_alerts());
            health.set(health_data);
            alerts.set(alert_data);
            loading.set(false);
        });
    }

    // Background refresh replaces the whole alert snapshot each tick. The
    // handle is cleared on cleanup so no orphaned timer outlives the view.
    {
        let client = client.clone();
        let tick = move || {
            let client = client.clone();
            spawn_local(async move {
                let latest = client.fetch_alerts().await;
                alerts.set(latest);
            });
        };
        match set_interval_with_handle(tick, REFRESH_INTERVAL) {
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(err) => log_error(&format!("failed to start refresh timer: {err:?}")),
        }
    }

    let filtered = create_memo(move |_| filter_alerts(&alerts.get(), &filters.get()));
    let stats = create_memo(move |_| AlertStats::aggregate(&alerts.get()));

    // The Leaflet scene mounts lazily the first time the map tab is shown,
    // then gets a full clear-and-redraw whenever the snapshot changes.
    let scene = store_value(None::<MapScene>);
    create_effect(move |_| {
        if page.get() != Page::Map {
            return;
        }
        let snapshot = alerts.get();
        scene.update_value(|slot| {
            if slot.is_none() {
                match MapScene::mount(MAP_CONTAINER_ID) {
                    Ok(mounted) => *slot = Some(mounted),
                    Err(err) => {
                        log_error(&format!("map unavailable: {err}"));
                        return;
                    }
                }
            }
            if let Some(scene) = slot {
                if let Err(err) = scene.reconcile(&snapshot) {
                    log_error(&format!("marker redraw failed: {err}"));
                }
            }
        });
    });

    view! {
      <div class="shell">
        <header class="topbar">
          <span class="brand">"Alertrix"</span>
          <nav>
            <button
              class:active=move || page.get() == Page::Dashboard
              on:click=move |_| page.set(Page::Dashboard)
            >"Dashboard"</button>
            <button
              class:active=move || page.get() == Page::Map
              on:click=move |_| page.set(Page::Map)
            >"Map"</button>
            <button
              class:active=move || page.get() == Page::Report
              on:click=move |_| page.set(Page::Report)
            >"Report Incident"</button>
          </nav>
        </header>

        <main>
          <div class:hidden=move || page.get() != Page::Dashboard>
            <Dashboard health=health loading=loading filters=filters filtered=filtered stats=stats/>
          </div>

          <div class="map-wrap" class:hidden=move || page.get() != Page::Map>
            <div id=MAP_CONTAINER_ID></div>
          </div>

          <div class:hidden=move || page.get() != Page::Report>
            <ReportPage client=client/>
          </div>
        </main>
      </div>
    }
}

#[component]
fn Dashboard(
    health: RwSignal<HealthStatus>,
    loading: RwSignal<bool>,
    filters: RwSignal<SeverityFilters>,
    filtered: Memo<Vec<Alert>>,
    stats: Memo<AlertStats>,
) -> impl IntoView {
    view! {
      <section class="page">
        <h1>"Dashboard"</h1>
        <p class="meta">"Overview of system status and current disaster alerts. Data refreshes periodically."</p>

        <div class="cards">
          <div class="panel">
            <h2>"System Health"</h2>
            <Show
              when=move || !loading.get()
              fallback=|| view! { <p class="meta">"Checking..."</p> }
            >
              <ul class="health">
                <HealthRow name="API Status" value=Signal::derive(move || health.get().status)/>
                <HealthRow name="Database" value=Signal::derive(move || health.get().database)/>
                <HealthRow name="AI Service" value=Signal::derive(move || health.get().mock_ai)/>
              </ul>
            </Show>
          </div>

          <div class="panel">
            <h2>"Total Alerts"</h2>
            <div class="stat">{move || stats.get().total}</div>
          </div>

          <div class="panel">
            <h2>"High Severity"</h2>
            <div class="stat high">{move || stats.get().high}</div>
          </div>
        </div>

        <div class="panel">
          <div class="row spread">
            <h2>"Current Alerts"</h2>
            <div class="row filters">
              <span class="meta">"Filter by severity:"</span>
              {[Severity::Low, Severity::Medium, Severity::High]
                .into_iter()
                .map(|severity| {
                    let label = severity.label();
                    let checked = {
                        let severity = severity.clone();
                        move || filters.get().allows(&severity)
                    };
                    let flip = {
                        let severity = severity.clone();
                        move |_| filters.update(|f| f.toggle(&severity))
                    };
                    view! {
                      <label class="check">
                        <input type="checkbox" prop:checked=checked on:change=flip/>
                        {label}
                      </label>
                    }
                })
                .collect_view()}
            </div>
          </div>

          <Show
            when=move || !loading.get()
            fallback=|| view! { <p class="meta">"Loading alerts..."</p> }
          >
            <AlertTable alerts=filtered/>
          </Show>
        </div>
      </section>
    }
}

#[component]
fn HealthRow(name: &'static str, value: Signal<String>) -> impl IntoView {
    let ok = move || HealthStatus::field_ok(&value.get());
    view! {
      <li>
        <span>{name}": "</span>
        <b class=move || if ok() { "ok" } else { "warn" }>{move || value.get()}</b>
      </li>
    }
}

#[component]
fn AlertTable(alerts: Memo<Vec<Alert>>) -> impl IntoView {
    view! {
      <Show
        when=move || !alerts.get().is_empty()
        fallback=|| view! {
          <div class="empty">
            <h3>"No Alerts Found"</h3>
            <p class="meta">"There are currently no alerts matching your criteria."</p>
          </div>
        }
      >
        <table class="alerts">
          <thead>
            <tr>
              <th>"Severity"</th>
              <th>"Type"</th>
              <th>"Location"</th>
              <th class="right">"Timestamp"</th>
            </tr>
          </thead>
          <tbody>
            <For
              each=move || alerts.get()
              key=|alert| alert.id
              children=move |alert| {
                let severity = classify(alert.severity);
                view! {
                  <tr>
                    <td>
                      <span class=format!("badge {}", severity.css_class())>
                        {format!("{} ({})", severity.label(), alert.severity)}
                      </span>
                    </td>
                    <td>{alert.alert_type.clone()}</td>
                    <td>{alert.location.clone()}</td>
                    <td class="right meta">{alert.formatted_timestamp()}</td>
                  </tr>
                }
              }
            />
          </tbody>
        </table>
      </Show>
    }
}

#[component]
fn ReportPage(client: ApiClient) -> impl IntoView {
    let defaults = ReportDraft::default();
    let text = create_rw_signal(defaults.text);
    let lat = create_rw_signal(defaults.lat);
    let lon = create_rw_signal(defaults.lon);
    let source = create_rw_signal(defaults.source);

    let errors = create_rw_signal(FieldErrors::default());
    let submitting = create_rw_signal(false);
    let notice = create_rw_signal(None::<SubmitOutcome>);

    let submit = move |_| {
        if submitting.get_untracked() {
            return;
        }
        let draft = ReportDraft {
            text: text.get_untracked(),
            lat: lat.get_untracked(),
            lon: lon.get_untracked(),
            source: source.get_untracked(),
        };
        match validate(&draft) {
            Err(field_errors) => errors.set(field_errors),
            Ok(payload) => {
                errors.set(FieldErrors::default());
                notice.set(None);
                submitting.set(true);
                let client = client.clone();
                spawn_local(async move {
                    let outcome = client.post_report(&payload).await;
                    if outcome.success {
                        // Clear the form; a failed submission keeps the
                        // draft on screen for correction and retry.
                        let defaults = ReportDraft::default();
                        text.set(defaults.text);
                        lat.set(defaults.lat);
                        lon.set(defaults.lon);
                        source.set(defaults.source);
                    }
                    notice.set(Some(outcome));
                    submitting.set(false);
                });
            }
        }
    };

    view! {
      <section class="page narrow">
        <div class="panel">
          <h1>"Report an Incident"</h1>
          <p class="meta">"Your report will be analyzed by our AI system to assess its impact and potentially issue new alerts."</p>

          <div class="stack">
            <label>"Incident Description"</label>
            <textarea
              prop:value=move || text.get()
              on:input=move |ev| text.set(event_target_value(&ev))
              placeholder="Describe the incident in detail..."
              rows=5
            ></textarea>
            {move || errors.get().text.map(|msg| view! { <p class="error">{msg}</p> })}

            <div class="row">
              <div class="stack grow">
                <label>"Latitude"</label>
                <input
                  prop:value=move || lat.get()
                  on:input=move |ev| lat.set(event_target_value(&ev))
                  placeholder="e.g., 34.0522"
                />
                {move || errors.get().lat.map(|msg| view! { <p class="error">{msg}</p> })}
              </div>
              <div class="stack grow">
                <label>"Longitude"</label>
                <input
                  prop:value=move || lon.get()
                  on:input=move |ev| lon.set(event_target_value(&ev))
                  placeholder="e.g., -118.2437"
                />
                {move || errors.get().lon.map(|msg| view! { <p class="error">{msg}</p> })}
              </div>
            </div>

            <label>"Source"</label>
            <input
              prop:value=move || source.get()
              on:input=move |ev| source.set(event_target_value(&ev))
              placeholder="e.g., Local Observer"
            />
            {move || errors.get().source.map(|msg| view! { <p class="error">{msg}</p> })}

            <button class="primary" prop:disabled=move || submitting.get() on:click=submit>
              {move || if submitting.get() { "Submitting..." } else { "Submit Report" }}
            </button>

            {move || notice.get().map(|outcome| {
                let class = if outcome.success { "notice ok" } else { "notice warn" };
                view! { <p class=class>{outcome.message}</p> }
            })}
          </div>
        </div>
      </section>
    }
}
