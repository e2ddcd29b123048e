mod api;
mod app;
mod map;

use app::App;

fn main() {
    leptos::mount_to_body(App);
}
