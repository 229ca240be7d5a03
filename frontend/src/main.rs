mod api;
mod analysis;
mod chat;
mod dashboard;
mod env_config;
mod library;
mod models;
mod router;
mod utils;

use crate::env_config::{get_api_base_url, get_app_name, get_user_id};
use crate::router::{switch, Route};
use web_sys::console;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();

    console::log_1(
        &format!(
            "NAME: \"{}\", API: \"{}\", USER: \"{}\"",
            get_app_name(),
            get_api_base_url(),
            get_user_id()
        )
        .into(),
    );
}
