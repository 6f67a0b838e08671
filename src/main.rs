use yew::prelude::*;
use log::info;

mod config;
mod reveal;
mod utils;
mod playground {
    pub mod download;
    pub mod provider;
    pub mod state;
    pub mod upload;
}
mod components {
    pub mod faq;
    pub mod modal;
    pub mod nav;
    pub mod playground;
    pub mod reveal;
}
mod pages {
    pub mod home;
}

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

use components::modal::ModalProvider;
use pages::home::Home;

#[function_component]
fn App() -> Html {
    html! {
        <ModalProvider>
            <Home />
        </ModalProvider>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
