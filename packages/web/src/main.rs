// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

use board_core::FilterState;
use dioxus::prelude::*;

use ui::{CreatePostingForm, Filters, JobGrid, Navbar};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
        #[route("/")]
        Home {},
        #[route("/create")]
        Create {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        use tracing_subscriber::EnvFilter;

        dotenvy::dotenv().ok();

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();

        dioxus::serve(|| async move {
            api::ensure_initialized().await?;
            tracing::info!("Serving job board with REST endpoints at /api/jobs");
            Ok(dioxus::server::router(App).merge(api::rest_router()))
        });
    }

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `Navbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        Navbar {
            Link {
                to: Route::Home {},
                "Home"
            }
            Link {
                to: Route::Home {},
                "Find Jobs"
            }
            Link {
                to: Route::Create {},
                class: "navbar-cta",
                "Create Jobs"
            }
        }

        Outlet::<Route> {}
    }
}

/// Job search page.
#[component]
fn Home() -> Element {
    let filters = use_signal(FilterState::default);

    rsx! {
        main { class: "page-container",
            Filters { state: filters }
            JobGrid { filters }
        }
    }
}

/// Posting creation page; returns home once published or cancelled.
#[component]
fn Create() -> Element {
    let nav = use_navigator();

    rsx! {
        main { class: "page-container",
            CreatePostingForm {
                on_created: move |_| {
                    nav.replace(Route::Home {});
                },
                on_cancel: move |_| {
                    nav.replace(Route::Home {});
                },
            }
        }
    }
}
