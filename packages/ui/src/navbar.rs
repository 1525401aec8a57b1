use dioxus::prelude::*;

/// Top navigation bar. Links are supplied by the platform crate so it can use
/// its own `Route` enum.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        header { class: "navbar",
            div { class: "navbar-pill",
                span { class: "navbar-logo", "JobBoard" }
                nav { class: "navbar-links", {children} }
            }
        }
    }
}
