//! Grid of postings matching the current filters.

use board_core::{FilterState, JobPosting};
use dioxus::prelude::*;

use crate::JobCard;

/// Delay after the last filter change before searching, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u32 = 350;

/// Maximum number of cards shown at once.
pub const GRID_CARD_LIMIT: usize = 8;

/// Props for JobGrid component.
#[derive(Props, Clone, PartialEq)]
pub struct JobGridProps {
    /// Filter inputs edited by the filter bar.
    pub filters: Signal<FilterState>,
}

/// Grid component that searches whenever the filters settle.
#[component]
pub fn JobGrid(props: JobGridProps) -> Element {
    let filters = props.filters;
    let mut postings = use_signal(Vec::<JobPosting>::new);
    let mut total = use_signal(|| 0_u64);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);

    // Restarted on every filter change, so only the last edit reaches the server.
    let _search = use_resource(move || {
        let params = filters().to_params();
        async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;

            #[cfg(not(target_arch = "wasm32"))]
            tokio::time::sleep(std::time::Duration::from_millis(SEARCH_DEBOUNCE_MS as u64)).await;

            loading.set(true);
            match api::search_postings(params).await {
                Ok(page) => {
                    total.set(page.meta.total);
                    postings.set(page.data.into_iter().take(GRID_CARD_LIMIT).collect());
                    error.set(None);
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch jobs: {}", e);
                    error.set(Some(format!("Failed to fetch jobs: {}", e)));
                }
            }
            loading.set(false);
        }
    });

    let now = chrono::Utc::now();

    rsx! {
        section { class: "job-grid",
            if let Some(err) = error() {
                div { class: "error-banner",
                    span { "{err}" }
                    button {
                        onclick: move |_| error.set(None),
                        "×"
                    }
                }
            }

            if loading() && postings.read().is_empty() {
                div { class: "loading", "Loading jobs..." }
            } else if postings.read().is_empty() {
                div { class: "empty-state",
                    p { "No jobs match these filters" }
                }
            } else {
                p { class: "job-grid-count", "Showing {postings.read().len()} of {total} jobs" }
                div { class: "job-grid-cards",
                    for posting in postings.read().iter() {
                        JobCard {
                            key: "{posting.id}",
                            posting: posting.clone(),
                            now,
                        }
                    }
                }
            }
        }
    }
}
