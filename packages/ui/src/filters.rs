//! Filter bar: search, location, job type and salary range.

use board_core::{FilterState, JobType, SALARY_SLIDER_MAX_K};
use dioxus::prelude::*;

/// Props for Filters component.
#[derive(Props, Clone, PartialEq)]
pub struct FiltersProps {
    /// Filter inputs shared with the job grid.
    pub state: Signal<FilterState>,
}

/// Filter bar component. Edits `state` in place; the grid reacts to changes.
#[component]
pub fn Filters(props: FiltersProps) -> Element {
    let mut state = props.state;
    let (low, high) = state().salary_k;

    rsx! {
        div { class: "filters",
            div { class: "filter-field",
                input {
                    r#type: "search",
                    placeholder: "Search By Job Title, Role",
                    value: "{state().query}",
                    oninput: move |e| state.write().query = e.value(),
                }
            }

            div { class: "filter-field",
                input {
                    r#type: "text",
                    placeholder: "Search By Location",
                    value: "{state().location}",
                    oninput: move |e| state.write().location = e.value(),
                }
            }

            div { class: "filter-field",
                select {
                    value: "{state().job_type}",
                    onchange: move |e| state.write().job_type = e.value(),

                    option { value: "", "Job type" }
                    for job_type in JobType::ALL {
                        option { value: job_type.as_str(), "{job_type}" }
                    }
                }
            }

            div { class: "filter-field filter-salary",
                div { class: "filter-salary-header",
                    span { "Salary Per Month" }
                    span { class: "filter-salary-value", "₹{low}k - ₹{high}k" }
                }
                input {
                    r#type: "range",
                    min: "0",
                    max: "{SALARY_SLIDER_MAX_K}",
                    step: "1",
                    value: "{low}",
                    oninput: move |e| {
                        if let Ok(k) = e.value().parse::<u32>() {
                            let mut s = state.write();
                            s.salary_k.0 = k.min(s.salary_k.1);
                        }
                    },
                }
                input {
                    r#type: "range",
                    min: "0",
                    max: "{SALARY_SLIDER_MAX_K}",
                    step: "1",
                    value: "{high}",
                    oninput: move |e| {
                        if let Ok(k) = e.value().parse::<u32>() {
                            let mut s = state.write();
                            s.salary_k.1 = k.max(s.salary_k.0).min(SALARY_SLIDER_MAX_K);
                        }
                    },
                }
            }
        }
    }
}
