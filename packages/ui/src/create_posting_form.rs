//! Create posting form component.

use board_core::{JobPosting, JobType, PostingForm, ValidationRules, validate_new_posting};
use dioxus::prelude::*;

/// Props for CreatePostingForm component.
#[derive(Props, Clone, PartialEq)]
pub struct CreatePostingFormProps {
    /// Callback when the posting is published.
    pub on_created: EventHandler<JobPosting>,
    /// Callback when form is cancelled.
    pub on_cancel: EventHandler<()>,
}

/// Form component for publishing a new posting.
#[component]
pub fn CreatePostingForm(props: CreatePostingFormProps) -> Element {
    let mut form = use_signal(PostingForm::default);
    let mut errors = use_signal(Vec::<String>::new);
    let mut submitting = use_signal(|| false);

    let submit = move |_| {
        let posting = form().to_new_posting();

        // Catch obvious mistakes before the round trip; the server checks again.
        if let Err(found) = validate_new_posting(&posting, &ValidationRules::default()) {
            errors.set(found.errors.into_iter().map(|e| e.message).collect());
            return;
        }

        spawn(async move {
            submitting.set(true);
            errors.set(Vec::new());

            match api::create_posting(posting).await {
                Ok(created) => {
                    tracing::info!("Published posting {}", created.id);
                    form.set(PostingForm::default());
                    props.on_created.call(created);
                }
                Err(e) => {
                    errors.set(vec![format!("Failed to publish job: {}", e)]);
                }
            }

            submitting.set(false);
        });
    };

    rsx! {
        div { class: "create-posting-form",
            h2 { "Create Job Opening" }

            if !errors().is_empty() {
                div { class: "error-message",
                    for (i, message) in errors().iter().enumerate() {
                        p { key: "{i}", "{message}" }
                    }
                }
            }

            div { class: "form-row",
                div { class: "form-group",
                    label { "Job Title" }
                    input {
                        placeholder: "Full Stack Developer",
                        value: "{form().title}",
                        oninput: move |e| form.write().title = e.value(),
                    }
                }
                div { class: "form-group",
                    label { "Company Name" }
                    input {
                        placeholder: "Amazon",
                        value: "{form().company}",
                        oninput: move |e| form.write().company = e.value(),
                    }
                }
            }

            div { class: "form-row",
                div { class: "form-group",
                    label { "Location" }
                    input {
                        placeholder: "Choose Preferred Location",
                        value: "{form().location}",
                        oninput: move |e| form.write().location = e.value(),
                    }
                }
                div { class: "form-group",
                    label { "Job Type" }
                    select {
                        value: "{form().job_type}",
                        onchange: move |e| form.write().job_type = e.value(),

                        option { value: "", "Select job type" }
                        for job_type in JobType::ALL {
                            option { value: job_type.as_str(), "{job_type}" }
                        }
                    }
                }
            }

            div { class: "form-row",
                div { class: "form-group",
                    label { "Salary Range" }
                    div { class: "form-salary",
                        input {
                            placeholder: "₹0",
                            inputmode: "numeric",
                            value: "{form().salary_min}",
                            oninput: move |e| form.write().salary_min = e.value(),
                        }
                        input {
                            placeholder: "₹12,00,000",
                            inputmode: "numeric",
                            value: "{form().salary_max}",
                            oninput: move |e| form.write().salary_max = e.value(),
                        }
                    }
                }
                div { class: "form-group",
                    label { "Application Deadline" }
                    input {
                        r#type: "date",
                        value: "{form().deadline}",
                        oninput: move |e| form.write().deadline = e.value(),
                    }
                }
            }

            div { class: "form-group",
                label { "Job Description" }
                textarea {
                    rows: 6,
                    placeholder: "Please share a description to let the candidate know more about the job role",
                    value: "{form().description}",
                    oninput: move |e| form.write().description = e.value(),
                }
            }

            div { class: "form-actions",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    disabled: submitting(),
                    onclick: submit,
                    if submitting() { "Publishing..." } else { "Publish" }
                }
            }
        }
    }
}
