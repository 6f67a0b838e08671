use log::{debug, error, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Event, File, HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::config::PlaygroundConfig;
use crate::playground::download::download_result;
use crate::playground::provider::{ProviderHandle, SourceImage};
use crate::playground::state::{next_ticket, InFlight, PlaygroundAction, PlaygroundState, Ticket};
use crate::playground::upload::{begin_selection, first_file, read_as_data_url};
use crate::utils::alert;

#[derive(Properties, PartialEq)]
pub struct PlaygroundProps {
    #[prop_or_default]
    pub provider: ProviderHandle,
    #[prop_or_default]
    pub config: PlaygroundConfig,
}

#[function_component(Playground)]
pub fn playground(props: &PlaygroundProps) -> Html {
    let state = use_reducer(PlaygroundState::default);
    let tickets = use_mut_ref(|| 0 as Ticket);
    let in_flight = use_mut_ref(InFlight::default);
    let file_input = use_node_ref();

    let handle_file = {
        let dispatcher = state.dispatcher();
        let tickets = tickets.clone();
        let invalid_message = props.config.invalid_upload_message.clone();
        Callback::from(move |file: File| {
            let ticket = match begin_selection(&file.type_(), &tickets) {
                Ok(ticket) => ticket,
                Err(e) => {
                    warn!("Rejected upload '{}': {}", file.name(), e);
                    alert(&invalid_message);
                    return;
                }
            };
            dispatcher.dispatch(PlaygroundAction::BeginDecode { ticket });

            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                match read_as_data_url(&file).await {
                    Ok(data_url) => {
                        info!("Loaded preview for '{}'", file.name());
                        dispatcher.dispatch(PlaygroundAction::PreviewReady { ticket, data_url });
                    }
                    Err(e) => {
                        error!("{}", e);
                        dispatcher.dispatch(PlaygroundAction::DecodeFailed { ticket });
                    }
                }
            });
        })
    };

    let on_zone_click = {
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let on_drag_over = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dispatcher.dispatch(PlaygroundAction::DragOver);
        })
    };

    let on_drag_leave = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: DragEvent| {
            dispatcher.dispatch(PlaygroundAction::DragLeave);
        })
    };

    let on_drop = {
        let dispatcher = state.dispatcher();
        let handle_file = handle_file.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            dispatcher.dispatch(PlaygroundAction::DragLeave);
            if let Some(file) = first_file(e.data_transfer().and_then(|transfer| transfer.files())) {
                handle_file.emit(file);
            }
        })
    };

    let on_file_change = {
        let handle_file = handle_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = first_file(input.files()) {
                handle_file.emit(file);
            }
        })
    };

    let on_generate = {
        let dispatcher = state.dispatcher();
        let tickets = tickets.clone();
        let in_flight = in_flight.clone();
        let provider = props.provider.clone();
        let preview = state.preview.clone();
        let can_generate = state.can_generate();
        Callback::from(move |_: MouseEvent| {
            let Some(data_url) = preview.clone() else {
                return;
            };
            if !can_generate {
                return;
            }
            if !in_flight.borrow_mut().try_begin() {
                debug!("Generation already running, ignoring click");
                return;
            }

            let ticket = next_ticket(&tickets);
            dispatcher.dispatch(PlaygroundAction::Generate { ticket });

            let dispatcher = dispatcher.clone();
            let provider = provider.clone();
            let in_flight = in_flight.clone();
            spawn_local(async move {
                let outcome = provider.0.submit(SourceImage { data_url }).await;
                in_flight.borrow_mut().finish();
                match outcome {
                    Ok(image) => {
                        info!("Generation finished: {}", image.url);
                        dispatcher.dispatch(PlaygroundAction::Generated { ticket, result_url: image.url });
                    }
                    Err(e) => {
                        error!("Generation failed: {}", e);
                        dispatcher.dispatch(PlaygroundAction::GenerationFailed { ticket });
                    }
                }
            });
        })
    };

    let on_reset = {
        let dispatcher = state.dispatcher();
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            // Clear the input so picking the same file again still fires `change`.
            if let Some(input) = file_input.cast::<HtmlInputElement>() {
                input.set_value("");
            }
            dispatcher.dispatch(PlaygroundAction::Reset);
        })
    };

    let on_download = {
        let result_url = state.result_url().map(str::to_string);
        let filename = props.config.download_filename.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(url) = result_url.clone() {
                spawn_local(download_result(url, filename.clone()));
            }
        })
    };

    let zone_style = if state.dragging {
        "border-color: var(--primary);"
    } else {
        "border-color: var(--border);"
    };

    html! {
        <section id="playground" class="playground">
            <div class="container">
                <h2 class="section-title">{"Try it yourself"}</h2>
                <div class="playground-grid">
                    <div class="playground-input">
                        <div
                            id="upload-zone"
                            class={classes!("upload-zone", state.is_decoding().then(|| "loading"))}
                            style={zone_style}
                            onclick={on_zone_click}
                            ondragover={on_drag_over}
                            ondragleave={on_drag_leave}
                            ondrop={on_drop}
                        >
                            <div class={classes!("upload-placeholder", (!state.show_upload_placeholder()).then(|| "hidden"))}>
                                <span class="upload-icon">{"⇪"}</span>
                                <p>{"Drag & drop an image here, or click to browse"}</p>
                            </div>
                            <img
                                id="preview-image"
                                class={classes!("preview-image", state.preview.is_none().then(|| "hidden"))}
                                src={state.preview.clone().unwrap_or_default()}
                                alt="Uploaded image preview"
                            />
                        </div>
                        <input
                            id="file-input"
                            ref={file_input}
                            type="file"
                            accept="image/*"
                            class="hidden"
                            onchange={on_file_change}
                        />
                        <div class="playground-actions">
                            <button id="generate-btn" class="btn btn-primary" disabled={!state.can_generate()} onclick={on_generate}>
                                {state.generate_label()}
                            </button>
                            <button id="reset-btn" class="btn btn-secondary" onclick={on_reset}>
                                {"Reset"}
                            </button>
                        </div>
                    </div>
                    <div id="result-container" class="playground-output">
                        <div id="result-placeholder" class={classes!("result-placeholder", (!state.show_result_placeholder()).then(|| "hidden"))}>
                            <p>{"Your generated image will appear here"}</p>
                        </div>
                        <div id="loading-state" class={classes!("loading-state", (!state.show_loading()).then(|| "hidden"))}>
                            <div class="spinner"></div>
                            <p>{"Generating..."}</p>
                        </div>
                        <img
                            id="result-image"
                            class={classes!("result-image", (!state.show_result()).then(|| "hidden"))}
                            src={state.result_url().unwrap_or_default().to_string()}
                            alt="Generated result"
                        />
                        <button id="download-btn" class="btn btn-secondary" disabled={!state.can_download()} onclick={on_download}>
                            {"Download"}
                        </button>
                    </div>
                </div>
            </div>
        </section>
    }
}
