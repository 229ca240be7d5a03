use crate::api::{fetch_library, generate_transcript, ingest_channel, ingest_video, search_library};
use crate::env_config::USER_ID;
use crate::models::{SearchResponse, VideoRecord};
use crate::utils::{format_iso8601_date, format_iso8601_duration, format_number};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct IngestFormProps {
    placeholder: &'static str,
    button_label: &'static str,
    busy: bool,
    on_submit: Callback<String>,
}

#[function_component(IngestForm)]
fn ingest_form(props: &IngestFormProps) -> Html {
    let value = use_state(String::new);

    let on_input = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            value.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let value = value.clone();
        let emit = props.on_submit.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let text = (*value).trim().to_string();
            if !text.is_empty() {
                emit.emit(text);
                value.set(String::new());
            }
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex gap-2">
            <input
                type="text"
                class="flex-grow p-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-orange-500"
                placeholder={props.placeholder}
                value={(*value).clone()}
                oninput={on_input}
                disabled={props.busy}
            />
            <button
                type="submit"
                class="bg-orange-600 text-white px-4 py-2 rounded-lg hover:bg-orange-700 disabled:opacity-50"
                disabled={props.busy}
            >
                { props.button_label }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct TranscriptModalProps {
    title: String,
    transcript: String,
    on_close: Callback<()>,
}

#[function_component(TranscriptModal)]
fn transcript_modal(props: &TranscriptModalProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center p-4 z-50">
            <div class="bg-white rounded-lg shadow-lg max-w-2xl w-full max-h-[80vh] flex flex-col">
                <div class="flex justify-between items-center p-4 border-b border-orange-100">
                    <h3 class="font-semibold text-gray-900">{ format!("Transcript: {}", props.title) }</h3>
                    <button class="text-gray-500 hover:text-gray-800" onclick={on_close}>{"✕"}</button>
                </div>
                <div class="p-4 overflow-y-auto">
                    <p class="whitespace-pre-wrap text-gray-700">{ &props.transcript }</p>
                </div>
            </div>
        </div>
    }
}

#[function_component(LibraryPanel)]
pub fn library_panel() -> Html {
    let videos = use_state(Vec::<VideoRecord>::new);
    let loading = use_state(|| false);
    let busy = use_state(|| false);
    let status = use_state(Option::<String>::default);
    let error_message = use_state(Option::<String>::default);
    let modal = use_state(Option::<(String, String)>::default);
    let search = use_state(Option::<SearchResponse>::default);

    let reload = {
        let videos = videos.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        Callback::from(move |_: ()| {
            let videos = videos.clone();
            let loading = loading.clone();
            let error_message = error_message.clone();
            loading.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_library(&USER_ID).await {
                    Ok(list) => {
                        videos.set(list);
                        error_message.set(None);
                    }
                    Err(e) => error_message.set(Some(e)),
                }
                loading.set(false);
            });
        })
    };

    {
        let reload = reload.clone();
        use_effect_with((), move |_| {
            reload.emit(());
            || ()
        });
    }

    let on_add_video = {
        let busy = busy.clone();
        let status = status.clone();
        let error_message = error_message.clone();
        let reload = reload.clone();
        Callback::from(move |url: String| {
            let busy = busy.clone();
            let status = status.clone();
            let error_message = error_message.clone();
            let reload = reload.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match ingest_video(&USER_ID, &url).await {
                    Ok(response) => {
                        status.set(Some(format!("Added \"{}\"", response.title)));
                        error_message.set(None);
                        reload.emit(());
                    }
                    Err(e) => error_message.set(Some(e)),
                }
                busy.set(false);
            });
        })
    };

    let on_add_channel = {
        let busy = busy.clone();
        let status = status.clone();
        let error_message = error_message.clone();
        let reload = reload.clone();
        Callback::from(move |channel: String| {
            let busy = busy.clone();
            let status = status.clone();
            let error_message = error_message.clone();
            let reload = reload.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match ingest_channel(&USER_ID, &channel).await {
                    Ok(response) => {
                        status.set(Some(format!(
                            "Added {} videos from {}",
                            response.video_count, response.channel_title
                        )));
                        error_message.set(None);
                        reload.emit(());
                    }
                    Err(e) => error_message.set(Some(e)),
                }
                busy.set(false);
            });
        })
    };

    let on_transcript = {
        let busy = busy.clone();
        let error_message = error_message.clone();
        let modal = modal.clone();
        let reload = reload.clone();
        Callback::from(move |(video_id, title): (String, String)| {
            let busy = busy.clone();
            let error_message = error_message.clone();
            let modal = modal.clone();
            let reload = reload.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match generate_transcript(&USER_ID, &video_id).await {
                    Ok(response) => {
                        modal.set(Some((title, response.transcript)));
                        error_message.set(None);
                        reload.emit(());
                    }
                    Err(e) => error_message.set(Some(e)),
                }
                busy.set(false);
            });
        })
    };

    let on_search = {
        let busy = busy.clone();
        let error_message = error_message.clone();
        let search = search.clone();
        Callback::from(move |query: String| {
            let busy = busy.clone();
            let error_message = error_message.clone();
            let search = search.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match search_library(&USER_ID, &query).await {
                    Ok(response) => {
                        search.set(Some(response));
                        error_message.set(None);
                    }
                    Err(e) => error_message.set(Some(e)),
                }
                busy.set(false);
            });
        })
    };

    let on_clear_search = {
        let search = search.clone();
        Callback::from(move |_: MouseEvent| search.set(None))
    };

    let on_modal_close = {
        let modal = modal.clone();
        Callback::from(move |_| modal.set(None))
    };

    let displayed: &Vec<VideoRecord> = match &*search {
        Some(response) => &response.results,
        None => &*videos,
    };

    html! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg border border-orange-100 p-4 space-y-3">
                <h3 class="font-semibold text-gray-900">{"Smart Search"}</h3>
                <IngestForm
                    placeholder="Search your videos by topic, content, or keywords..."
                    button_label="Search"
                    busy={*busy}
                    on_submit={on_search}
                />
                {
                    if let Some(response) = &*search {
                        html! {
                            <p class="text-sm text-gray-600">
                                { &response.message }
                                <button class="ml-2 text-orange-600 hover:underline" onclick={on_clear_search}>
                                    {"Clear"}
                                </button>
                            </p>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>

            <div class="bg-white rounded-lg border border-orange-100 p-4 space-y-3">
                <h3 class="font-semibold text-gray-900">{"Add to your library"}</h3>
                <IngestForm
                    placeholder="Paste a YouTube video URL or ID..."
                    button_label="Add Video"
                    busy={*busy}
                    on_submit={on_add_video}
                />
                <IngestForm
                    placeholder="Channel ID, handle or username..."
                    button_label="Add Channel"
                    busy={*busy}
                    on_submit={on_add_channel}
                />
            </div>

            {
                if let Some(msg) = &*status {
                    html! { <p class="text-green-700 text-sm">{ msg }</p> }
                } else {
                    html! {}
                }
            }
            {
                if let Some(msg) = &*error_message {
                    html! { <p class="text-red-600 text-sm">{ format!("Error: {msg}") }</p> }
                } else {
                    html! {}
                }
            }

            {
                if *loading {
                    html! { <p class="text-gray-500">{"Loading library..."}</p> }
                } else if displayed.is_empty() {
                    if search.is_some() {
                        html! { <p class="text-gray-500">{"No videos matched your search."}</p> }
                    } else {
                        html! { <p class="text-gray-500">{"Your library is empty. Add a video to get started."}</p> }
                    }
                } else {
                    html! {
                        <div class="grid md:grid-cols-2 gap-4">
                            { for displayed.iter().map(|video| {
                                let has_transcript = video.transcript.as_deref().is_some_and(|t| !t.is_empty());
                                let onclick = {
                                    let on_transcript = on_transcript.clone();
                                    let id = video.video_id.clone();
                                    let title = video.title.clone();
                                    Callback::from(move |_| on_transcript.emit((id.clone(), title.clone())))
                                };
                                html! {
                                    <div class="bg-white rounded-lg border border-orange-100 overflow-hidden">
                                        {
                                            if let Some(url) = &video.thumbnail_url {
                                                html! { <img src={url.clone()} alt="thumbnail" class="w-full h-40 object-cover" /> }
                                            } else {
                                                html! {}
                                            }
                                        }
                                        <div class="p-4 space-y-2">
                                            <a href={format!("https://www.youtube.com/watch?v={}", video.video_id)}
                                               target="_blank"
                                               class="font-semibold text-gray-900 hover:text-orange-600">
                                                { &video.title }
                                            </a>
                                            <p class="text-sm text-gray-500">{ &video.channel_title }</p>
                                            <div class="text-xs text-gray-500 flex flex-wrap gap-3">
                                                <span>{ format_iso8601_date(&video.published_at) }</span>
                                                <span>{ format_iso8601_duration(&video.duration) }</span>
                                                <span>{ format!("{} views", format_number(video.view_count)) }</span>
                                                <span>{ format!("{} likes", format_number(video.like_count)) }</span>
                                            </div>
                                            <button
                                                class="text-sm text-orange-600 hover:underline disabled:opacity-50"
                                                disabled={*busy}
                                                {onclick}
                                            >
                                                { if has_transcript { "View transcript" } else { "Generate transcript" } }
                                            </button>
                                        </div>
                                    </div>
                                }
                            })}
                        </div>
                    }
                }
            }

            {
                if let Some((title, transcript)) = &*modal {
                    html! {
                        <TranscriptModal
                            title={title.clone()}
                            transcript={transcript.clone()}
                            on_close={on_modal_close}
                        />
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
