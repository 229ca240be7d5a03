use crate::api::analyze_theory;
use crate::env_config::USER_ID;
use crate::models::AnalysisResult;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[function_component(AnalysisPanel)]
pub fn analysis_panel() -> Html {
    let theory = use_state(String::new);
    let loading = use_state(|| false);
    let result = use_state(Option::<AnalysisResult>::default);
    let error_message = use_state(Option::<String>::default);
    let show_raw = use_state(|| false);

    let on_input = {
        let theory = theory.clone();
        Callback::from(move |e: InputEvent| {
            theory.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let theory = theory.clone();
        let loading = loading.clone();
        let result = result.clone();
        let error_message = error_message.clone();
        let show_raw = show_raw.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let query = (*theory).trim().to_string();
            if query.is_empty() || *loading {
                return;
            }

            let loading = loading.clone();
            let result = result.clone();
            let error_message = error_message.clone();
            let show_raw = show_raw.clone();
            loading.set(true);
            error_message.set(None);

            wasm_bindgen_futures::spawn_local(async move {
                match analyze_theory(&USER_ID, &query).await {
                    Ok(response) => {
                        result.set(Some(AnalysisResult {
                            summary: response.summary,
                            raw_data: response.raw_data,
                            videos_analyzed: response.videos_analyzed,
                            batches_skipped: response.batches_skipped,
                        }));
                        show_raw.set(false);
                    }
                    Err(e) => error_message.set(Some(e)),
                }
                loading.set(false);
            });
        })
    };

    let on_toggle_raw = {
        let show_raw = show_raw.clone();
        Callback::from(move |_| show_raw.set(!*show_raw))
    };

    html! {
        <div class="space-y-6">
            <div class="bg-white rounded-lg border border-orange-100 p-4">
                <h3 class="font-semibold text-gray-900 mb-3">{"Search your library by theory"}</h3>
                <form onsubmit={on_submit} class="flex gap-2">
                    <input
                        type="text"
                        class="flex-grow p-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-orange-500"
                        placeholder="e.g. the simulation hypothesis"
                        value={(*theory).clone()}
                        oninput={on_input}
                        disabled={*loading}
                    />
                    <button
                        type="submit"
                        class="bg-orange-600 text-white px-4 py-2 rounded-lg hover:bg-orange-700 disabled:opacity-50"
                        disabled={*loading}
                    >
                        { if *loading { "Analyzing..." } else { "Analyze" } }
                    </button>
                </form>
                {
                    if *loading {
                        html! {
                            <p class="text-sm text-gray-400 mt-2">
                                {"Reading transcripts in batches. This can take a little while."}
                            </p>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>

            {
                if let Some(msg) = &*error_message {
                    html! { <p class="text-red-600 text-sm">{ format!("Error: {msg}") }</p> }
                } else {
                    html! {}
                }
            }

            {
                if let Some(analysis) = &*result {
                    html! {
                        <div class="bg-white rounded-lg border border-orange-100 p-4 space-y-4">
                            <div class="flex justify-between items-center">
                                <h3 class="font-semibold text-gray-900">{"Summary"}</h3>
                                <span class="text-xs text-gray-500">
                                    { format!(
                                        "{} videos analyzed{}",
                                        analysis.videos_analyzed,
                                        if analysis.batches_skipped > 0 {
                                            format!(", {} batch(es) skipped", analysis.batches_skipped)
                                        } else {
                                            String::new()
                                        }
                                    )}
                                </span>
                            </div>
                            <p class="whitespace-pre-wrap text-gray-700">{ &analysis.summary }</p>

                            {
                                if !analysis.raw_data.is_empty() {
                                    html! {
                                        <div>
                                            <button
                                                class="text-sm text-orange-600 hover:underline"
                                                onclick={on_toggle_raw.clone()}
                                            >
                                                { if *show_raw { "Hide raw extracted data" } else { "Show raw extracted data" } }
                                            </button>
                                            {
                                                if *show_raw {
                                                    html! {
                                                        <pre class="mt-2 p-3 bg-gray-50 rounded text-xs text-gray-600 whitespace-pre-wrap max-h-80 overflow-y-auto">
                                                            { &analysis.raw_data }
                                                        </pre>
                                                    }
                                                } else {
                                                    html! {}
                                                }
                                            }
                                        </div>
                                    }
                                } else {
                                    html! {}
                                }
                            }
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
