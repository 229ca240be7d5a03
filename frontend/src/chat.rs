use crate::api::send_chat;
use crate::env_config::USER_ID;
use crate::models::{ChatMessage, ChatRole};
use crate::utils::format_message_time;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const GREETING: &str = "Hi! I'm your YouTube AI assistant. Ask me anything about your YouTube \
                        content, video topics, or get recommendations!";
const APOLOGY: &str = "Sorry, I ran into a problem answering that. Please try again.";

fn message(id: usize, role: ChatRole, content: String) -> ChatMessage {
    ChatMessage {
        id,
        content,
        role,
        timestamp: chrono::Utc::now(),
    }
}

#[function_component(ChatPanel)]
pub fn chat_panel() -> Html {
    let messages = use_state(|| vec![message(0, ChatRole::Assistant, GREETING.to_string())]);
    let input = use_state(String::new);
    let loading = use_state(|| false);

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            input.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let on_submit = {
        let messages = messages.clone();
        let input = input.clone();
        let loading = loading.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            let text = (*input).trim().to_string();
            if text.is_empty() || *loading {
                return;
            }

            let mut history = (*messages).clone();
            let next_id = history.len();
            history.push(message(next_id, ChatRole::User, text.clone()));
            messages.set(history.clone());
            input.set(String::new());
            loading.set(true);

            let messages = messages.clone();
            let loading = loading.clone();
            wasm_bindgen_futures::spawn_local(async move {
                // A failed turn gets a canned apology instead of the
                // raw error.
                let reply = match send_chat(&USER_ID, &text).await {
                    Ok(response) => response.response,
                    Err(e) => {
                        log::error!("Chat request failed: {e}");
                        APOLOGY.to_string()
                    }
                };
                history.push(message(history.len(), ChatRole::Assistant, reply));
                messages.set(history);
                loading.set(false);
            });
        })
    };

    html! {
        <div class="flex flex-col h-[32rem] bg-white rounded-lg border border-orange-100">
            <div class="flex items-center gap-2 p-4 border-b border-orange-100">
                <h3 class="font-semibold text-gray-900">{"AI Chat Assistant"}</h3>
            </div>

            <div class="flex-1 overflow-y-auto p-4 space-y-4">
                { for messages.iter().map(|msg| {
                    let align = if msg.role == ChatRole::User { "justify-end" } else { "justify-start" };
                    let bubble = if msg.role == ChatRole::User {
                        "bg-orange-600 text-white rounded-lg p-3 max-w-[80%]"
                    } else {
                        "bg-orange-50 text-gray-900 rounded-lg p-3 max-w-[80%]"
                    };
                    html! {
                        <div key={msg.id} class={format!("flex {align}")}>
                            <div class={bubble}>
                                <p class="whitespace-pre-wrap">{ &msg.content }</p>
                                <p class="text-xs opacity-60 mt-1">{ format_message_time(&msg.timestamp) }</p>
                            </div>
                        </div>
                    }
                })}
                {
                    if *loading {
                        html! { <p class="text-sm text-gray-400">{"Thinking..."}</p> }
                    } else {
                        html! {}
                    }
                }
            </div>

            <form onsubmit={on_submit} class="flex gap-2 p-4 border-t border-orange-100">
                <input
                    type="text"
                    class="flex-grow p-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-orange-500"
                    placeholder="Ask about your YouTube library..."
                    value={(*input).clone()}
                    oninput={on_input}
                    disabled={*loading}
                />
                <button
                    type="submit"
                    class="bg-orange-600 text-white px-4 py-2 rounded-lg hover:bg-orange-700 disabled:opacity-50"
                    disabled={*loading}
                >
                    { if *loading { "Sending..." } else { "Send" } }
                </button>
            </form>
        </div>
    }
}
