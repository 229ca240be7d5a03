use crate::analysis::AnalysisPanel;
use crate::chat::ChatPanel;
use crate::env_config::{get_app_name, USER_ID};
use crate::library::LibraryPanel;
use yew::prelude::*;

/// The selected panel is explicit view state, not a DOM lookup.
#[derive(Clone, Copy, PartialEq)]
pub enum Tab {
    Chat,
    Library,
    Analysis,
}

impl Tab {
    fn label(&self) -> &'static str {
        match self {
            Tab::Chat => "AI Chat",
            Tab::Library => "Video Library",
            Tab::Analysis => "Theory Search",
        }
    }
}

const TABS: [Tab; 3] = [Tab::Chat, Tab::Library, Tab::Analysis];

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let active_tab = use_state(|| Tab::Library);

    let tab_buttons = TABS.iter().map(|tab| {
        let is_active = *active_tab == *tab;
        let onclick = {
            let active_tab = active_tab.clone();
            let tab = *tab;
            Callback::from(move |_| active_tab.set(tab))
        };
        let classes = if is_active {
            "px-4 py-2 text-sm font-semibold bg-orange-600 text-white rounded-t-lg"
        } else {
            "px-4 py-2 text-sm font-semibold text-gray-600 hover:text-orange-600 rounded-t-lg"
        };
        html! {
            <button class={classes} {onclick}>{ tab.label() }</button>
        }
    });

    html! {
        <div class="min-h-screen bg-gradient-to-br from-orange-50 to-orange-100">
            <header class="bg-white border-b border-orange-100 px-6 py-4 flex justify-between items-center">
                <h1 class="text-xl font-bold text-gray-900">{ get_app_name() }</h1>
                <span class="text-sm text-gray-500">{ format!("Signed in as {}", &*USER_ID) }</span>
            </header>

            <main class="max-w-5xl mx-auto px-6 py-8">
                <div class="flex gap-2 border-b border-orange-200 mb-6">
                    { for tab_buttons }
                </div>

                {
                    match *active_tab {
                        Tab::Chat => html! { <ChatPanel /> },
                        Tab::Library => html! { <LibraryPanel /> },
                        Tab::Analysis => html! { <AnalysisPanel /> },
                    }
                }
            </main>
        </div>
    }
}
