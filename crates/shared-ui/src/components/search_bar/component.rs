use dioxus::prelude::*;

/// Search/filter bar: a search box followed by filter controls.
#[component]
pub fn SearchBar(
    value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
    children: Element,
) -> Element {
    rsx! {
        div { class: "search-bar",
            input {
                class: "input search-input",
                r#type: "search",
                value: value,
                placeholder: placeholder,
                oninput: move |evt: FormEvent| on_search.call(evt.value()),
            }
            {children}
        }
    }
}
