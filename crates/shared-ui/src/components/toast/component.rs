use dioxus::prelude::*;

/// Maximum toasts kept on screen; older ones are dropped first.
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Error,
    Info,
}

impl ToastType {
    fn class(&self) -> &'static str {
        match self {
            ToastType::Success => "success",
            ToastType::Error => "error",
            ToastType::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub kind: ToastType,
    pub text: String,
}

/// Handle for raising toasts, shared through context.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    items: Signal<Vec<ToastMessage>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn show(&mut self, kind: ToastType, text: impl Into<String>) {
        let id = *self.next_id.peek();
        self.next_id.set(id + 1);
        push_capped(&mut self.items.write(), ToastMessage { id, kind, text: text.into() });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(ToastType::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(ToastType::Error, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.show(ToastType::Info, text);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.write().retain(|t| t.id != id);
    }

    pub fn messages(&self) -> Vec<ToastMessage> {
        self.items.read().clone()
    }
}

/// Append a toast, dropping the oldest beyond [`MAX_TOASTS`].
fn push_capped(items: &mut Vec<ToastMessage>, message: ToastMessage) {
    items.push(message);
    let overflow = items.len().saturating_sub(MAX_TOASTS);
    items.drain(..overflow);
}

/// Provides [`Toasts`] to descendants and renders the toast stack.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        items: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    });

    rsx! {
        {children}
        div { class: "toast-stack",
            for message in toasts.messages() {
                ToastItem { key: "{message.id}", message: message.clone() }
            }
        }
    }
}

#[component]
fn ToastItem(message: ToastMessage) -> Element {
    let mut toasts = use_toast();
    let id = message.id;
    rsx! {
        div { class: "toast", "data-type": message.kind.class(), role: "status",
            span { class: "toast-text", "{message.text}" }
            button {
                class: "toast-close",
                r#type: "button",
                "aria-label": "Dismiss",
                onclick: move |_| toasts.dismiss(id),
                "\u{00D7}"
            }
        }
    }
}

/// Hook to raise toasts from any component under [`ToastProvider`].
pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}
