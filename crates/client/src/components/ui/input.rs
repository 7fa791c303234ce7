use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
}

impl InputType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

pub const FIELD_CLASS: &str = "w-full rounded-lg bg-[#1e1f22] text-gray-100 px-4 py-3 text-sm border border-[#3f4147] placeholder-gray-500 transition-all duration-200 focus:outline-none focus:ring-2 focus:ring-indigo-500/50 focus:border-indigo-500";

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub input_type: Option<InputType>,
    #[props(optional)]
    pub disabled: Option<bool>,
}

#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    rsx! {
        input {
            class: FIELD_CLASS,
            r#type: props.input_type.unwrap_or_default().as_str(),
            value: "{props.value}",
            placeholder: props.placeholder.unwrap_or_default(),
            disabled: props.disabled.unwrap_or(false),
            oninput: move |e| props.oninput.call(e),
        }
    }
}

/// Label above a form control.
#[component]
pub fn Field(label: String, children: Element) -> Element {
    rsx! {
        div {
            label { class: "block text-sm font-medium text-gray-300 mb-2", "{label}" }
            {children}
        }
    }
}

/// Inline error box; renders nothing without a message.
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            div { class: "p-3 bg-red-500/10 border border-red-500/30 rounded-lg text-red-400 text-sm",
                "{message}"
            }
        }
    }
}
