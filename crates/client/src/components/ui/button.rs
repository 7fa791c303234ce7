use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
    Danger,
}

const BASE: &str = "inline-flex items-center justify-center rounded-lg px-4 py-2 text-sm font-semibold transition-all duration-200 focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-offset-[#1e1f22] disabled:opacity-50 disabled:pointer-events-none";

/// Classes for a plain `button` element styled like [`Button`].
pub fn button_class(variant: ButtonVariant) -> String {
    let variant_class = match variant {
        ButtonVariant::Primary => "bg-gradient-to-r from-indigo-500 to-purple-600 text-white hover:from-indigo-400 hover:to-purple-500 hover:shadow-lg hover:shadow-indigo-500/25 focus:ring-indigo-500",
        ButtonVariant::Secondary => "bg-[#4e5058] text-white hover:bg-[#6d6f78] focus:ring-gray-500",
        ButtonVariant::Ghost => "bg-transparent text-gray-300 hover:bg-[#3f4147] hover:text-white focus:ring-gray-500",
        ButtonVariant::Danger => "bg-red-600 text-white hover:bg-red-500 focus:ring-red-500",
    };
    format!("{BASE} {variant_class}")
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    #[props(optional)]
    pub r#type: Option<String>,
    #[props(optional)]
    pub disabled: Option<bool>,
    pub children: Element,
}

/// Styled button for forms; click handling is left to the surrounding
/// `form`'s submit.
#[component]
pub fn Button(props: ButtonProps) -> Element {
    let base = button_class(props.variant.unwrap_or_default());
    let class = match props.class {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base,
    };

    rsx! {
        button {
            class,
            r#type: props.r#type.unwrap_or_else(|| "button".to_string()),
            disabled: props.disabled.unwrap_or(false),
            {props.children}
        }
    }
}
