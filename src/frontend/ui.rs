use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
    Glass,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Primary => "btn-primary",
            Self::Secondary => "btn-secondary",
            Self::Ghost => "btn-ghost",
            Self::Glass => "btn-glass",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    fn class(self) -> &'static str {
        match self {
            Self::Sm => "btn-sm",
            Self::Md => "btn-md",
            Self::Lg => "btn-lg",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ButtonProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub variant: ButtonVariant,
    #[prop_or_default]
    pub size: Size,
    #[prop_or_default]
    pub full_width: bool,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub href: Option<AttrValue>,
    #[prop_or_default]
    pub external: bool,
    #[prop_or(AttrValue::Static("button"))]
    pub button_type: AttrValue,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Button)]
pub fn button(props: &ButtonProps) -> Html {
    let class = classes!(
        "btn",
        props.variant.class(),
        props.size.class(),
        props.full_width.then_some("btn-block"),
        props.loading.then_some("is-loading"),
        props.class.clone()
    );

    let content = html! {
        <>
            if props.loading {
                <span class="btn-spinner" aria-hidden="true"></span>
            }
            {props.children.clone()}
        </>
    };

    if let Some(href) = props.href.clone() {
        let (target, rel) = if props.external {
            (Some("_blank"), Some("noopener noreferrer"))
        } else {
            (None, None)
        };

        return html! {
            <a {class} {href} {target} {rel} onclick={props.onclick.clone()}>
                {content}
            </a>
        };
    }

    html! {
        <button
            {class}
            type={props.button_type.clone()}
            disabled={props.disabled || props.loading}
            aria-busy={props.loading.to_string()}
            onclick={props.onclick.clone()}
        >
            {content}
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct InputProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub oninput: Callback<String>,
}

fn error_id(id: &AttrValue) -> String {
    format!("{id}-error")
}

#[function_component(Input)]
pub fn input(props: &InputProps) -> Html {
    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            oninput.emit(input.value());
        })
    };

    html! {
        <div class={classes!("field", props.error.is_some().then_some("has-error"))}>
            <label class="field-label" for={props.id.clone()}>{props.label.clone()}</label>
            <input
                id={props.id.clone()}
                name={props.id.clone()}
                class="field-control"
                type={props.input_type.clone()}
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                aria-invalid={props.error.is_some().to_string()}
                aria-describedby={props.error.as_ref().map(|_| error_id(&props.id))}
                {oninput}
            />
            if let Some(error) = props.error.clone() {
                <p id={error_id(&props.id)} class="field-error" role="alert">{error}</p>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextareaProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or(5)]
    pub rows: u32,
    #[prop_or_default]
    pub placeholder: AttrValue,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub oninput: Callback<String>,
}

#[function_component(Textarea)]
pub fn textarea(props: &TextareaProps) -> Html {
    let oninput = {
        let oninput = props.oninput.clone();
        Callback::from(move |event: InputEvent| {
            let textarea: HtmlTextAreaElement = event.target_unchecked_into();
            oninput.emit(textarea.value());
        })
    };

    html! {
        <div class={classes!("field", props.error.is_some().then_some("has-error"))}>
            <label class="field-label" for={props.id.clone()}>{props.label.clone()}</label>
            <textarea
                id={props.id.clone()}
                name={props.id.clone()}
                class="field-control"
                rows={props.rows.to_string()}
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                aria-invalid={props.error.is_some().to_string()}
                aria-describedby={props.error.as_ref().map(|_| error_id(&props.id))}
                {oninput}
            />
            if let Some(error) = props.error.clone() {
                <p id={error_id(&props.id)} class="field-error" role="alert">{error}</p>
            }
        </div>
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CardVariant {
    #[default]
    Default,
    Glass,
    Bordered,
    Elevated,
}

impl CardVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Default => "card-default",
            Self::Glass => "card-glass",
            Self::Bordered => "card-bordered",
            Self::Elevated => "card-elevated",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct CardProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub variant: CardVariant,
    #[prop_or_default]
    pub interactive: bool,
    #[prop_or_default]
    pub no_padding: bool,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Card)]
pub fn card(props: &CardProps) -> Html {
    html! {
        <article
            class={classes!(
                "card",
                props.variant.class(),
                props.interactive.then_some("card-interactive"),
                (!props.no_padding).then_some("card-padded"),
                props.class.clone()
            )}
            data-interactive={props.interactive.then_some("true")}
        >
            {props.children.clone()}
        </article>
    }
}

#[derive(Properties, PartialEq)]
pub struct SlotProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(CardTitle)]
pub fn card_title(props: &SlotProps) -> Html {
    html! { <h3 class={classes!("card-title", props.class.clone())}>{props.children.clone()}</h3> }
}

#[function_component(CardDescription)]
pub fn card_description(props: &SlotProps) -> Html {
    html! { <p class={classes!("card-description", props.class.clone())}>{props.children.clone()}</p> }
}

#[function_component(CardFooter)]
pub fn card_footer(props: &SlotProps) -> Html {
    html! { <div class={classes!("card-footer", props.class.clone())}>{props.children.clone()}</div> }
}

#[function_component(Container)]
pub fn container(props: &SlotProps) -> Html {
    html! { <div class={classes!("container", props.class.clone())}>{props.children.clone()}</div> }
}
