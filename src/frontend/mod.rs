mod contact;
mod motion;
mod pages;
mod ui;

use js_sys::{Date, Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Event, Storage};
use yew::prelude::*;

use crate::route::Route;
use crate::site::{nav_link_is_active, HOME_SECTIONS, NAV_LINKS, SITE_NAME, SITE_TAGLINE, SOCIAL_LINKS};
use motion::{use_scroll_state, BackToTop, CustomCursor};
use pages::{Home, NotFound, PostPage, Posts, Projects};

const THEME_KEY: &str = "folio-theme";
pub(crate) const THEME_CHANGE_EVENT: &str = "folio-themechange";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn read_stored_theme() -> Option<Theme> {
    let value = local_storage()?.get_item(THEME_KEY).ok().flatten()?;
    Theme::from_str(&value)
}

pub(crate) fn matches_media(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub(crate) fn prefers_reduced_motion() -> bool {
    matches_media("(prefers-reduced-motion: reduce)")
}

pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub(crate) fn set_document_title(title: &str) {
    if let Some(document) = window().and_then(|w| w.document()) {
        document.set_title(&format!("{title} | {SITE_NAME}"));
    }
}

fn resolve_theme() -> Theme {
    read_stored_theme().unwrap_or_else(|| {
        if matches_media("(prefers-color-scheme: dark)") {
            Theme::Dark
        } else {
            Theme::Light
        }
    })
}

fn apply_theme(theme: Theme) {
    let Some(win) = window() else {
        return;
    };
    if let Some(root) = win.document().and_then(|d| d.document_element()) {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
    if let Ok(event) = Event::new(THEME_CHANGE_EVENT) {
        let _ = win.dispatch_event(&event);
    }
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }
}

fn current_route() -> Route {
    window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::NotFound)
}

#[derive(Properties, PartialEq)]
struct ThemeToggleProps {
    theme: Theme,
    on_toggle: Callback<()>,
}

#[function_component(ThemeToggle)]
fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let onclick = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_| on_toggle.emit(()))
    };

    html! {
        <button
            class="theme-toggle"
            type="button"
            aria-label={props.theme.toggle_label()}
            aria-pressed={(props.theme == Theme::Dark).to_string()}
            {onclick}
        >
            <span aria-hidden="true">{props.theme.icon()}</span>
        </button>
    }
}

#[derive(Properties, PartialEq)]
struct NavigationProps {
    route: Route,
    active_section: Option<String>,
    theme: Theme,
    on_toggle_theme: Callback<()>,
}

#[function_component(Navigation)]
fn navigation(props: &NavigationProps) -> Html {
    let menu_open = use_state(|| false);
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_| menu_open.set(!*menu_open))
    };

    html! {
        <header class="site-nav">
            <nav class="nav-inner" aria-label="Main">
                <a href={Route::Home.path()} class="nav-brand">{SITE_NAME}</a>
                <button
                    type="button"
                    class="nav-menu-toggle"
                    aria-label="Toggle menu"
                    aria-expanded={menu_open.to_string()}
                    onclick={toggle_menu}
                >
                    <span aria-hidden="true">{if *menu_open { "✕" } else { "☰" }}</span>
                </button>
                <ul class={classes!("nav-links", menu_open.then_some("is-open"))}>
                    { for NAV_LINKS.iter().map(|link| {
                        let active = nav_link_is_active(link, &props.route, props.active_section.as_deref());
                        html! {
                            <li>
                                <a
                                    href={link.href}
                                    class={classes!("nav-link", active.then_some("is-active"))}
                                    aria-current={active.then_some("page")}
                                >
                                    {link.label}
                                </a>
                            </li>
                        }
                    }) }
                </ul>
                <ThemeToggle theme={props.theme} on_toggle={props.on_toggle_theme.clone()} />
            </nav>
        </header>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let year = Date::new_0().get_full_year();

    html! {
        <footer class="site-footer">
            <div class="container footer-inner">
                <div>
                    <p class="footer-name">{SITE_NAME}</p>
                    <p class="muted">{SITE_TAGLINE}</p>
                </div>
                <ul class="social-list">
                    { for SOCIAL_LINKS.iter().map(|link| html! {
                        <li>
                            <a
                                href={link.url}
                                target="_blank"
                                rel="noopener noreferrer"
                                aria-label={link.aria_label}
                            >
                                {link.name}
                            </a>
                        </li>
                    }) }
                </ul>
                <p class="muted footer-copy">{format!("© {year} {SITE_NAME}. All rights reserved.")}</p>
            </div>
        </footer>
    }
}

#[function_component(App)]
fn app() -> Html {
    let theme = use_state(resolve_theme);
    let route = use_memo((), |_| current_route());
    let scroll = use_scroll_state(&HOME_SECTIONS);

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    {
        let route = (*route).clone();
        use_effect_with(route, |route| {
            if !matches!(route, Route::Post(_)) {
                set_document_title(&route.title());
            }
            || ()
        });
    }

    let on_toggle = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = (*theme).toggled();
            persist_theme(next);
            apply_theme_with_transition(next);
            theme.set(next);
        })
    };

    let page = match &*route {
        Route::Home => html! { <Home /> },
        Route::Posts => html! { <Posts /> },
        Route::Post(slug) => html! { <PostPage slug={slug.clone()} /> },
        Route::Projects => html! { <Projects /> },
        Route::NotFound => html! { <NotFound /> },
    };

    html! {
        <>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <CustomCursor />
            <Navigation
                route={(*route).clone()}
                active_section={scroll.active_section.clone()}
                theme={*theme}
                on_toggle_theme={on_toggle}
            />
            <main id="content">{page}</main>
            <Footer />
            <BackToTop visible={scroll.past_threshold} />
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        log::error!("missing #app mount point");
        return;
    };

    yew::Renderer::<App>::with_root(root).render();
}
