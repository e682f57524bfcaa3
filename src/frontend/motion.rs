use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::{cell::RefCell, f64::consts::TAU, rc::Rc};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, CanvasRenderingContext2d, Element, Event, HtmlCanvasElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, ScrollBehavior,
    ScrollToOptions,
};
use yew::prelude::*;

use super::{matches_media, prefers_reduced_motion, viewport_size, THEME_CHANGE_EVENT};
use crate::motion::{
    cursor::{PointerState, INTERACTIVE_SELECTOR},
    frame::{FrameLoop, FrameScheduler},
    particles::{fill_colour, ParticleField, Surface, DEFAULT_PARTICLE_COUNT},
    reveal::{RevealAction, RevealOptions, RevealState},
    scroll::{SectionBounds, ScrollState},
    typewriter::{Typewriter, DEFAULT_PAUSE_MS, DEFAULT_TYPE_INTERVAL_MS},
};

#[derive(Properties, PartialEq)]
pub struct TypewriterTextProps {
    pub phrases: Vec<AttrValue>,
    #[prop_or(DEFAULT_TYPE_INTERVAL_MS)]
    pub type_interval_ms: u32,
    #[prop_or(DEFAULT_PAUSE_MS)]
    pub pause_ms: u32,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(TypewriterText)]
pub fn typewriter_text(props: &TypewriterTextProps) -> Html {
    let cycle = use_state(|| {
        let phrases = props.phrases.iter().map(ToString::to_string).collect();
        Typewriter::new(phrases, props.type_interval_ms, props.pause_ms).map(|tw| (0_u64, tw))
    });

    {
        let handle = cycle.clone();
        use_effect_with((*cycle).clone(), move |current| {
            let timeout = current.clone().map(|(step, typewriter)| {
                Timeout::new(typewriter.delay_ms(), move || {
                    let mut next = typewriter;
                    next.tick();
                    handle.set(Some((step.wrapping_add(1), next)));
                })
            });
            move || drop(timeout)
        });
    }

    let Some((_, typewriter)) = cycle.as_ref() else {
        return Html::default();
    };

    html! {
        <span class={classes!("typewriter", props.class.clone())}>
            <span class="typewriter-text">{typewriter.text().to_string()}</span>
            <span class="typewriter-caret" aria-hidden="true">{"|"}</span>
        </span>
    }
}

struct RevealObserver {
    observer: Rc<RefCell<Option<IntersectionObserver>>>,
    pending: Rc<RefCell<Option<Timeout>>>,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl RevealObserver {
    fn observe(
        target: &Element,
        options: &RevealOptions,
        state: Rc<RefCell<RevealState>>,
        active: UseStateHandle<bool>,
    ) -> Option<Self> {
        let observer_slot: Rc<RefCell<Option<IntersectionObserver>>> = Rc::new(RefCell::new(None));
        let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let callback = {
            let observer_slot = observer_slot.clone();
            let pending = pending.clone();
            Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };

                        let action = state.borrow_mut().observe(entry.is_intersecting());
                        match action {
                            RevealAction::Schedule { delay_ms } => {
                                let state = state.clone();
                                let active = active.clone();
                                let observer_slot = observer_slot.clone();
                                let timeout = Timeout::new(delay_ms, move || {
                                    let mut state = state.borrow_mut();
                                    if !state.activate() {
                                        return;
                                    }
                                    active.set(true);
                                    if state.is_frozen() {
                                        if let Some(observer) = observer_slot.borrow_mut().take() {
                                            observer.disconnect();
                                        }
                                    }
                                });
                                *pending.borrow_mut() = Some(timeout);
                            }
                            RevealAction::Conceal => active.set(false),
                            RevealAction::None => {}
                        }
                    }
                },
            )
        };

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;
        observer.observe(target);
        *observer_slot.borrow_mut() = Some(observer);

        Some(Self {
            observer: observer_slot,
            pending,
            _callback: callback,
        })
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
        self.pending.borrow_mut().take();
    }
}

fn intersection_observer_supported() -> bool {
    window()
        .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
        .unwrap_or(false)
}

#[hook]
pub fn use_reveal(options: RevealOptions) -> (NodeRef, bool) {
    let node = use_node_ref();
    let state = use_mut_ref(|| RevealState::new(&options));
    let active = use_state(|| false);

    {
        let node = node.clone();
        let active = active.clone();
        use_effect_with(options, move |options| {
            state.borrow_mut().reset(options);
            if *active {
                active.set(false);
            }
            let observer = if intersection_observer_supported() {
                node.cast::<Element>().and_then(|target| {
                    RevealObserver::observe(&target, options, state.clone(), active.clone())
                })
            } else {
                *state.borrow_mut() = RevealState::revealed(options);
                active.set(true);
                None
            };

            move || drop(observer)
        });
    }

    (node, *active)
}

#[derive(Properties, PartialEq)]
pub struct ScrollRevealProps {
    #[prop_or_default]
    pub children: Html,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or(true)]
    pub once: bool,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(ScrollReveal)]
pub fn scroll_reveal(props: &ScrollRevealProps) -> Html {
    let (node, active) = use_reveal(RevealOptions {
        delay_ms: props.delay_ms,
        freeze_once_visible: props.once,
        ..RevealOptions::default()
    });

    html! {
        <div ref={node} class={classes!("reveal", active.then_some("active"), props.class.clone())}>
            {props.children.clone()}
        </div>
    }
}

pub enum PointerEvent {
    Moved { x: f64, y: f64 },
    Hovered(bool),
}

impl Reducible for PointerState {
    type Action = PointerEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            PointerEvent::Moved { x, y } => self.moved(x, y),
            PointerEvent::Hovered(hovering) => self.hovered(hovering),
        };

        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

fn custom_cursor_allowed() -> bool {
    !prefers_reduced_motion() && !matches_media("(pointer: coarse)")
}

#[function_component(CustomCursor)]
pub fn custom_cursor() -> Html {
    let pointer = use_reducer(PointerState::default);
    let enabled = use_state(|| false);

    {
        let pointer = pointer.clone();
        let enabled = enabled.clone();
        use_effect_with((), move |_| {
            let listeners = match window() {
                Some(win) if custom_cursor_allowed() => {
                    enabled.set(true);

                    let on_move = {
                        let pointer = pointer.clone();
                        EventListener::new(&win, "mousemove", move |event: &Event| {
                            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                                pointer.dispatch(PointerEvent::Moved {
                                    x: f64::from(event.client_x()),
                                    y: f64::from(event.client_y()),
                                });
                            }
                        })
                    };

                    let on_over = EventListener::new(&win, "mouseover", move |event: &Event| {
                        let hovering = event
                            .target()
                            .and_then(|target| target.dyn_into::<Element>().ok())
                            .and_then(|element| element.closest(INTERACTIVE_SELECTOR).ok().flatten())
                            .is_some();
                        pointer.dispatch(PointerEvent::Hovered(hovering));
                    });

                    vec![on_move, on_over]
                }
                _ => Vec::new(),
            };

            move || drop(listeners)
        });
    }

    if !*enabled || !pointer.visible {
        return Html::default();
    }

    let ring = pointer.ring();
    let dot = pointer.dot();

    html! {
        <div class="custom-cursor" aria-hidden="true">
            <div class="cursor-ring" style={ring.position_style()}>
                <div class="cursor-ring-body" style={ring.body_style()}></div>
            </div>
            <div class="cursor-dot" style={dot.position_style()}>
                <div class="cursor-dot-body" style={dot.body_style()}></div>
            </div>
        </div>
    }
}

struct BrowserFrames;

impl FrameScheduler for BrowserFrames {
    type Handle = AnimationFrame;

    fn request(&self, callback: Box<dyn FnOnce(f64)>) -> AnimationFrame {
        request_animation_frame(callback)
    }
}

fn computed_fill(canvas: &HtmlCanvasElement) -> String {
    let style = window().and_then(|w| w.get_computed_style(canvas).ok().flatten());
    let Some(style) = style else {
        return fill_colour("", "");
    };

    fill_colour(
        &style
            .get_property_value("--color-accent-primary")
            .unwrap_or_default(),
        &style.get_property_value("color").unwrap_or_default(),
    )
}

struct CanvasSurface {
    context: CanvasRenderingContext2d,
    fill: Rc<RefCell<String>>,
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_fill_style_str(&self.fill.borrow());
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, opacity: f64) {
        self.context.set_global_alpha(opacity);
        self.context.begin_path();
        if self.context.arc(x, y, radius, 0.0, TAU).is_ok() {
            self.context.fill();
        }
        self.context.set_global_alpha(1.0);
    }
}

struct ParticleBackground {
    _frames: FrameLoop<BrowserFrames>,
    _resize: EventListener,
    _theme: EventListener,
}

impl ParticleBackground {
    fn mount(canvas: HtmlCanvasElement, count: usize) -> Option<Self> {
        let win = window()?;
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let (width, height) = viewport_size();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let mut rng = Pcg32::seed_from_u64(js_sys::Date::now() as u64);
        let field = Rc::new(RefCell::new(ParticleField::new(width, height, count, &mut rng)));
        let fill = Rc::new(RefCell::new(computed_fill(&canvas)));

        let resize = {
            let canvas = canvas.clone();
            let field = field.clone();
            let fill = fill.clone();
            EventListener::new(&win, "resize", move |_event| {
                let (width, height) = viewport_size();
                canvas.set_width(width as u32);
                canvas.set_height(height as u32);
                field.borrow_mut().resize(width, height);
                *fill.borrow_mut() = computed_fill(&canvas);
            })
        };

        let theme = {
            let fill = fill.clone();
            EventListener::new(&win, THEME_CHANGE_EVENT, move |_event| {
                *fill.borrow_mut() = computed_fill(&canvas);
            })
        };

        let mut surface = CanvasSurface { context, fill };
        let frames = FrameLoop::start(BrowserFrames, move |_timestamp| {
            field.borrow_mut().frame(&mut surface);
        });

        Some(Self {
            _frames: frames,
            _resize: resize,
            _theme: theme,
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct ParticlesProps {
    #[prop_or(DEFAULT_PARTICLE_COUNT)]
    pub count: usize,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Particles)]
pub fn particles(props: &ParticlesProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.count, move |count| {
            let background = canvas_ref
                .cast::<HtmlCanvasElement>()
                .and_then(|canvas| ParticleBackground::mount(canvas, *count));
            if background.is_none() {
                log::debug!("particle canvas unavailable");
            }
            move || drop(background)
        });
    }

    html! {
        <canvas
            ref={canvas_ref}
            class={classes!("particles", props.class.clone())}
            aria-hidden="true"
        />
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollSnapshot {
    pub past_threshold: bool,
    pub active_section: Option<String>,
}

fn section_bounds(ids: &'static [&'static str]) -> Vec<SectionBounds<'static>> {
    let Some(document) = window().and_then(|w| w.document()) else {
        return Vec::new();
    };

    ids.iter()
        .filter_map(|&id| {
            let rect = document.get_element_by_id(id)?.get_bounding_client_rect();
            Some(SectionBounds {
                id,
                top: rect.top(),
                bottom: rect.bottom(),
            })
        })
        .collect()
}

#[hook]
pub fn use_scroll_state(sections: &'static [&'static str]) -> ScrollSnapshot {
    let tracker = use_mut_ref(ScrollState::default);
    let snapshot = use_state(ScrollSnapshot::default);

    {
        let snapshot = snapshot.clone();
        use_effect_with(sections, move |sections| {
            let sections = *sections;
            let update = move || {
                let offset = window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                let mut tracker = tracker.borrow_mut();
                let change = tracker.update(offset, &section_bounds(sections));
                if change.any() {
                    snapshot.set(ScrollSnapshot {
                        past_threshold: tracker.past_threshold(),
                        active_section: tracker.active().id().map(ToString::to_string),
                    });
                }
            };

            update();
            let listener = window().map(|win| {
                EventListener::new_with_options(
                    &win,
                    "scroll",
                    EventListenerOptions {
                        phase: EventListenerPhase::Bubble,
                        passive: true,
                    },
                    move |_event| update(),
                )
            });

            move || drop(listener)
        });
    }

    (*snapshot).clone()
}

#[derive(Properties, PartialEq)]
pub struct BackToTopProps {
    pub visible: bool,
}

#[function_component(BackToTop)]
pub fn back_to_top(props: &BackToTopProps) -> Html {
    let onclick = Callback::from(|_: MouseEvent| {
        if let Some(win) = window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        }
    });

    html! {
        <button
            type="button"
            class={classes!("back-to-top", props.visible.then_some("is-visible"))}
            aria-label="Back to top"
            aria-hidden={(!props.visible).to_string()}
            tabindex={if props.visible { "0" } else { "-1" }}
            {onclick}
        >
            <span aria-hidden="true">{"↑"}</span>
        </button>
    }
}
