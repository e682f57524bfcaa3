use gloo_net::http::Request;
use js_sys::encode_uri_component;
use serde::de::DeserializeOwned;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::contact::ContactFormView;
use super::motion::{Particles, ScrollReveal, TypewriterText};
use super::set_document_title;
use super::ui::{
    Button, ButtonVariant, Card, CardDescription, CardFooter, CardTitle, CardVariant, Container,
    Size,
};
use crate::content::{format_date, truncate, Post, Project};
use crate::route::Route;
use crate::site::{
    FEATURED_PROJECT_COUNT, HERO_PHRASES, REVEAL_STAGGER_MS, SITE_NAME, SITE_TAGLINE,
    SKILL_GROUPS, SOCIAL_LINKS, TYPE_INTERVAL_MS, TYPE_PAUSE_MS,
};

const POSTS_ENDPOINT: &str = "/api/posts";
const PROJECTS_ENDPOINT: &str = "/api/projects";
const DESCRIPTION_PREVIEW_CHARS: usize = 160;

#[derive(Clone)]
enum Load<T> {
    Loading,
    Ready(T),
    Missing,
    Failed,
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Load<T> {
    let response = match Request::get(url).send().await {
        Ok(response) => response,
        Err(error) => {
            log::warn!("request to {url} failed: {error}");
            return Load::Failed;
        }
    };

    if response.status() == 404 {
        return Load::Missing;
    }

    if !response.ok() {
        log::warn!("request to {url} returned status {}", response.status());
        return Load::Failed;
    }

    match response.json::<T>().await {
        Ok(payload) => Load::Ready(payload),
        Err(error) => {
            log::warn!("response from {url} could not be decoded: {error}");
            Load::Failed
        }
    }
}

#[hook]
fn use_fetch<T>(url: String) -> Load<T>
where
    T: DeserializeOwned + Clone + 'static,
{
    let state = use_state(|| Load::Loading);

    {
        let state = state.clone();
        use_effect_with(url, move |url| {
            let url = url.clone();
            spawn_local(async move {
                state.set(fetch_json(&url).await);
            });
            || ()
        });
    }

    (*state).clone()
}

#[derive(Properties, PartialEq)]
struct SkeletonProps {
    #[prop_or(3)]
    rows: usize,
}

#[function_component(LoadingSkeleton)]
fn loading_skeleton(props: &SkeletonProps) -> Html {
    html! {
        <div class="skeleton-list" aria-busy="true" aria-label="Loading">
            { for (0..props.rows).map(|_| html! {
                <div class="skeleton-item">
                    <div class="skeleton-line skeleton-title"></div>
                    <div class="skeleton-line skeleton-meta"></div>
                    <div class="skeleton-line"></div>
                    <div class="skeleton-line skeleton-short"></div>
                </div>
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
    #[prop_or_default]
    index: usize,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;
    let tags = project.stack_tags();

    html! {
        <ScrollReveal delay_ms={props.index as u32 * REVEAL_STAGGER_MS} class="project-card-reveal">
            <Card variant={CardVariant::Glass} interactive=true class="project-card">
                <CardTitle>{project.name.clone()}</CardTitle>
                <CardDescription>
                    {truncate(&project.description, DESCRIPTION_PREVIEW_CHARS)}
                </CardDescription>
                if !tags.is_empty() {
                    <ul class="tag-list">
                        { for tags.into_iter().map(|tag| html! { <li class="tag">{tag}</li> }) }
                    </ul>
                }
                <CardFooter>
                    <time class="muted">{format_date(&project.created_at)}</time>
                    <div class="card-actions">
                        if let Some(github) = project.github_url.clone() {
                            <Button
                                href={github}
                                external=true
                                variant={ButtonVariant::Glass}
                                size={Size::Sm}
                            >
                                {"View Code"}
                            </Button>
                        }
                        if let Some(link) = project.link.clone() {
                            <Button href={link} external=true size={Size::Sm}>
                                {"Live Demo"}
                            </Button>
                        }
                    </div>
                </CardFooter>
            </Card>
        </ScrollReveal>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectGridProps {
    #[prop_or_default]
    limit: Option<usize>,
}

#[function_component(ProjectGrid)]
fn project_grid(props: &ProjectGridProps) -> Html {
    let projects = use_fetch::<Vec<Project>>(PROJECTS_ENDPOINT.to_string());

    match projects {
        Load::Loading => html! { <LoadingSkeleton /> },
        Load::Ready(projects) if !projects.is_empty() => {
            let limit = props.limit.unwrap_or(projects.len());
            html! {
                <div class="project-grid">
                    { for projects.into_iter().take(limit).enumerate().map(|(index, project)| html! {
                        <ProjectCard key={project.id} {project} {index} />
                    }) }
                </div>
            }
        }
        _ => html! {
            <p class="empty-state">{"No projects yet. Check back soon!"}</p>
        },
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let phrases: Vec<AttrValue> = HERO_PHRASES.iter().map(|phrase| AttrValue::from(*phrase)).collect();

    html! {
        <>
            <section id="home" class="hero">
                <Particles />
                <div class="hero-glow" aria-hidden="true"></div>
                <Container class="hero-content">
                    <ScrollReveal>
                        <h1 class="hero-title">{"Hi, I'm "}{SITE_NAME}</h1>
                    </ScrollReveal>
                    <ScrollReveal delay_ms={200}>
                        <p class="hero-role">
                            {"I'm a "}
                            <TypewriterText
                                {phrases}
                                type_interval_ms={TYPE_INTERVAL_MS}
                                pause_ms={TYPE_PAUSE_MS}
                                class="accent"
                            />
                        </p>
                    </ScrollReveal>
                    <ScrollReveal delay_ms={400}>
                        <div class="hero-actions">
                            <Button href="/#about" size={Size::Lg}>{"Learn More"}</Button>
                            <Button href="/#contact" variant={ButtonVariant::Glass} size={Size::Lg}>
                                {"Get in Touch"}
                            </Button>
                        </div>
                    </ScrollReveal>
                </Container>
            </section>

            <section id="about" class="section">
                <Container>
                    <ScrollReveal>
                        <h2 class="section-title">{"About Me"}</h2>
                    </ScrollReveal>
                    <div class="about-grid">
                        <ScrollReveal delay_ms={200}>
                            <Card variant={CardVariant::Glass}>
                                <p>{SITE_TAGLINE}</p>
                                <p class="muted">
                                    {"When I'm not coding, you can find me exploring new technologies, contributing to open-source projects, or writing about my experiences."}
                                </p>
                            </Card>
                        </ScrollReveal>
                        <div class="skill-list">
                            { for SKILL_GROUPS.iter().enumerate().map(|(index, group)| html! {
                                <ScrollReveal delay_ms={200 + index as u32 * REVEAL_STAGGER_MS}>
                                    <Card variant={CardVariant::Bordered} interactive=true class="skill-card">
                                        <CardTitle>{group.title}</CardTitle>
                                        <CardDescription>{group.items}</CardDescription>
                                    </Card>
                                </ScrollReveal>
                            }) }
                        </div>
                    </div>
                </Container>
            </section>

            <section id="projects" class="section">
                <Container>
                    <ScrollReveal>
                        <h2 class="section-title">{"Featured Projects"}</h2>
                    </ScrollReveal>
                    <ProjectGrid limit={FEATURED_PROJECT_COUNT} />
                    <div class="section-actions">
                        <Button href={Route::Projects.path()} variant={ButtonVariant::Secondary}>
                            {"All Projects"}
                        </Button>
                    </div>
                </Container>
            </section>

            <section id="contact" class="section">
                <Container class="contact-layout">
                    <ScrollReveal>
                        <h2 class="section-title">{"Get in Touch"}</h2>
                        <p class="section-lead">
                            {"Have a project in mind or just want to chat? Send me a message."}
                        </p>
                    </ScrollReveal>
                    <ScrollReveal delay_ms={200}>
                        <Card variant={CardVariant::Glass}>
                            <ContactFormView />
                        </Card>
                    </ScrollReveal>
                    <ScrollReveal delay_ms={400}>
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
                    </ScrollReveal>
                </Container>
            </section>
        </>
    }
}

#[function_component(Posts)]
pub fn posts() -> Html {
    let posts = use_fetch::<Vec<Post>>(POSTS_ENDPOINT.to_string());

    let body = match posts {
        Load::Loading => html! { <LoadingSkeleton /> },
        Load::Ready(posts) if !posts.is_empty() => html! {
            <div class="post-list">
                { for posts.into_iter().map(|post| html! {
                    <article key={post.id} class="post-summary">
                        <a href={Route::Post(post.slug.clone()).path()} class="post-link">
                            <h2 class="post-title">{post.title.clone()}</h2>
                            <time class="muted">{format_date(&post.created_at)}</time>
                            <p class="post-excerpt">{post.excerpt.clone()}</p>
                            <span class="read-more">{"Read more →"}</span>
                        </a>
                    </article>
                }) }
            </div>
        },
        _ => html! {
            <p class="empty-state">{"No posts yet. Check back soon!"}</p>
        },
    };

    html! {
        <Container class="page">
            <header class="page-header">
                <h1>{"Blog Posts"}</h1>
                <p class="muted">{"Thoughts, ideas, and tutorials about software development"}</p>
            </header>
            {body}
        </Container>
    }
}

#[derive(Properties, PartialEq)]
pub struct PostProps {
    pub slug: AttrValue,
}

#[function_component(PostPage)]
pub fn post_page(props: &PostProps) -> Html {
    let encoded = encode_uri_component(&props.slug)
        .as_string()
        .unwrap_or_else(|| props.slug.to_string());
    let post = use_fetch::<Post>(format!("{POSTS_ENDPOINT}/{encoded}"));

    {
        let title = match &post {
            Load::Ready(post) => Some(post.title.clone()),
            Load::Missing => Some(Route::NotFound.title()),
            _ => None,
        };
        use_effect_with(title, |title| {
            if let Some(title) = title {
                set_document_title(title);
            }
            || ()
        });
    }

    match post {
        Load::Loading => html! {
            <Container class="page"><LoadingSkeleton rows={1} /></Container>
        },
        Load::Missing => html! { <NotFound /> },
        Load::Failed => html! {
            <Container class="page">
                <p class="empty-state">{"This post could not be loaded right now."}</p>
                <a href={Route::Posts.path()} class="back-link">{"← Back to posts"}</a>
            </Container>
        },
        Load::Ready(post) => html! {
            <Container class="page">
                <article class="post">
                    <a href={Route::Posts.path()} class="back-link">{"← Back to posts"}</a>
                    <header class="post-header">
                        <time class="muted">{format_date(&post.created_at)}</time>
                        <h1 class="post-title">{post.title.clone()}</h1>
                        if !post.excerpt.is_empty() {
                            <p class="post-excerpt">{post.excerpt.clone()}</p>
                        }
                    </header>
                    <div class="prose">
                        {Html::from_html_unchecked(AttrValue::from(post.content.clone()))}
                    </div>
                </article>
            </Container>
        },
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    html! {
        <Container class="page">
            <header class="page-header">
                <h1>{"Projects"}</h1>
                <p class="muted">{"A collection of things I've built and shipped"}</p>
            </header>
            <ProjectGrid />
        </Container>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <Container class="page not-found">
            <h1 class="not-found-code">{"404"}</h1>
            <h2>{"Page Not Found"}</h2>
            <p class="muted">{"Sorry, the page you're looking for doesn't exist."}</p>
            <Button href={Route::Home.path()}>{"Go Home"}</Button>
        </Container>
    }
}
