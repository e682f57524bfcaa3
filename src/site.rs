//! Site identity, navigation and animation tunables.

use crate::route::Route;

pub const SITE_NAME: &str = "Egor Dultsev";
pub const SITE_DESCRIPTION: &str = "Full-stack Developer & UI/UX Designer";
pub const SITE_TAGLINE: &str =
    "Building elegant digital experiences with modern technologies and thoughtful design.";
pub const AUTHOR_EMAIL: &str = "hello@example.com";
pub const DEFAULT_SITE_URL: &str = "http://localhost:8080";

pub const HERO_PHRASES: [&str; 4] = [
    "Full-stack Developer",
    "UI/UX Designer",
    "Problem Solver",
    "Creative Thinker",
];
pub const TYPE_INTERVAL_MS: u32 = 100;
pub const TYPE_PAUSE_MS: u32 = 2_000;

/// Home page sections tracked by the scroll watcher, top to bottom.
pub const HOME_SECTIONS: [&str; 4] = ["home", "about", "projects", "contact"];
pub const FEATURED_PROJECT_COUNT: usize = 3;
/// Staggered reveal step between consecutive cards.
pub const REVEAL_STAGGER_MS: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    /// Home page section that lights this entry up while scrolled into view.
    pub section: Option<&'static str>,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        label: "Home",
        href: "/",
        section: Some("home"),
    },
    NavLink {
        label: "Posts",
        href: "/posts",
        section: None,
    },
    NavLink {
        label: "Projects",
        href: "/projects",
        section: Some("projects"),
    },
    NavLink {
        label: "Contact",
        href: "/#contact",
        section: Some("contact"),
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub name: &'static str,
    pub url: &'static str,
    pub aria_label: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        name: "GitHub",
        url: "https://github.com/yourusername",
        aria_label: "Visit my GitHub profile",
    },
    SocialLink {
        name: "LinkedIn",
        url: "https://linkedin.com/in/yourusername",
        aria_label: "Connect with me on LinkedIn",
    },
    SocialLink {
        name: "Telegram",
        url: "https://t.me/yourusername",
        aria_label: "Contact me on Telegram",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillGroup {
    pub title: &'static str,
    pub items: &'static str,
}

pub const SKILL_GROUPS: [SkillGroup; 3] = [
    SkillGroup {
        title: "Development",
        items: "TypeScript, React, Next.js, Node.js",
    },
    SkillGroup {
        title: "Backend",
        items: "Supabase, PostgreSQL, REST APIs",
    },
    SkillGroup {
        title: "Design",
        items: "Tailwind CSS, Framer Motion, Figma",
    },
];

/// Static pages listed in the sitemap with their change frequency and priority.
pub fn static_pages() -> [(Route, &'static str, &'static str); 3] {
    [
        (Route::Home, "monthly", "1.0"),
        (Route::Posts, "daily", "0.9"),
        (Route::Projects, "weekly", "0.9"),
    ]
}

/// Whether a nav entry is current. On the home page the scroll-tracked
/// section decides; elsewhere the route does.
pub fn nav_link_is_active(link: &NavLink, route: &Route, active_section: Option<&str>) -> bool {
    if *route == Route::Home {
        return match (link.section, active_section) {
            (Some(section), Some(active)) => section == active,
            (_, None) => link.href == "/",
            (None, Some(_)) => false,
        };
    }

    link.href == route.section_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(label: &str) -> NavLink {
        *NAV_LINKS
            .iter()
            .find(|link| link.label == label)
            .expect("nav link exists")
    }

    #[test]
    fn home_highlight_follows_the_scrolled_section() {
        assert!(nav_link_is_active(&link("Contact"), &Route::Home, Some("contact")));
        assert!(!nav_link_is_active(&link("Home"), &Route::Home, Some("contact")));
        assert!(nav_link_is_active(&link("Home"), &Route::Home, None));
        assert!(!nav_link_is_active(&link("Posts"), &Route::Home, Some("about")));
    }

    #[test]
    fn other_pages_highlight_by_route() {
        let post = Route::Post("hello".to_string());
        assert!(nav_link_is_active(&link("Posts"), &post, Some("contact")));
        assert!(!nav_link_is_active(&link("Projects"), &post, None));
        assert!(nav_link_is_active(&link("Projects"), &Route::Projects, None));
    }

    #[test]
    fn home_sections_cover_every_tracked_nav_link() {
        for link in NAV_LINKS {
            if let Some(section) = link.section {
                assert!(HOME_SECTIONS.contains(&section), "{section}");
            }
        }
    }
}
