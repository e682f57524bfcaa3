#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Posts,
    Post(String),
    Projects,
    NotFound,
}

impl Route {
    /// Query strings and fragments are ignored, as is a trailing slash.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["posts"] => Self::Posts,
            ["posts", slug] => Self::Post(slug.to_string()),
            ["projects"] => Self::Projects,
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Posts => "/posts".to_string(),
            Self::Post(slug) => format!("/posts/{slug}"),
            Self::Projects => "/projects".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// Navigation entry a route belongs to; a post highlights "Posts".
    pub fn section_path(&self) -> String {
        match self {
            Self::Post(_) => Self::Posts.path(),
            other => other.path(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Home => "Home".to_string(),
            Self::Posts => "Posts".to_string(),
            Self::Post(slug) => slug.replace('-', " "),
            Self::Projects => "Projects".to_string(),
            Self::NotFound => "Page Not Found".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/posts/"), Route::Posts);
        assert_eq!(Route::from_path("/posts/hello-world"), Route::Post("hello-world".to_string()));
        assert_eq!(Route::from_path("/projects?tag=rust"), Route::Projects);
        assert_eq!(Route::from_path("/#contact"), Route::Home);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::from_path("/posts/a/b"), Route::NotFound);
        assert_eq!(Route::from_path("/about"), Route::NotFound);
    }

    #[test]
    fn path_round_trips_for_pages() {
        for route in [Route::Home, Route::Posts, Route::Projects, Route::Post("x".to_string())] {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }

    #[test]
    fn post_belongs_to_posts_section() {
        assert_eq!(Route::Post("x".to_string()).section_path(), "/posts");
        assert_eq!(Route::Projects.section_path(), "/projects");
    }
}
