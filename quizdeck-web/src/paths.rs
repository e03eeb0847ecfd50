//! URL helpers that respect the deployment base path.
//!
//! When `PUBLIC_URL` is set at compile time (e.g. `/quiz` for GitHub
//! Pages), generated URLs are prefixed accordingly; local builds fall
//! back to root-anchored paths.

#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// URL of the quiz index file.
#[must_use]
pub fn index_url() -> String {
    asset_path("data/index.json")
}

/// URL of one quiz data file.
#[must_use]
pub fn quiz_url(quiz_id: &str) -> String {
    asset_path(&format!("data/{quiz_id}.json"))
}

/// URL of the trophy catalog.
#[must_use]
pub fn trophies_url() -> String {
    asset_path("data/trophies.json")
}

/// Base path for the router, `None` when hosted at the root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_urls_are_root_anchored_without_a_base() {
        assert_eq!(index_url(), "/data/index.json");
        assert_eq!(quiz_url("rust-basics"), "/data/rust-basics.json");
        assert_eq!(trophies_url(), "/data/trophies.json");
        assert_eq!(asset_path("/images/win.gif"), "/images/win.gif");
    }

    #[test]
    fn base_prefix_is_applied_once() {
        assert_eq!(
            asset_path_with_base("data/index.json", "/quiz"),
            "/quiz/data/index.json"
        );
        assert_eq!(
            asset_path_with_base("/data/index.json", "/quiz/"),
            "/quiz/data/index.json"
        );
    }

    #[test]
    fn router_base_is_none_by_default() {
        assert_eq!(router_base(), None);
        assert_eq!(router_base_with_base("/quiz/"), Some(String::from("/quiz")));
    }
}
