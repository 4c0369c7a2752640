//! Grouping of routers by API version and base path resolution.

use crate::route::Router;
use crate::url_template::{normalize_url, segments};
use indexmap::IndexMap;
use log::debug;

/// Group label of routers without a version
pub const DEFAULT_VERSION: &str = "default";

/// Group routers by their version string, keeping declaration order.
///
/// Every router lands in exactly one group; unversioned routers are grouped
/// under [`DEFAULT_VERSION`].
pub fn group_routers_by_version(routers: &[Router]) -> IndexMap<String, Vec<&Router>> {
    let mut out: IndexMap<String, Vec<&Router>> = IndexMap::new();

    for router in routers {
        let version = router
            .version_string()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        out.entry(version).or_default().push(router);
    }

    debug!("Grouped {} routers into {} versions", routers.len(), out.len());
    out
}

/// Longest sequence of leading URL segments shared by all routers.
///
/// e.g. `/article` and `/article/comments` share `/article`. Returns `/`
/// when nothing is shared or no router is given.
pub fn find_common_base_path(routers: &[&Router]) -> String {
    let urls: Vec<String> = routers.iter().map(|router| router.url()).collect();
    let Some((first, rest)) = urls.split_first() else {
        return "/".to_string();
    };

    let mut base = segments(first);
    for url in rest {
        let other = segments(url);
        let shared = base
            .iter()
            .zip(other.iter())
            .take_while(|(a, b)| a == b)
            .count();
        base.truncate(shared);

        if base.is_empty() {
            break;
        }
    }

    normalize_url(&base.join("/"))
}

/// Fold a host path prefix into the host.
///
/// When the app is served under a path prefix (`basePath` of the app config)
/// that prefix belongs to the server URL rather than to the documented paths.
/// If it is a leading portion of `base_path` it is removed from the base path
/// and appended to the host. Otherwise both values are returned unchanged.
pub fn resolve_host(host: &str, host_base_path: &str, base_path: &str) -> (String, String) {
    let prefix = segments(host_base_path);
    let base = segments(base_path);

    if host.is_empty() || prefix.is_empty() || !base.starts_with(&prefix) {
        return (host.to_string(), base_path.to_string());
    }

    let host = format!("{}{}", host.trim_end_matches('/'), normalize_url(host_base_path));
    let base_path = normalize_url(&base[prefix.len()..].join("/"));
    debug!("Folded host path prefix, host: {}, base path: {}", host, base_path);

    (host, base_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::VersionTag;

    #[test]
    fn test_group_routers_by_version() {
        let routers = vec![
            Router::new("/user", Some(VersionTag::Number(1.0))),
            Router::new("/health", None),
            Router::new("/article", Some(VersionTag::Number(2.1))),
            Router::new("/session", Some(VersionTag::Text("v1".to_string()))),
        ];

        let groups = group_routers_by_version(&routers);

        let versions: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(versions, vec!["v1.0", "default", "v2.1"]);
        assert_eq!(groups["v1.0"].len(), 2);
        assert_eq!(groups["v1.0"][1].url, "/session");
        assert_eq!(groups["default"][0].url, "/health");
    }

    #[test]
    fn test_find_common_base_path() {
        let article = Router::new("/article", None);
        let comments = Router::new("/article/comments", None);
        assert_eq!(find_common_base_path(&[&article, &comments]), "/article");
    }

    #[test]
    fn test_find_common_base_path_with_version_placeholder() {
        let users = Router::new("/api/{version}/users", Some(VersionTag::Number(1.0)));
        let apps = Router::new("/api/{version}/apps", Some(VersionTag::Number(1.0)));
        assert_eq!(find_common_base_path(&[&users, &apps]), "/api/v1.0");
        assert_eq!(find_common_base_path(&[&users]), "/api/v1.0/users");
    }

    #[test]
    fn test_find_common_base_path_nothing_shared() {
        let users = Router::new("/users", None);
        let apps = Router::new("/apps", None);
        assert_eq!(find_common_base_path(&[&users, &apps]), "/");
        assert_eq!(find_common_base_path(&[]), "/");
    }

    #[test]
    fn test_find_common_base_path_compares_whole_segments() {
        let users = Router::new("/user", None);
        let apps = Router::new("/users", None);
        assert_eq!(find_common_base_path(&[&users, &apps]), "/");
    }

    #[test]
    fn test_resolve_host_folds_prefix() {
        assert_eq!(
            resolve_host("api.example.com", "/gateway", "/gateway/v1.0"),
            ("api.example.com/gateway".to_string(), "/v1.0".to_string())
        );
        assert_eq!(
            resolve_host("api.example.com", "gateway/", "/gateway"),
            ("api.example.com/gateway".to_string(), "/".to_string())
        );
    }

    #[test]
    fn test_resolve_host_unchanged() {
        // no host
        assert_eq!(
            resolve_host("", "/gateway", "/gateway/v1.0"),
            ("".to_string(), "/gateway/v1.0".to_string())
        );
        // root prefix
        assert_eq!(
            resolve_host("api.example.com", "/", "/v1.0"),
            ("api.example.com".to_string(), "/v1.0".to_string())
        );
        // prefix is not a leading portion of the base path
        assert_eq!(
            resolve_host("api.example.com", "/gateway", "/v1.0/gateway"),
            ("api.example.com".to_string(), "/v1.0/gateway".to_string())
        );
    }
}
