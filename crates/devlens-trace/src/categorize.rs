use devlens_types::FrameCategory;
use std::path::Path;

/// How a rule decides whether it applies to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMatch {
    /// Frame path starts with the project root and contains one of the
    /// given segments.
    UnderRootSegment(&'static [&'static str]),
    /// Frame path starts with the project root.
    UnderRoot,
    /// Frame path contains one of the given segments, anywhere.
    PathContains(&'static [&'static str]),
    /// Always applies; the catch-all terminator.
    Always,
}

/// One prioritized categorization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub matches: RuleMatch,
    pub category: FrameCategory,
}

const APPLICATION_SEGMENTS: &[&str] = &["/src/", "/app/", "/bin/"];
const LIBRARY_SEGMENTS: &[&str] = &["/lib/"];
const CONFIGURATION_SEGMENTS: &[&str] = &["/config/"];
const DEPENDENCY_SEGMENTS: &[&str] = &["/.cargo/registry/", "/cargo/registry/", "/vendor/"];
const RUNTIME_SEGMENTS: &[&str] = &["/rustc/", "/.rustup/toolchains/", "/toolchains/"];

/// Classifies raw frames by originating layer using an ordered rule table.
///
/// First match wins and the final rule always matches, so categorization
/// never fails. This is a heuristic over path markers, not a guarantee:
/// first-party code under the project root that matches no known sub-tree is
/// still tagged Application.
#[derive(Debug, Clone)]
pub struct Categorizer {
    root: String,
    rules: Vec<Rule>,
}

impl Categorizer {
    pub fn new(project_root: &Path) -> Self {
        Self {
            root: root_prefix(project_root),
            rules: Self::default_rules(),
        }
    }

    /// The documented priority order. Kept as data rather than nested
    /// conditionals so the order itself is testable and new markers can be
    /// added without touching call sites.
    pub fn default_rules() -> Vec<Rule> {
        vec![
            Rule {
                matches: RuleMatch::UnderRootSegment(APPLICATION_SEGMENTS),
                category: FrameCategory::Application,
            },
            Rule {
                matches: RuleMatch::UnderRootSegment(LIBRARY_SEGMENTS),
                category: FrameCategory::Library,
            },
            Rule {
                matches: RuleMatch::UnderRootSegment(CONFIGURATION_SEGMENTS),
                category: FrameCategory::Configuration,
            },
            Rule {
                matches: RuleMatch::UnderRoot,
                category: FrameCategory::Application,
            },
            Rule {
                matches: RuleMatch::PathContains(DEPENDENCY_SEGMENTS),
                category: FrameCategory::Dependency,
            },
            Rule {
                matches: RuleMatch::PathContains(RUNTIME_SEGMENTS),
                category: FrameCategory::Runtime,
            },
            Rule {
                matches: RuleMatch::Always,
                category: FrameCategory::Framework,
            },
        ]
    }

    /// The active rule list, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn project_root(&self) -> &str {
        self.root.trim_end_matches('/')
    }

    /// Categorize one raw frame string. Always yields a category.
    pub fn categorize(&self, raw: &str) -> FrameCategory {
        for rule in &self.rules {
            if self.applies(rule.matches, raw) {
                return rule.category;
            }
        }
        // The Always rule makes this unreachable, but the fallback mirrors it.
        FrameCategory::Framework
    }

    fn applies(&self, matches: RuleMatch, raw: &str) -> bool {
        match matches {
            RuleMatch::UnderRootSegment(segments) => {
                raw.starts_with(&self.root) && segments.iter().any(|s| raw.contains(s))
            }
            RuleMatch::UnderRoot => raw.starts_with(&self.root),
            RuleMatch::PathContains(segments) => segments.iter().any(|s| raw.contains(s)),
            RuleMatch::Always => true,
        }
    }
}

// Normalized root prefix: trailing slash so "/home/app" does not also match
// "/home/app2/...".
fn root_prefix(project_root: &Path) -> String {
    let mut root = project_root.to_string_lossy().into_owned();
    if !root.ends_with('/') {
        root.push('/');
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorizer() -> Categorizer {
        Categorizer::new(Path::new("/home/dev/myapp"))
    }

    #[test]
    fn test_rule_order_matches_documented_priority() {
        let rules = Categorizer::default_rules();
        let categories: Vec<FrameCategory> = rules.iter().map(|r| r.category).collect();

        assert_eq!(
            categories,
            vec![
                FrameCategory::Application,
                FrameCategory::Library,
                FrameCategory::Configuration,
                FrameCategory::Application,
                FrameCategory::Dependency,
                FrameCategory::Runtime,
                FrameCategory::Framework,
            ]
        );
        assert_eq!(rules.last().unwrap().matches, RuleMatch::Always);
    }

    #[test]
    fn test_application_frame() {
        let c = categorizer();
        assert_eq!(
            c.categorize("/home/dev/myapp/src/widgets.rs:10:in 'render'"),
            FrameCategory::Application
        );
    }

    #[test]
    fn test_library_frame() {
        let c = categorizer();
        assert_eq!(
            c.categorize("/home/dev/myapp/lib/helpers.rs:3"),
            FrameCategory::Library
        );
    }

    #[test]
    fn test_configuration_frame() {
        let c = categorizer();
        assert_eq!(
            c.categorize("/home/dev/myapp/config/settings.rs:8"),
            FrameCategory::Configuration
        );
    }

    #[test]
    fn test_unrecognized_subtree_under_root_is_application() {
        let c = categorizer();
        assert_eq!(
            c.categorize("/home/dev/myapp/build.rs:1"),
            FrameCategory::Application
        );
    }

    #[test]
    fn test_sibling_directory_is_not_under_root() {
        let c = categorizer();
        assert_eq!(
            c.categorize("/home/dev/myapp2/src/widgets.rs:10"),
            FrameCategory::Framework
        );
    }

    #[test]
    fn test_dependency_cache_frame() {
        let c = categorizer();
        assert_eq!(
            c.categorize("/home/dev/.cargo/registry/src/index-1/tokio-1.40.0/src/task.rs:99"),
            FrameCategory::Dependency
        );
    }

    #[test]
    fn test_runtime_frame() {
        let c = categorizer();
        assert_eq!(
            c.categorize("/rustc/abc123/library/core/src/panicking.rs:75"),
            FrameCategory::Runtime
        );
    }

    #[test]
    fn test_everything_else_is_framework() {
        let c = categorizer();
        assert_eq!(c.categorize("/opt/somewhere/else.rs:1"), FrameCategory::Framework);
        assert_eq!(c.categorize("not a frame at all"), FrameCategory::Framework);
        assert_eq!(c.categorize(""), FrameCategory::Framework);
    }

    #[test]
    fn test_root_segments_beat_dependency_markers() {
        // A vendored tree under the project root is still first-party code.
        let c = categorizer();
        assert_eq!(
            c.categorize("/home/dev/myapp/vendor/patched/src/x.rs:5"),
            FrameCategory::Application
        );
    }
}
