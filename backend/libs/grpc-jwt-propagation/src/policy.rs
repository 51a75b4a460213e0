//! Allow-list of methods reachable without a credential

use std::collections::HashSet;

/// Set of fully-qualified gRPC method paths (`/package.Service/Method`)
/// that anonymous callers may reach
///
/// Built once at startup and never mutated; lookups are exact string
/// matches with no wildcard or prefix semantics.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    public: HashSet<String>,
}

impl AccessPolicy {
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            public: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `method` may be called without a verified identity
    pub fn is_public(&self, method: &str) -> bool {
        self.public.contains(method)
    }

    pub fn len(&self) -> usize {
        self.public.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_only() {
        let policy = AccessPolicy::new(["/pb.Post/ListPost"]);

        assert!(policy.is_public("/pb.Post/ListPost"));
        assert!(!policy.is_public("/pb.Post/ListPost/"));
        assert!(!policy.is_public("/pb.Post/ListPos"));
        assert!(!policy.is_public("/pb.Post/"));
        assert!(!policy.is_public("/pb.post/listpost"));
        assert!(!policy.is_public(""));
    }

    #[test]
    fn test_empty_policy_protects_everything() {
        let policy = AccessPolicy::default();
        assert_eq!(policy.len(), 0);
        assert!(!policy.is_public("/pb.Post/ListPost"));
    }

    #[test]
    fn test_duplicate_methods_collapse() {
        let policy = AccessPolicy::new(["/a.B/C", "/a.B/D", "/a.B/C"]);
        assert_eq!(policy.len(), 2);
        assert!(policy.is_public("/a.B/D"));
    }
}
