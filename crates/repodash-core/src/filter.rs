use crate::models::Repository;

/// Narrow a list of repositories down to those matching `term`.
///
/// Matching is a case-insensitive substring test against the name, and
/// against the description when there is one. Order is preserved and an
/// empty term matches everything.
pub fn filter_repositories<'a>(repos: &'a [Repository], term: &str) -> Vec<&'a Repository> {
    matching_indices(repos, term)
        .into_iter()
        .map(|i| &repos[i])
        .collect()
}

/// Positions in `repos` of the entries that match `term`, ascending
pub fn matching_indices(repos: &[Repository], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..repos.len()).collect();
    }

    let needle = term.to_lowercase();
    repos
        .iter()
        .enumerate()
        .filter(|(_, repo)| matches(repo, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// `needle` must already be lowercase
fn matches(repo: &Repository, needle: &str) -> bool {
    repo.name.to_lowercase().contains(needle)
        || repo
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::repo;

    fn sample() -> Vec<Repository> {
        vec![
            repo(1, "guava", Some("Google core libraries for Java")),
            repo(2, "go-cloud", Some("The Go Cloud Development Kit")),
            repo(3, "leveldb", None),
            repo(4, "Zx", Some("Compression LIBRARY")),
            repo(5, "material-design-icons", Some("icons")),
        ]
    }

    fn names(repos: &[&Repository]) -> Vec<String> {
        repos.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_empty_term_is_identity() {
        let list = sample();
        let out = filter_repositories(&list, "");
        assert_eq!(out.len(), list.len());
        assert!(out.iter().zip(list.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let list = sample();
        assert_eq!(names(&filter_repositories(&list, "LEVEL")), vec!["leveldb"]);
        assert_eq!(names(&filter_repositories(&list, "zx")), vec!["Zx"]);
    }

    #[test]
    fn test_matches_description() {
        let list = sample();
        assert_eq!(
            names(&filter_repositories(&list, "library")),
            vec!["Zx"]
        );
        assert_eq!(
            names(&filter_repositories(&list, "librar")),
            vec!["guava", "Zx"]
        );
    }

    #[test]
    fn test_missing_description_only_checks_name() {
        let list = sample();
        assert!(filter_repositories(&list, "none").is_empty());
    }

    #[test]
    fn test_result_is_ordered_subset() {
        let list = sample();
        for term in ["go", "o", "i", "x", "zzz-no-match", "E"] {
            let idx = matching_indices(&list, term);
            assert!(idx.windows(2).all(|w| w[0] < w[1]), "order broken for {term}");
            assert!(idx.iter().all(|&i| i < list.len()));
        }
    }

    #[test]
    fn test_no_match_yields_empty() {
        let list = sample();
        assert!(filter_repositories(&list, "zzz-no-match").is_empty());
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_unicode_case_folding() {
        let list = vec![repo(1, "Überblick", None)];
        assert_eq!(filter_repositories(&list, "über").len(), 1);
    }
}
