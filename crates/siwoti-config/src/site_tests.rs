    use super::*;

    const SITES: &str = r#"{
        "*.derstandard.at": {
            "comments": [".posting-content", "dst-posting"],
            "article": { "container": "article", "title": "h1", "content": "p" },
            "shadowHost": "dst-forum"
        },
        "news.ycombinator.com": [".commtext"],
        "*.reddit.com": { "comments": ["shreddit-comment"] },
        "*": { "comments": [".comment"] }
    }"#;

    #[test]
    fn test_matches_wildcard() {
        assert!(matches("www.derstandard.at", "*.derstandard.at"));
        assert!(matches("anything.example", "*"));
        assert!(matches("", "*"));
    }

    #[test]
    fn test_matches_is_whole_hostname() {
        assert!(matches("news.ycombinator.com", "news.ycombinator.com"));
        assert!(!matches("news.ycombinator.com.evil.test", "news.ycombinator.com"));
        assert!(!matches("derstandard.at", "*.derstandard.at"));
    }

    #[test]
    fn test_matches_dots_are_literal() {
        assert!(!matches("newsxycombinator.com", "news.ycombinator.com"));
    }

    #[test]
    fn test_matches_multiple_wildcards() {
        assert!(matches("m.forum.example.org", "*.forum.*.org"));
        assert!(!matches("m.forum.example.com", "*.forum.*.org"));
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let table = SiteTable::from_json(SITES).unwrap();
        let patterns: Vec<_> = table.patterns().collect();
        assert_eq!(
            patterns,
            vec!["*.derstandard.at", "news.ycombinator.com", "*.reddit.com", "*"]
        );
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_parse_full_descriptor() {
        let table = SiteTable::from_json(SITES).unwrap();
        let descriptor = table.resolve("www.derstandard.at").unwrap();
        assert_eq!(
            descriptor.comment_selectors,
            vec![".posting-content".to_string(), "dst-posting".to_string()]
        );
        assert_eq!(descriptor.shadow_host.as_deref(), Some("dst-forum"));
        let article = descriptor.article.as_ref().unwrap();
        assert_eq!(article.container.as_deref(), Some("article"));
        assert_eq!(article.title.as_deref(), Some("h1"));
        assert!(article.exclude.is_empty());
    }

    #[test]
    fn test_parse_legacy_array() {
        let table = SiteTable::from_json(SITES).unwrap();
        let descriptor = table.resolve("news.ycombinator.com").unwrap();
        assert_eq!(descriptor.comment_selectors, vec![".commtext".to_string()]);
        assert!(descriptor.article.is_none());
        assert!(descriptor.shadow_host.is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let table = SiteTable::from_json(SITES).unwrap();
        // Also matched by the trailing "*".
        assert_eq!(table.matching_pattern("old.reddit.com"), Some("*.reddit.com"));
        assert_eq!(table.matching_pattern("example.org"), Some("*"));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let table = SiteTable::from_json(SITES).unwrap();
        let first = table.resolve("www.derstandard.at").cloned();
        for _ in 0..10 {
            assert_eq!(table.resolve("www.derstandard.at").cloned(), first);
        }
    }

    #[test]
    fn test_unsupported_site() {
        let table = SiteTable::from_json(r#"{ "*.derstandard.at": [".posting"] }"#).unwrap();
        assert!(table.resolve("example.org").is_none());
    }

    #[test]
    fn test_invalid_entry_skipped() {
        let table = SiteTable::from_json(r#"{ "a.test": 42, "b.test": [".c"] }"#).unwrap();
        let patterns: Vec<_> = table.patterns().collect();
        assert_eq!(patterns, vec!["b.test"]);
    }

    #[test]
    fn test_non_object_document_is_error() {
        assert!(SiteTable::from_json("[1, 2]").is_err());
        assert!(SiteTable::from_json("{ broken").is_err());
    }

    #[test]
    fn test_from_entries() {
        let table = SiteTable::from_entries(vec![
            ("example.org".to_string(), SiteDescriptor::new(vec![".c".to_string()])),
        ])
        .unwrap();
        assert!(table.resolve("example.org").is_some());
        assert!(!table.is_empty());
    }
