#[cfg(test)]
mod tests {
    use crate::filter::{base_name_of, extension_of, ExtensionFilter};

    fn names(filter: &ExtensionFilter, raw: &[&str]) -> Vec<String> {
        filter.apply(raw).into_iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_extension_of_uses_last_dot() {
        assert_eq!(extension_of("a.pdf"), Some("pdf"));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("report.final.docx"), Some("docx"));
        assert_eq!(extension_of(".pdf"), Some("pdf"));
    }

    #[test]
    fn test_extension_of_without_extension() {
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of(""), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_base_name_of() {
        assert_eq!(base_name_of("a.pdf"), "a");
        assert_eq!(base_name_of("report.final.docx"), "report.final");
        assert_eq!(base_name_of("noext"), "noext");
        assert_eq!(base_name_of(".pdf"), "");
    }

    #[test]
    fn test_mixed_listing() {
        let filter = ExtensionFilter::default();
        assert_eq!(names(&filter, &["a.pdf", "b.txt", "c.docx", "noext"]), vec!["a.pdf", "c.docx"]);
    }

    #[test]
    fn test_empty_listing() {
        let filter = ExtensionFilter::default();
        assert!(filter.apply(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = ExtensionFilter::default();
        assert_eq!(names(&filter, &["A.PDF", "b.Docx", "c.pdf"]), vec!["c.pdf"]);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let filter = ExtensionFilter::default();
        let raw = ["z.docx", "m.png", "a.pdf", "z.docx", "b.pdf"];
        assert_eq!(names(&filter, &raw), vec!["z.docx", "a.pdf", "z.docx", "b.pdf"]);
    }

    #[test]
    fn test_entries_are_not_mutated() {
        let filter = ExtensionFilter::default();
        let kept = filter.apply(["My Report.v2.pdf"]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "My Report.v2.pdf");
        assert_eq!(kept[0].base, "My Report.v2");
        assert_eq!(kept[0].extension, "pdf");
        assert_eq!(kept[0].as_raw(), "My Report.v2.pdf");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let filter = ExtensionFilter::default();
        let raw = ["a.pdf", "b.txt", "c.docx", "noext", "d.", ".docx", "e.pdf.bak"];
        let once = filter.apply(raw);
        let again = filter.apply(once.iter().map(|e| e.as_raw()));
        assert_eq!(once, again);
    }

    #[test]
    fn test_kept_iff_extension_allowed() {
        let filter = ExtensionFilter::default();
        let raw = ["x.pdf", "x.pdfx", "x.doc", "x.docx", "pdf", "docx", "x.pdf.", "y.docx"];
        let kept = names(&filter, &raw);
        for name in raw {
            let allowed = matches!(extension_of(name), Some("pdf") | Some("docx"));
            assert_eq!(kept.iter().any(|k| k == name), allowed, "{}", name);
        }
    }

    #[test]
    fn test_custom_allow_set() {
        let filter = ExtensionFilter::new(["txt", "txt", "md"]);
        assert_eq!(filter.allowed(), &["txt".to_string(), "md".to_string()]);
        assert_eq!(names(&filter, &["a.pdf", "b.txt", "c.md"]), vec!["b.txt", "c.md"]);
        assert!(filter.is_allowed("notes.md"));
        assert!(!filter.is_allowed("notes"));
    }
}
