pub mod assertions {
    use mail2pdf::PageLayout;

    pub fn assert_contains_all(name: &str, html: &str, expected: &[String]) {
        for fragment in expected {
            assert!(html.contains(fragment.as_str()), "{}: expected to find {:?} in:\n{}", name, fragment, html);
        }
    }

    pub fn assert_contains_none(name: &str, html: &str, unexpected: &[String]) {
        for fragment in unexpected {
            assert!(!html.contains(fragment.as_str()), "{}: did not expect {:?} in:\n{}", name, fragment, html);
        }
    }

    pub fn assert_print_layout(layouts: &[PageLayout]) {
        assert!(!layouts.is_empty(), "nothing was rendered");
        for layout in layouts {
            assert_eq!(210.0, layout.width_mm);
            assert_eq!(297.0, layout.height_mm);
            assert_eq!(20.0, layout.margin_mm);
            assert!(layout.display_header_footer);
            assert!(layout.print_background);
            assert!(layout.header_template.contains("<span class=\"title\"></span>"));
            assert!(layout.footer_template.contains("<span class=\"pageNumber\"></span>/<span class=\"totalPages\"></span>"));
            assert!(layout.footer_template.contains("text-align: right"));
        }
    }
}
