//! CLI output formatting.
//!
//! Each surface has a `format_*` function (pure, returns strings) and a
//! thin `print_*` wrapper that writes to stdout, so tests assert on the
//! formatted text without capturing output.

use crate::batch::BatchEvent;
use crate::cache::CacheStats;
use crate::types::CoverRecord;

/// Format one rendered cover for the `render` command.
///
/// ```text
/// Guia de Marketing
///     Cover: covers/guia-marketing-1a2b3c4d.webp (cached)
/// ```
pub fn format_render_result(record: &CoverRecord) -> Vec<String> {
    let status = if record.cached { " (cached)" } else { "" };
    vec![
        record.title.clone(),
        format!("    Cover: {}{}", record.path, status),
    ]
}

/// Format one batch progress event.
pub fn format_batch_event(event: &BatchEvent) -> String {
    match event {
        BatchEvent::Cached { title, path } => format!("  {title}\n      cached: {path}"),
        BatchEvent::Rendered { title, path } => format!("  {title}\n      rendered: {path}"),
        BatchEvent::Failed { title, error } => format!("  {title}\n      FAILED: {error}"),
    }
}

/// Format the startup-asset report for the `check` command.
pub fn format_check_report(
    font_path: &str,
    template_count: usize,
    categories: &[&str],
    cache_dir: &str,
) -> Vec<String> {
    let mut lines = vec![
        format!("Font: {font_path}"),
        format!("Templates: {template_count} categories + default"),
    ];
    for name in categories {
        lines.push(format!("    {name}"));
    }
    lines.push(format!("Cache: {cache_dir}"));
    lines
}

pub fn print_render_result(record: &CoverRecord) {
    for line in format_render_result(record) {
        println!("{line}");
    }
}

pub fn print_batch_event(event: &BatchEvent) {
    println!("{}", format_batch_event(event));
}

pub fn print_batch_summary(stats: &CacheStats) {
    println!("Cache: {stats}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_result_marks_cache_hits() {
        let record = CoverRecord {
            title: "Guia de Marketing".into(),
            category: "marketing".into(),
            path: "covers/guia-marketing-1a2b3c4d.webp".into(),
            cached: true,
        };
        let lines = format_render_result(&record);
        assert_eq!(lines[0], "Guia de Marketing");
        assert!(lines[1].ends_with("(cached)"));
    }

    #[test]
    fn render_result_fresh_has_no_marker() {
        let record = CoverRecord {
            title: "Guia de SEO".into(),
            category: "seo".into(),
            path: "covers/guia-seo-9f8e7d6c.webp".into(),
            cached: false,
        };
        let lines = format_render_result(&record);
        assert_eq!(lines[1], "    Cover: covers/guia-seo-9f8e7d6c.webp");
    }

    #[test]
    fn batch_events_format_by_kind() {
        let cached = BatchEvent::Cached {
            title: "T".into(),
            path: "p.webp".into(),
        };
        let failed = BatchEvent::Failed {
            title: "T".into(),
            error: "boom".into(),
        };
        assert_eq!(format_batch_event(&cached), "  T\n      cached: p.webp");
        assert_eq!(format_batch_event(&failed), "  T\n      FAILED: boom");
    }

    #[test]
    fn check_report_lists_categories_indented() {
        let lines = format_check_report("assets/title.ttf", 2, &["marketing", "seo"], "covers");
        assert_eq!(lines[0], "Font: assets/title.ttf");
        assert_eq!(lines[1], "Templates: 2 categories + default");
        assert_eq!(lines[2], "    marketing");
        assert_eq!(lines[4], "Cache: covers");
    }
}
