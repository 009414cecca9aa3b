//! Export file naming

/// `wcag-report-<url>.pdf` with every character outside `[A-Za-z0-9]`
/// replaced by `-`.
///
/// Characters outside the Basic Multilingual Plane take two hyphens, one
/// per UTF-16 code unit, so names match those produced by browser builds
/// of the report exporter.
pub fn report_file_name(url: &str) -> String {
    let mut name = String::with_capacity(url.len() + 16);
    name.push_str("wcag-report-");
    for c in url.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c);
        } else {
            for _ in 0..c.len_utf16() {
                name.push('-');
            }
        }
    }
    name.push_str(".pdf");
    name
}
