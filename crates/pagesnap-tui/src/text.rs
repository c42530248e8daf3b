use unicode_width::UnicodeWidthChar;

/// Hard-wrap `body` to `width` display columns
///
/// Empty source lines are kept so paragraph spacing survives. The result has
/// exactly one entry per rendered row, which makes it the source of truth for
/// a section's scroll height.
pub fn wrap_body(body: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut rows = Vec::new();

    for line in body.lines() {
        let mut row = String::new();
        let mut used = 0usize;

        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(c);
            used += w;
        }
        rows.push(row);
    }

    rows
}
