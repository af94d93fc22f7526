use lipgloss::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Render each line at exactly `total_width` and return exactly `rows` lines.
pub fn normalize_and_pad(lines: Vec<String>, total_width: usize, rows: usize) -> String {
    let w_i32: i32 = total_width.try_into().unwrap_or(i32::MAX);
    let line_style = Style::new().width(w_i32);
    let mut normalized: Vec<String> = lines.into_iter().map(|l| line_style.render(&l)).collect();
    normalized.truncate(rows);
    while normalized.len() < rows {
        normalized.push(line_style.render(""));
    }
    normalized.join("\n")
}

/// Terminal columns taken by `s` once control characters are blanked.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(single_line(s).as_str())
}

/// Replace control characters (newlines, tabs, ...) with spaces so text
/// always occupies one screen row.
pub fn single_line(s: &str) -> String {
    s.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

/// Cut or right-pad text to exactly `width` columns, marking cuts with `…`.
pub fn fit(s: &str, width: usize) -> String {
    let clean = single_line(s);
    let w = UnicodeWidthStr::width(clean.as_str());
    if w <= width {
        let mut out = clean;
        out.extend(std::iter::repeat(' ').take(width - w));
        return out;
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in clean.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > width - 1 {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    used += 1;
    // a wide char that did not fit leaves one column to fill
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}
