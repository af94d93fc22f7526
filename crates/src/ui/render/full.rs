use crate::ui::model::Model;
use crate::ui::render::util::normalize_and_pad;

pub fn render_full(m: &Model) -> String {
    let header = m.render_header();
    let header_rows = header.len();
    let mut lines: Vec<String> = normalize_and_pad(header, m.total_width(), header_rows)
        .lines()
        .map(str::to_string)
        .collect();
    lines.extend(m.render_main_content().lines().map(str::to_string));
    lines.push(crate::ui::render::modeline::render_modeline_padded(m));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::list::ListProps;
    use crate::source::Entry;
    use crate::ui::{initial_model, render_modeline_padded, Model, Msg};
    use regex::Regex;

    // helper to strip ANSI CSI sequences from rendered output for assertions
    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn model(n: usize, props: ListProps, width: usize, height: usize) -> Model {
        let items = (0..n).map(|i| Entry::text(format!("entry{}", i + 1))).collect();
        let mut m = initial_model(items, props, None);
        m.update(Msg::WindowSize { width, height });
        m
    }

    #[test]
    fn render_full_matches_dimensions() {
        let sizes = [(80usize, 24usize), (100usize, 10usize), (40usize, 20usize)];
        let labelled = ListProps {
            label: Some("Priorities".to_string()),
            ..ListProps::default()
        };
        for props in [ListProps::default(), labelled] {
            for (w, h) in sizes.iter().cloned() {
                // 50 entries so scrolling is exercised
                let m = model(50, props.clone(), w, h);
                let stripped = strip_ansi(&m.render_full());
                let lines: Vec<&str> = stripped.lines().collect();
                assert_eq!(
                    lines.len(),
                    h,
                    "height mismatch for {w}x{h}: got {} lines\n<<output>>\n{stripped}",
                    lines.len()
                );
                for (idx, line) in lines.iter().enumerate() {
                    let lw = line.chars().count();
                    assert_eq!(
                        lw, w,
                        "width mismatch at line {idx} for {w}x{h}: got {lw} chars\nline: `{line}`\n<<output>>\n{stripped}"
                    );
                }
            }
        }
    }

    #[test]
    fn modeline_is_last_line() {
        let m = model(3, ListProps::default(), 80, 24);
        let stripped = strip_ansi(&m.render_full());
        let last = stripped.lines().last().unwrap_or("").to_string();
        let modeline = strip_ansi(&render_modeline_padded(&m));
        assert_eq!(last, modeline);
    }

    #[test]
    fn label_is_first_line() {
        let props = ListProps {
            label: Some("Priorities".to_string()),
            ..ListProps::default()
        };
        let m = model(3, props, 40, 10);
        let stripped = strip_ansi(&m.render_full());
        let lines: Vec<&str> = stripped.lines().collect();
        assert!(lines[0].starts_with("Priorities"), "{stripped}");
        assert!(lines[1].contains("entry1"), "{stripped}");
    }

    #[test]
    fn max_height_caps_visible_items() {
        let props = ListProps {
            max_height: Some(3),
            ..ListProps::default()
        };
        let m = model(10, props, 40, 20);
        let stripped = strip_ansi(&m.render_full());
        assert!(stripped.contains("entry3"));
        assert!(!stripped.contains("entry4"), "{stripped}");
        assert_eq!(stripped.lines().count(), 20);
    }
}
