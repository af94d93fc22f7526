use crate::ui::model::Model;
use crate::ui::render::styles::STYLE_HEADER;
use crate::ui::render::util::fit;

// Optional label above the list; empty when no label is configured.
pub fn render_header(m: &Model) -> Vec<String> {
    match &m.list.props().label {
        Some(label) => {
            let clipped = fit(label, m.total_width());
            vec![STYLE_HEADER.render(clipped.trim_end())]
        }
        None => Vec::new(),
    }
}
