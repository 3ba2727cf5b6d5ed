//! SVG exporter: renders a [`GridLayout`] as a standalone SVG document with
//! the timeline header on top, track titles on the left, and the grid body.

use std::fmt::Write;

use agenda_grid_protocol::ThemeToken;

use crate::layout::GridLayout;

const HEADER_HEIGHT: f64 = 32.0;
const TITLE_WIDTH: f64 = 160.0;
const CHAR_WIDTH: f64 = 7.0;
const TEXT_INSET: f64 = 6.0;

/// Render the laid-out grid as an SVG document string.
///
/// `dark` selects the color palette.
pub fn render_svg(layout: &GridLayout, dark: bool) -> String {
    let width = TITLE_WIDTH + layout.width_px();
    let height = HEADER_HEIGHT + layout.body_height_px();
    let mut svg = String::with_capacity(layout.session_count() * 200 + 1024);

    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:11px">"#,
    );
    let _ = write!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark)
    );

    // Timeline header
    let _ = write!(
        svg,
        r#"<rect x="{TITLE_WIDTH}" y="0" width="{}" height="{HEADER_HEIGHT}" fill="{}"/>"#,
        layout.width_px(),
        resolve_color(ThemeToken::TimelineBackground, dark)
    );
    let mut x = TITLE_WIDTH;
    for tick in &layout.timeline.ticks {
        let _ = write!(
            svg,
            r#"<line x1="{x}" y1="0" x2="{x}" y2="{height}" stroke="{}" stroke-width="0.5"/><text x="{}" y="{}" fill="{}">{}</text>"#,
            resolve_color(ThemeToken::Border, dark),
            x + TEXT_INSET,
            HEADER_HEIGHT * 0.65,
            resolve_color(ThemeToken::TimelineText, dark),
            escape_xml(&tick.label),
        );
        x += tick.width_px;
    }

    // Track titles and row lanes
    for band in layout.track_bands() {
        let title_y = HEADER_HEIGHT + band.title_y;
        let _ = write!(
            svg,
            r#"<rect x="0" y="{title_y}" width="{TITLE_WIDTH}" height="{}" fill="{}" stroke="{}"/><text x="{TEXT_INSET}" y="{}" fill="{}">{}</text>"#,
            band.track.title_height_px,
            resolve_color(ThemeToken::TrackTitleBackground, dark),
            resolve_color(ThemeToken::Border, dark),
            title_y + 18.0,
            resolve_color(ThemeToken::TrackTitleText, dark),
            escape_xml(&fit_label(&band.track.title, TITLE_WIDTH - 2.0 * TEXT_INSET)),
        );

        let mut row_y = HEADER_HEIGHT + band.body_y;
        for row in &band.track.rows {
            let _ = write!(
                svg,
                r#"<rect x="{TITLE_WIDTH}" y="{row_y}" width="{}" height="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                row.layout.width_px,
                row.layout.height_px,
                resolve_color(ThemeToken::RowBackground, dark),
                resolve_color(ThemeToken::RowBorder, dark),
                layout.border_width,
            );
            row_y += row.layout.height_px;
        }
    }

    // Session blocks
    for placed in layout.placed_blocks() {
        let rect = placed.rect;
        let bx = TITLE_WIDTH + rect.x;
        let by = HEADER_HEIGHT + rect.y;
        let _ = write!(
            svg,
            r#"<rect x="{bx}" y="{by}" width="{}" height="{}" fill="{}" stroke="{}" rx="2"><title>{}</title></rect>"#,
            rect.w.max(0.0),
            rect.h.max(0.0),
            resolve_color(ThemeToken::SessionFill, dark),
            resolve_color(ThemeToken::SessionBorder, dark),
            escape_xml(&placed.block.title),
        );

        let text = fit_label(&placed.block.title, placed.block.content_width_px);
        if !text.is_empty() {
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" fill="{}" style="pointer-events:none">{}</text>"#,
                bx + placed.block.padding_px,
                by + placed.block.padding_px + 11.0,
                resolve_color(ThemeToken::SessionText, dark),
                escape_xml(&text),
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Truncate `label` with an ellipsis so it fits `width` pixels.
fn fit_label(label: &str, width: f64) -> String {
    let max_chars = (width / CHAR_WIDTH).max(0.0) as usize;
    if label.chars().count() <= max_chars {
        label.to_string()
    } else if max_chars > 2 {
        let truncated: String = label.chars().take(max_chars - 1).collect();
        format!("{truncated}…")
    } else {
        String::new()
    }
}

fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    if dark {
        match token {
            ThemeToken::Background | ThemeToken::RowBackground => "#181818",
            ThemeToken::Border | ThemeToken::RowBorder => "#303030",
            ThemeToken::TimelineBackground | ThemeToken::TrackTitleBackground => "#222831",
            ThemeToken::TimelineText | ThemeToken::TrackTitleText | ThemeToken::SessionText => {
                "#ececec"
            }
            ThemeToken::SessionFill => "#2f5d8a",
            ThemeToken::SessionBorder => "#448aff",
        }
    } else {
        match token {
            ThemeToken::Background | ThemeToken::RowBackground => "#f8f9fa",
            ThemeToken::Border | ThemeToken::RowBorder => "#dee2e6",
            ThemeToken::TimelineBackground | ThemeToken::TrackTitleBackground => "#e9ecef",
            ThemeToken::TimelineText | ThemeToken::TrackTitleText | ThemeToken::SessionText => {
                "#1a1a2e"
            }
            ThemeToken::SessionFill => "#cfe2ff",
            ThemeToken::SessionBorder => "#457b9d",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
