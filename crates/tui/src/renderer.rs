use std::io::stdout;
use std::time::{Duration, Instant};

use agenda_grid_core::GridLayout;
use agenda_grid_core::sync::{
    FALLBACK_FRAME_INTERVAL, FrameRequest, ScrollEventKind, ScrollSynchronizer, ScrollTarget,
};
use agenda_grid_protocol::{ScrollOffsets, ThemeToken};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
};

/// Grid pixels per terminal column (one hour tick = 30 columns).
const PX_PER_COL: f64 = 8.0;
/// Grid pixels per terminal line (one row = 3 lines).
const PX_PER_LINE: f64 = 50.0;
const TITLE_COLS: u16 = 18;
const IDLE_POLL: Duration = Duration::from_millis(250);

fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background | ThemeToken::RowBackground => Color::Black,
        ThemeToken::Border | ThemeToken::RowBorder => Color::DarkGray,
        ThemeToken::TimelineBackground | ThemeToken::TrackTitleBackground => Color::Rgb(34, 40, 49),
        ThemeToken::TimelineText | ThemeToken::TrackTitleText => Color::White,
        ThemeToken::SessionFill => Color::Rgb(47, 93, 138),
        ThemeToken::SessionBorder => Color::LightBlue,
        ThemeToken::SessionText => Color::White,
    }
}

fn style(fg: ThemeToken, bg: ThemeToken) -> Style {
    Style::default().fg(theme_to_color(fg)).bg(theme_to_color(bg))
}

/// Scroll position of a dependent pane, written by the synchronizer.
#[derive(Debug, Default)]
struct PaneScroll {
    left: f64,
    top: f64,
}

impl ScrollTarget for PaneScroll {
    fn set_scroll_left(&mut self, px: f64) {
        self.left = px;
    }

    fn set_scroll_top(&mut self, px: f64) {
        self.top = px;
    }
}

/// Write `text` at cell (`col`, `row`) relative to `area`, clipped to it.
/// Negative coordinates are clipped rather than wrapped.
fn put_str(buf: &mut Buffer, area: Rect, col: i64, row: i64, text: &str, style: Style) {
    if row < 0 || row >= i64::from(area.height) {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let c = col + i as i64;
        if c < 0 {
            continue;
        }
        if c >= i64::from(area.width) {
            break;
        }
        buf[(area.x + c as u16, area.y + row as u16)]
            .set_char(ch)
            .set_style(style);
    }
}

fn fill(buf: &mut Buffer, area: Rect, col: i64, row: i64, width: i64, height: i64, style: Style) {
    for r in row..row + height {
        put_str(buf, area, col, r, &" ".repeat(width.max(0) as usize), style);
    }
}

fn to_col(px: f64) -> i64 {
    (px / PX_PER_COL).floor() as i64
}

fn to_line(px: f64) -> i64 {
    (px / PX_PER_LINE).floor() as i64
}

fn draw_timeline(buf: &mut Buffer, area: Rect, layout: &GridLayout, scroll_left: f64) {
    let bg = style(ThemeToken::TimelineText, ThemeToken::TimelineBackground);
    fill(buf, area, 0, 0, i64::from(area.width), 1, bg);
    let mut x = -scroll_left;
    for tick in &layout.timeline.ticks {
        put_str(buf, area, to_col(x), 0, &format!("│{}", tick.label), bg);
        x += tick.width_px;
    }
}

fn draw_titles(buf: &mut Buffer, area: Rect, layout: &GridLayout, scroll_top: f64) {
    let bg = style(ThemeToken::TrackTitleText, ThemeToken::TrackTitleBackground);
    fill(buf, area, 0, 0, i64::from(area.width), i64::from(area.height), bg);
    for band in layout.track_bands() {
        let row = to_line(band.title_y - scroll_top);
        let rule = "─".repeat(area.width as usize);
        put_str(buf, area, 0, row, &rule, style(ThemeToken::Border, ThemeToken::TrackTitleBackground));
        let title: String = band.track.title.chars().take(usize::from(area.width).saturating_sub(1)).collect();
        put_str(buf, area, 1, row + 1, &title, bg);
    }
}

fn draw_body(buf: &mut Buffer, area: Rect, layout: &GridLayout, scroll: ScrollOffsets) {
    let bg = style(ThemeToken::Border, ThemeToken::RowBackground);
    fill(buf, area, 0, 0, i64::from(area.width), i64::from(area.height), bg);

    let rule = "─".repeat(area.width as usize);
    for band in layout.track_bands() {
        put_str(buf, area, 0, to_line(band.body_y - scroll.top), &rule, bg);
    }

    let block_style = style(ThemeToken::SessionText, ThemeToken::SessionFill);
    for placed in layout.placed_blocks() {
        let col = to_col(placed.rect.x - scroll.left);
        let width = to_col(placed.rect.w).max(1);
        let row = to_line(placed.rect.y - scroll.top) + 1;
        let height = to_line(placed.rect.h).max(1);
        if col + width < 0 || col >= i64::from(area.width) {
            continue;
        }
        fill(buf, area, col, row, width, height, block_style);
        let label: String = placed
            .block
            .title
            .chars()
            .take(width.saturating_sub(1).max(0) as usize)
            .collect();
        put_str(buf, area, col + 1, row, &label, block_style);
    }
}

/// Clamp body offsets so the grid never scrolls past its content.
fn clamp(scroll: &mut ScrollOffsets, layout: &GridLayout, body: Rect) {
    let max_left = (layout.width_px() - f64::from(body.width) * PX_PER_COL).max(0.0);
    let max_top = (layout.body_height_px() - f64::from(body.height) * PX_PER_LINE).max(0.0);
    scroll.left = scroll.left.clamp(0.0, max_left);
    scroll.top = scroll.top.clamp(0.0, max_top);
}

pub fn render_tui(layout: &GridLayout) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let epoch = Instant::now();
    let mut sync = ScrollSynchronizer::new();
    let mut body_scroll = ScrollOffsets::default();
    let mut timeline_scroll = PaneScroll::default();
    let mut titles_scroll = PaneScroll::default();
    let mut frame_scheduled = false;
    let mut last_drag: Option<(u16, u16)> = None;

    loop {
        let now = epoch.elapsed();
        if frame_scheduled {
            frame_scheduled = sync.on_frame(now, &mut timeline_scroll, &mut titles_scroll)
                == FrameRequest::Schedule;
        }

        let size = terminal.size()?;
        let header = Rect::new(TITLE_COLS, 1, size.width.saturating_sub(TITLE_COLS), 1);
        let titles = Rect::new(0, 2, TITLE_COLS.min(size.width), size.height.saturating_sub(2));
        let body = Rect::new(
            TITLE_COLS,
            2,
            size.width.saturating_sub(TITLE_COLS),
            size.height.saturating_sub(2),
        );

        terminal.draw(|frame| {
            let area = frame.area();
            let status = format!(
                " agenda-grid | {} tracks | {} sessions | sync: {:?} | arrows/wheel/drag scroll | q quit ",
                layout.tracks.len(),
                layout.session_count(),
                sync.phase()
            );
            let buf = frame.buffer_mut();
            let status_style = style(ThemeToken::TimelineText, ThemeToken::Border);
            fill(buf, area, 0, 0, i64::from(area.width), 1, status_style);
            put_str(buf, area, 0, 0, &status, status_style);

            draw_timeline(buf, header, layout, timeline_scroll.left);
            draw_titles(buf, titles, layout, titles_scroll.top);
            draw_body(buf, body, layout, body_scroll);
        })?;

        let timeout = if frame_scheduled {
            FALLBACK_FRAME_INTERVAL
        } else {
            IDLE_POLL
        };
        if !event::poll(timeout)? {
            continue;
        }

        let before = body_scroll;
        let mut kind = ScrollEventKind::Scroll;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Left => body_scroll.left -= 60.0,
                KeyCode::Right => body_scroll.left += 60.0,
                KeyCode::Up => body_scroll.top -= PX_PER_LINE,
                KeyCode::Down => body_scroll.top += PX_PER_LINE,
                KeyCode::PageUp => body_scroll.top -= f64::from(body.height) * PX_PER_LINE,
                KeyCode::PageDown => body_scroll.top += f64::from(body.height) * PX_PER_LINE,
                KeyCode::Home => body_scroll = ScrollOffsets::default(),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => body_scroll.top += PX_PER_LINE,
                MouseEventKind::ScrollUp => body_scroll.top -= PX_PER_LINE,
                MouseEventKind::ScrollLeft => body_scroll.left -= 4.0 * PX_PER_COL,
                MouseEventKind::ScrollRight => body_scroll.left += 4.0 * PX_PER_COL,
                MouseEventKind::Drag(_) => {
                    kind = ScrollEventKind::TouchMove;
                    if let Some((col, row)) = last_drag {
                        body_scroll.left -= (f64::from(mouse.column) - f64::from(col)) * PX_PER_COL;
                        body_scroll.top -= (f64::from(mouse.row) - f64::from(row)) * PX_PER_LINE;
                    }
                    last_drag = Some((mouse.column, mouse.row));
                }
                MouseEventKind::Up(_) => last_drag = None,
                _ => {}
            },
            _ => {}
        }
        clamp(&mut body_scroll, layout, body);

        if body_scroll != before
            && sync.on_scroll(kind, body_scroll, epoch.elapsed()) == FrameRequest::Schedule
        {
            frame_scheduled = true;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_to_area() {
        let area = Rect::new(2, 1, 4, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 4));
        put_str(&mut buf, area, -1, 0, "abcdef", Style::default());
        assert_eq!(buf[(2, 1)].symbol(), "b");
        assert_eq!(buf[(5, 1)].symbol(), "e");
        assert_eq!(buf[(6, 1)].symbol(), " ");
        put_str(&mut buf, area, 0, 5, "zz", Style::default());
        assert_eq!(buf[(2, 3)].symbol(), " ");
    }

    #[test]
    fn pixel_to_cell_mapping() {
        assert_eq!(to_col(240.0), 30);
        assert_eq!(to_col(-1.0), -1);
        assert_eq!(to_line(150.0), 3);
    }
}
