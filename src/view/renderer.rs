use crate::controller::Mode;
use crate::variables_model::{EditorField, ListFocus};
use super::view_model::{EnvironmentSection, ListBody, ListRender, OverlayRender, RowRender, VisibilityToggle};
use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, size},
};
use std::io::{self, Write, stdout};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const EMPTY_LIST: &str = "No variables in this environment.";
pub const EMPTY_SYSTEM_LIST: &str = "No system variables.";
pub const LOADING: &str = "Loading variables...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Title,
    Muted,
    Selected,
    Disabled,
    Editor,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub text: String,
    pub style: LineStyle,
}

impl ScreenLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self { text: text.into(), style }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Normal)
    }
}

#[derive(Clone)]
pub struct RenderParams<'a> {
    pub mode: &'a Mode,
    pub input_buffer: &'a str,
    pub status_message: &'a str,
    pub environment_info: Option<&'a str>,
}

pub struct View {
    last_lines: Vec<ScreenLine>,
    last_status: String,
    last_terminal_size: (u16, u16),
    scroll_offset: usize,
    needs_full_redraw: bool,
    render_count: usize,
    name_width: usize,
}

impl View {
    pub fn new() -> Self {
        Self {
            last_lines: Vec::new(),
            last_status: String::new(),
            last_terminal_size: (0, 0),
            scroll_offset: 0,
            needs_full_redraw: true,
            render_count: 0,
            name_width: 24,
        }
    }

    pub fn set_name_width(&mut self, width: usize) {
        if self.name_width != width {
            self.name_width = width;
            self.needs_full_redraw = true;
        }
    }

    pub fn name_width(&self) -> usize {
        self.name_width
    }

    pub fn force_redraw(&mut self) {
        self.needs_full_redraw = true;
    }

    pub fn render(&mut self, overlay: &OverlayRender, params: &RenderParams<'_>) -> io::Result<()> {
        let (width, height) = size()?;
        self.render_count += 1;

        // Force full redraw every 50 renders to prevent state drift
        if self.render_count % 50 == 0 {
            self.needs_full_redraw = true;
        }

        if self.last_terminal_size != (width, height) {
            self.needs_full_redraw = true;
            self.last_terminal_size = (width, height);
        }

        if self.needs_full_redraw {
            execute!(stdout(), Clear(ClearType::All))?;
            self.needs_full_redraw = false;
            self.last_lines.clear();
            self.last_status.clear();
        }

        let body_height = (height as usize).saturating_sub(1);
        let (lines, cursor_line) = layout_overlay(overlay, params.environment_info, width as usize, self.name_width);
        self.adjust_scroll(cursor_line, body_height);

        let visible: Vec<ScreenLine> = lines
            .into_iter()
            .skip(self.scroll_offset)
            .take(body_height)
            .collect();

        let mut out = stdout();
        for (i, line) in visible.iter().enumerate() {
            if self.last_lines.get(i) != Some(line) {
                queue!(out, cursor::MoveTo(0, i as u16), Clear(ClearType::CurrentLine))?;
                draw_line(&mut out, line, width as usize)?;
            }
        }
        // Clear any extra lines if the new content is shorter
        for i in visible.len()..self.last_lines.len().min(body_height) {
            queue!(out, cursor::MoveTo(0, i as u16), Clear(ClearType::CurrentLine))?;
        }
        self.last_lines = visible;

        let status = status_text(params);
        if self.last_status != status {
            queue!(
                out,
                cursor::MoveTo(0, height.saturating_sub(1)),
                Clear(ClearType::CurrentLine),
                Print(fit(&status, width as usize))
            )?;
            self.last_status = status;
        }

        match params.mode {
            Mode::Filter => {
                let column = UnicodeWidthStr::width(params.input_buffer) + 1;
                queue!(out, cursor::MoveTo(column as u16, height.saturating_sub(1)), cursor::Show)?;
            }
            _ => queue!(out, cursor::Hide)?,
        }
        out.flush()
    }

    fn adjust_scroll(&mut self, cursor_line: Option<usize>, visible_lines: usize) {
        let Some(line) = cursor_line else {
            return;
        };
        if line < self.scroll_offset {
            self.scroll_offset = line;
            self.needs_full_redraw = true;
        } else if visible_lines > 0 && line >= self.scroll_offset + visible_lines {
            self.scroll_offset = line - visible_lines + 1;
            self.needs_full_redraw = true;
        }
    }
}

impl Default for View {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_line(out: &mut impl Write, line: &ScreenLine, width: usize) -> io::Result<()> {
    let text = fit(&line.text, width);
    match line.style {
        LineStyle::Normal => queue!(out, Print(text)),
        LineStyle::Title => queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset)
        ),
        LineStyle::Muted | LineStyle::Disabled => queue!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(text),
            ResetColor
        ),
        LineStyle::Selected => queue!(
            out,
            SetBackgroundColor(Color::Cyan),
            SetForegroundColor(Color::Black),
            Print(text),
            ResetColor
        ),
        LineStyle::Editor => queue!(
            out,
            SetBackgroundColor(Color::Yellow),
            SetForegroundColor(Color::Black),
            Print(text),
            ResetColor
        ),
        LineStyle::Footer => queue!(out, SetAttribute(Attribute::Reverse), Print(text), SetAttribute(Attribute::Reset)),
    }
}

fn status_text(params: &RenderParams<'_>) -> String {
    match params.mode {
        Mode::Filter => format!("/{}", params.input_buffer),
        _ if !params.status_message.is_empty() => params.status_message.to_string(),
        Mode::Closed => "-- CLOSED -- o: open  q: quit".to_string(),
        Mode::Browse => "-- BROWSE -- a add  e edit  d delete  space toggle  v values  s system  / filter".to_string(),
        Mode::Edit => "-- EDIT -- tab next field  enter commit  esc close".to_string(),
    }
}

/// Lays out the overlay as screen lines. Also returns the index of the line
/// that must stay visible (selected row or open editor of the focused list).
pub fn layout_overlay(
    overlay: &OverlayRender,
    environment_info: Option<&str>,
    width: usize,
    name_width: usize,
) -> (Vec<ScreenLine>, Option<usize>) {
    let mut lines = Vec::new();
    let mut cursor = None;

    if !overlay.opened {
        lines.push(ScreenLine::new("Variables overlay is closed.", LineStyle::Muted));
        return (lines, None);
    }

    lines.push(ScreenLine::new(overlay.intro, LineStyle::Muted));
    lines.push(ScreenLine::blank());

    match &overlay.environment {
        EnvironmentSection::Loading => lines.push(ScreenLine::new(LOADING, LineStyle::Muted)),
        EnvironmentSection::List(list) => {
            let focused = overlay.focus == ListFocus::Environment;
            let line = layout_list(list, environment_info, focused, width, name_width, &mut lines);
            if focused {
                cursor = line;
            }
        }
    }

    if let Some(system) = &overlay.system {
        lines.push(ScreenLine::blank());
        let focused = overlay.focus == ListFocus::System;
        let line = layout_list(system, None, focused, width, name_width, &mut lines);
        if focused {
            cursor = line;
        }
    }

    lines.push(ScreenLine::blank());
    let switch = if overlay.footer.system_switch { "on" } else { "off" };
    lines.push(ScreenLine::new(
        format!(" [Esc] {}   [s] System variables: {}", overlay.footer.close_label, switch),
        LineStyle::Footer,
    ));

    (lines, cursor)
}

fn layout_list(
    list: &ListRender,
    environment_info: Option<&str>,
    focused: bool,
    width: usize,
    name_width: usize,
    lines: &mut Vec<ScreenLine>,
) -> Option<usize> {
    let mut header = match environment_info {
        Some(info) => format!("{} - {}", list.title, info),
        None => list.title.to_string(),
    };
    let mut actions = Vec::new();
    if list.add_action {
        actions.push("[a] add");
    }
    actions.push(match list.visibility {
        VisibilityToggle::Show => "[v] show values",
        VisibilityToggle::Hide => "[v] hide values",
    });
    if let Some(filter) = &list.filter {
        header.push_str(&format!("  /{filter}"));
    }
    lines.push(ScreenLine::new(
        align_right(&header, &actions.join("  "), width),
        LineStyle::Title,
    ));

    let mut cursor = None;
    match &list.body {
        ListBody::Empty => {
            let text = if list.add_action { EMPTY_LIST } else { EMPTY_SYSTEM_LIST };
            lines.push(ScreenLine::new(format!("  {text}"), LineStyle::Muted));
        }
        ListBody::Rows(rows) => {
            for row in rows {
                let (text, style) = layout_row(row, focused, name_width);
                let is_cursor = match row {
                    RowRender::Item { selected, .. } => *selected,
                    RowRender::Editor { .. } => true,
                };
                if focused && is_cursor && cursor.is_none() || row.is_editor() {
                    cursor = Some(lines.len());
                }
                lines.push(ScreenLine::new(text, style));
            }
        }
    }
    cursor
}

fn layout_row(row: &RowRender, focused: bool, name_width: usize) -> (String, LineStyle) {
    match row {
        RowRender::Item {
            name,
            value_label,
            enabled,
            selected,
            ..
        } => {
            let marker = if *enabled { '●' } else { '○' };
            let text = format!("  {marker} {} {value_label}", pad(name, name_width));
            let style = if focused && *selected {
                LineStyle::Selected
            } else if *enabled {
                LineStyle::Normal
            } else {
                LineStyle::Disabled
            };
            (text, style)
        }
        RowRender::Editor {
            name,
            value,
            enabled,
            focus,
            ..
        } => {
            let field = |label: &str, text: &str, field: EditorField| {
                if *focus == field {
                    format!("[{label}: {text}_]")
                } else {
                    format!(" {label}: {text} ")
                }
            };
            let switch = if *enabled { "on" } else { "off" };
            let text = format!(
                "  ✎ {} {} {}  [Esc] close",
                field("name", name, EditorField::Name),
                field("value", value, EditorField::Value),
                field("enabled", switch, EditorField::Enabled),
            );
            (text, LineStyle::Editor)
        }
    }
}

/// Pads or truncates `text` to exactly `width` display columns.
pub fn pad(text: &str, width: usize) -> String {
    let mut out = fit(text, width);
    let used = UnicodeWidthStr::width(out.as_str());
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Truncates `text` to at most `width` display columns.
pub fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

fn align_right(left: &str, right: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(left) + UnicodeWidthStr::width(right);
    if used + 1 > width {
        return format!("{left} {right}");
    }
    format!("{left}{}{right}", " ".repeat(width - used))
}
