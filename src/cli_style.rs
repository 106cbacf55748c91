//! Terminal styling shared by both binaries.

use crate::emotions::EnrichedPrediction;
use crate::report::{format_percent, score_bar};
use crate::session::{Analysis, ResultView, EMPTY_RESULT_MESSAGE, IDLE_PLACEHOLDER};
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

fn ansi(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

pub fn get_styles() -> Styles {
    Styles::styled()
        .usage(ansi(AnsiColor::Magenta).bold().underline())
        .header(ansi(AnsiColor::Magenta).bold().underline())
        .literal(ansi(AnsiColor::Cyan).bold())
        .invalid(ansi(AnsiColor::Red).bold())
        .error(ansi(AnsiColor::Red).bold())
        .valid(ansi(AnsiColor::Green))
        .placeholder(ansi(AnsiColor::BrightBlack))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Rgb { r, g, b }
    }

    pub const SUNSHINE: Color = rgb(255, 214, 10);
    pub const ROSE: Color = rgb(255, 112, 166);
    pub const LILAC: Color = rgb(179, 136, 255);
    pub const SKY: Color = rgb(92, 200, 255);
    pub const MINT: Color = rgb(72, 230, 160);
    pub const AMBER: Color = rgb(255, 159, 67);
    pub const CRIMSON: Color = rgb(255, 82, 82);
    pub const STEEL: Color = rgb(110, 140, 230);
    pub const ASH: Color = rgb(130, 130, 140);
    pub const SNOW: Color = rgb(245, 245, 250);
}

/// Chip color of an emotion; labels outside the catalog get lilac.
pub fn emotion_color(id: &str) -> CtColor {
    match id {
        "admiration" | "approval" | "gratitude" | "pride" | "relief" => colors::MINT,
        "amusement" | "excitement" | "joy" | "optimism" => colors::SUNSHINE,
        "caring" | "love" | "desire" => colors::ROSE,
        "curiosity" | "realization" | "surprise" => colors::SKY,
        "confusion" | "nervousness" | "embarrassment" | "fear" => colors::AMBER,
        "anger" | "annoyance" | "disapproval" | "disgust" => colors::CRIMSON,
        "disappointment" | "grief" | "remorse" | "sadness" => colors::STEEL,
        "neutral" => colors::SNOW,
        _ => colors::LILAC,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Glyphs
// ═══════════════════════════════════════════════════════════════════════════════

pub mod glyphs {
    /// Corner and edge pieces of a box.
    pub struct Frame {
        pub top_left: &'static str,
        pub top_right: &'static str,
        pub bottom_left: &'static str,
        pub bottom_right: &'static str,
        pub horizontal: &'static str,
        pub vertical: &'static str,
    }

    pub const ROUNDED: Frame = Frame {
        top_left: "╭",
        top_right: "╮",
        bottom_left: "╰",
        bottom_right: "╯",
        horizontal: "─",
        vertical: "│",
    };

    pub const DOUBLE: Frame = Frame {
        top_left: "╔",
        top_right: "╗",
        bottom_left: "╚",
        bottom_right: "╝",
        horizontal: "═",
        vertical: "║",
    };

    // Table column junctions
    pub const JOIN_TOP: &str = "┬";
    pub const JOIN_MIDDLE: &str = "┼";
    pub const JOIN_BOTTOM: &str = "┴";
    pub const JOIN_LEFT: &str = "├";
    pub const JOIN_RIGHT: &str = "┤";

    pub const POINTER: &str = "▶";
    pub const DOT: &str = "●";
    pub const RING: &str = "○";
    pub const GEM: &str = "◆";
    pub const STAR: &str = "★";
    pub const TICK: &str = "✓";
    pub const CROSS: &str = "✗";
}

use glyphs::Frame;

// ═══════════════════════════════════════════════════════════════════════════════
// Banner
// ═══════════════════════════════════════════════════════════════════════════════

const BANNER: [&str; 6] = [
    "    ███████╗███╗   ███╗ ██████╗ ████████╗██╗ ██████╗ ███╗   ██╗███████╗",
    "    ██╔════╝████╗ ████║██╔═══██╗╚══██╔══╝██║██╔═══██╗████╗  ██║██╔════╝",
    "    █████╗  ██╔████╔██║██║   ██║   ██║   ██║██║   ██║██╔██╗ ██║███████╗",
    "    ██╔══╝  ██║╚██╔╝██║██║   ██║   ██║   ██║██║   ██║██║╚██╗██║╚════██║",
    "    ███████╗██║ ╚═╝ ██║╚██████╔╝   ██║   ██║╚██████╔╝██║ ╚████║███████║",
    "    ╚══════╝╚═╝     ╚═╝ ╚═════╝    ╚═╝   ╚═╝ ╚═════╝ ╚═╝  ╚═══╝╚══════╝",
];

pub fn print_banner() {
    // One emotion color per row
    let gradient = [
        colors::SUNSHINE,
        colors::AMBER,
        colors::ROSE,
        colors::LILAC,
        colors::STEEL,
        colors::SKY,
    ];

    println!();
    for (line, color) in BANNER.into_iter().zip(gradient) {
        println!("{}", line.with(color).bold());
    }
    println!(
        "{}",
        "  ─────────────────────  EMOTION FINGERPRINTS  ─────────────────────".with(colors::ASH)
    );
    println!();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Lines
// ═══════════════════════════════════════════════════════════════════════════════

fn print_status(marker: &str, message: &str, color: CtColor) {
    println!(" {} {}", marker.with(color).bold(), message.with(color));
}

pub fn print_success(message: &str) {
    print_status(glyphs::TICK, message, colors::MINT);
}

pub fn print_error(message: &str) {
    print_status(glyphs::CROSS, message, colors::CRIMSON);
}

pub fn print_warning(message: &str) {
    print_status("⚠", message, colors::AMBER);
}

pub fn print_info(message: &str) {
    print_status("ℹ", message, colors::SKY);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections
// ═══════════════════════════════════════════════════════════════════════════════

/// Inner width of section frames.
const SECTION_WIDTH: usize = 64;

fn rule(frame: &Frame, width: usize, color: CtColor) -> String {
    frame.horizontal.repeat(width).with(color).to_string()
}

pub fn print_section_header(title: &str) {
    let frame = &glyphs::ROUNDED;
    let title_width = title.width() + 2;
    let left = SECTION_WIDTH.saturating_sub(title_width) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_width + left);

    println!();
    println!(
        "{}{} {} {}{}",
        frame.top_left.with(colors::SKY),
        rule(frame, left, colors::SKY),
        title.with(colors::SKY).bold().attribute(Attribute::Italic),
        rule(frame, right, colors::SKY),
        frame.top_right.with(colors::SKY)
    );
}

pub fn print_section_footer() {
    let frame = &glyphs::ROUNDED;
    println!(
        "{}{}{}",
        frame.bottom_left.with(colors::SKY),
        rule(frame, SECTION_WIDTH, colors::SKY),
        frame.bottom_right.with(colors::SKY)
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::DOT.with(colors::LILAC),
        format!("{}:", key).with(colors::ASH),
        value.with(colors::SNOW)
    );
}

pub fn print_list_item(item: &str, indent: usize) {
    println!(
        "{}{}  {}",
        "  ".repeat(indent + 1),
        glyphs::POINTER.with(colors::SKY),
        item.with(colors::SNOW)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        glyphs::RING.with(colors::ASH),
        message.with(colors::ASH).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════════════════════════

/// Column-aligned table with a header row, sized to its widest cells.
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: Vec<&str>) -> Self {
        Self {
            col_widths: headers.iter().map(|h| h.width()).collect(),
            headers: headers.into_iter().map(String::from).collect(),
            rows: Vec::new(),
        }
    }

    /// Adds a row; cells past the header count are ignored.
    pub fn add_row(&mut self, row: Vec<&str>) {
        let row: Vec<String> = row
            .into_iter()
            .take(self.headers.len())
            .map(String::from)
            .collect();
        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    fn border(&self, left: &str, join: &str, right: &str) -> String {
        let segments: Vec<String> = self
            .col_widths
            .iter()
            .map(|width| glyphs::ROUNDED.horizontal.repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(join), right)
    }

    fn line(&self, cells: &[String], color: CtColor, bold: bool) -> String {
        let separator = glyphs::ROUNDED.vertical.with(colors::SKY).to_string();
        let mut line = separator.clone();
        for (i, width) in self.col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or_default();
            let padded = format!(
                " {}{} ",
                cell,
                " ".repeat(width.saturating_sub(cell.width()))
            );
            let styled = padded.with(color);
            let styled = if bold { styled.bold() } else { styled };
            line.push_str(&format!("{}{}", styled, separator));
        }
        line
    }

    pub fn print(&self) {
        if self.col_widths.is_empty() {
            return;
        }
        let frame = &glyphs::ROUNDED;
        println!(
            "{}",
            self.border(frame.top_left, glyphs::JOIN_TOP, frame.top_right)
                .with(colors::SKY)
        );
        println!("{}", self.line(&self.headers, colors::SKY, true));
        println!(
            "{}",
            self.border(glyphs::JOIN_LEFT, glyphs::JOIN_MIDDLE, glyphs::JOIN_RIGHT)
                .with(colors::SKY)
        );
        for row in &self.rows {
            println!("{}", self.line(row, colors::SNOW, false));
        }
        println!(
            "{}",
            self.border(frame.bottom_left, glyphs::JOIN_BOTTOM, frame.bottom_right)
                .with(colors::SKY)
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Predictions
// ═══════════════════════════════════════════════════════════════════════════════

const BAR_WIDTH: usize = 30;

/// Threshold and length strip, shown once a text was classified.
pub fn print_threshold_strip(analysis: &Analysis, hint: Option<&str>) {
    let Some(hint) = hint else {
        return;
    };
    let threshold = analysis
        .threshold
        .map(|t| format!("{:.2}", t))
        .unwrap_or_else(|| "n/a".to_string());
    let length = analysis.length_type.map(|l| l.label()).unwrap_or("n/a");

    print_key_value("Threshold", &threshold);
    print_key_value("Input length", length);
    println!("    {}", hint.with(colors::ASH).attribute(Attribute::Italic));
}

pub fn print_primary_emotion(primary: &EnrichedPrediction) {
    let color = emotion_color(&primary.id);
    println!(
        "  {} {}",
        glyphs::STAR.with(colors::SUNSHINE).bold(),
        "Primary emotion".with(colors::ASH)
    );
    println!(
        "    {}  {}",
        format!(" {} ", primary.title)
            .with(colors::SNOW)
            .on(color)
            .bold(),
        format_percent(primary.score).with(color).bold()
    );
    println!("    {}", primary.description.as_str().with(colors::SNOW));
    println!();
}

pub fn print_ranking(ranking: &[EnrichedPrediction]) {
    let title_width = ranking.iter().map(|p| p.title.width()).max().unwrap_or(0);

    for emotion in ranking {
        let color = emotion_color(&emotion.id);
        let padding = title_width.saturating_sub(emotion.title.width());
        println!(
            "  {} {}{}  {} {}",
            glyphs::GEM.with(color),
            emotion.title.as_str().with(color).bold(),
            " ".repeat(padding),
            score_bar(emotion.score, BAR_WIDTH).with(color),
            format!("{:>4}", format_percent(emotion.score)).with(colors::SNOW)
        );
        println!("      {}", emotion.description.as_str().with(colors::ASH));
    }
}

/// Prints the result panel for a session view.
pub fn print_result_view(view: &ResultView, analysis: &Analysis, hint: Option<&str>) {
    print_section_header("Prediction insights");
    print_threshold_strip(analysis, hint);
    println!();

    match view {
        ResultView::Idle => print_empty_list(IDLE_PLACEHOLDER),
        ResultView::Loading => print_info("Fetching predictions from the model…"),
        ResultView::Failed(message) => print_error(message),
        ResultView::Empty => print_empty_list(EMPTY_RESULT_MESSAGE),
        ResultView::Ranked { primary, ranking } => {
            print_primary_emotion(primary);
            print_ranking(ranking);
        }
    }

    print_section_footer();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Interactive Prompt
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{}{}{} ",
        "❯".with(colors::SUNSHINE).bold(),
        "❯".with(colors::ROSE).bold(),
        "❯".with(colors::SKY).bold(),
    )
}

fn print_boxed(frame: &Frame, width: usize, content: &str, visible_width: usize) {
    println!(
        "  {}{}{}{}",
        frame.vertical.with(colors::LILAC),
        content,
        " ".repeat(width.saturating_sub(visible_width)),
        frame.vertical.with(colors::LILAC)
    );
}

pub fn print_welcome(endpoint: &str) {
    print_banner();

    let frame = &glyphs::DOUBLE;
    let width = 66;

    println!(
        "  {}{}{}",
        frame.top_left.with(colors::LILAC),
        rule(frame, width, colors::LILAC),
        frame.top_right.with(colors::LILAC)
    );

    let greeting = "  Describe any message, feedback, or scenario.";
    print_boxed(
        frame,
        width,
        &greeting.with(colors::MINT).to_string(),
        greeting.width(),
    );
    print_boxed(frame, width, "", 0);

    for (key, value) in [("Endpoint", endpoint), ("Version", env!("APP_VERSION"))] {
        let content = format!("  {} {}", format!("{}:", key).with(colors::ASH), value);
        print_boxed(frame, width, &content, key.width() + value.width() + 4);
    }

    print_boxed(frame, width, "", 0);
    let help = "  Type a text to analyze it, or /help for commands";
    print_boxed(frame, width, &help.with(colors::ASH).to_string(), help.width());

    println!(
        "  {}{}{}",
        frame.bottom_left.with(colors::LILAC),
        rule(frame, width, colors::LILAC),
        frame.bottom_right.with(colors::LILAC)
    );
    println!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Analysis,
    Information,
    System,
}

impl CommandGroup {
    const ALL: [CommandGroup; 3] = [Self::Analysis, Self::Information, Self::System];

    fn title(self) -> &'static str {
        match self {
            Self::Analysis => "Analysis",
            Self::Information => "Information",
            Self::System => "System",
        }
    }

    fn color(self) -> CtColor {
        match self {
            Self::Analysis => colors::ROSE,
            Self::Information => colors::SKY,
            Self::System => colors::AMBER,
        }
    }
}

/// A slash command listed by `/help`.
pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
    pub group: CommandGroup,
}

pub fn print_help(commands: &[CommandHelp]) {
    print_section_header("Available Commands");
    print_empty_list("Any line not starting with '/' is sent for analysis.");
    println!();

    for group in CommandGroup::ALL {
        println!(
            "  {} {}",
            glyphs::GEM.with(group.color()),
            group.title().with(group.color()).bold()
        );
        for cmd in commands.iter().filter(|c| c.group == group) {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::MINT).bold(),
                cmd.args.with(colors::ASH),
                cmd.description.with(colors::SNOW)
            );
        }
        println!();
    }

    print_section_footer();
}

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        "👋".with(colors::SKY),
        "Take care of your feelings. Goodbye!"
            .with(colors::LILAC)
            .bold()
    );
    println!();
}

pub fn flush() {
    let _ = io::stdout().flush();
}
