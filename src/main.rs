use clap::Parser;
use crossterm::{
    event::{read as event_read, Event as CrosstermEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use fresh_panel::{
    buffer::{LineBuffer, LineSource},
    config::Config,
    diagnostics::{DiagnosticMarker, DiagnosticSet, Severity},
    model::{CursorState, SourceLocation},
    theme::StyleRegistry,
    ui::{PanelRenderInput, SplitRenderer},
    view::{
        surface::RowWriter, ui::WrappingLayout, CellGrid, FrameSurface, Panel, PanelId,
        PanelSettings, PresentationContext, StatusMessages, Surface,
    },
};
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::{
    io::{self, stdout},
    path::PathBuf,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Render one editor panel of a file
#[derive(Parser, Debug)]
#[command(name = "fresh-panel")]
#[command(about = "Render a file the way an editor panel shows it", long_about = None)]
#[command(version)]
struct Args {
    /// File to show, optionally with a 1-based cursor position
    #[arg(value_name = "FILE[:LINE[:COL]]")]
    file: String,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for renderer diagnostics
    #[arg(long, value_name = "PATH", default_value = "/tmp/fresh-panel.log")]
    log_file: PathBuf,

    /// Render once and print the rows to stdout instead of opening the terminal UI
    #[arg(long)]
    dump: bool,

    /// Surface width for --dump
    #[arg(long, default_value = "80")]
    width: u16,

    /// Surface height for --dump
    #[arg(long, default_value = "24")]
    height: u16,

    /// Show the file in two panels; the right-hand one has focus
    #[arg(long)]
    split: bool,

    /// Select from LINE:COL (1-based) to the cursor
    #[arg(long, value_name = "LINE:COL", value_parser = parse_line_col)]
    select: Option<(usize, usize)>,

    /// Add a gutter marker; may be repeated
    #[arg(long = "mark", value_name = "LINE:SEVERITY:MESSAGE", value_parser = parse_marker)]
    marks: Vec<DiagnosticMarker>,
}

/// Parsed file location from CLI argument in file:line:col format
#[derive(Debug)]
struct FileLocation {
    path: PathBuf,
    line: Option<usize>,
    column: Option<usize>,
}

/// Split a trailing `:NUMBER` off `input`
fn split_number_suffix(input: &str) -> Option<(&str, usize)> {
    let (rest, suffix) = input.rsplit_once(':')?;
    let number = suffix.parse::<usize>().ok()?;
    (!rest.is_empty()).then_some((rest, number))
}

/// Parse `file`, `file:line` or `file:line:col`
///
/// An existing file is taken as-is, so names that themselves end in `:N` still
/// open.
fn parse_file_location(input: &str) -> FileLocation {
    let full_path = PathBuf::from(input);
    if full_path.is_file() {
        return FileLocation {
            path: full_path,
            line: None,
            column: None,
        };
    }

    if let Some((rest, column)) = split_number_suffix(input) {
        if let Some((path, line)) = split_number_suffix(rest) {
            return FileLocation {
                path: PathBuf::from(path),
                line: Some(line),
                column: Some(column),
            };
        }
        // Only one number: it is the line
        return FileLocation {
            path: PathBuf::from(rest),
            line: Some(column),
            column: None,
        };
    }

    FileLocation {
        path: full_path,
        line: None,
        column: None,
    }
}

fn parse_line_col(s: &str) -> Result<(usize, usize), String> {
    let (line, col) = s
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got '{}'", s))?;
    let line = line.parse().map_err(|_| format!("invalid line '{}'", line))?;
    let col = col.parse().map_err(|_| format!("invalid column '{}'", col))?;
    Ok((line, col))
}

fn parse_marker(s: &str) -> Result<DiagnosticMarker, String> {
    let mut parts = s.splitn(3, ':');
    let (Some(line), Some(severity), Some(message)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected LINE:SEVERITY:MESSAGE, got '{}'", s));
    };
    let line: usize = line.parse().map_err(|_| format!("invalid line '{}'", line))?;
    if line == 0 {
        return Err("lines are numbered from 1".to_string());
    }
    let severity: Severity = severity.parse()?;
    Ok(DiagnosticMarker::new(line - 1, severity, message))
}

/// Clamp a 1-based line/column pair onto the buffer, 0-based
fn clamp_location(buffer: &LineBuffer, line: usize, column: usize) -> SourceLocation {
    let last_line = buffer.line_count().saturating_sub(1);
    let line = line.saturating_sub(1).min(last_line);
    let column = column.saturating_sub(1).min(buffer.line_char_len(line));
    SourceLocation::new(column, line)
}

/// Everything needed to draw a frame
struct Session {
    buffer: LineBuffer,
    cursor: CursorState,
    diagnostics: DiagnosticSet,
    styles: StyleRegistry,
    settings: PanelSettings,
    split: bool,
}

impl Session {
    fn load(args: &Args) -> io::Result<Self> {
        let config = if let Some(config_path) = &args.config {
            match Config::load_from_file(config_path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!(
                        "Error: Failed to load config from {}: {}",
                        config_path.display(),
                        e
                    );
                    return Err(io::Error::new(io::ErrorKind::InvalidData, e.to_string()));
                }
            }
        } else {
            Config::load_or_default()
        };
        let styles = StyleRegistry::from_config(&config)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

        let location = parse_file_location(&args.file);
        let buffer = LineBuffer::load_from_file(&location.path)?;
        tracing::info!(
            "Loaded {} ({} lines)",
            location.path.display(),
            buffer.line_count()
        );

        let head = clamp_location(
            &buffer,
            location.line.unwrap_or(1),
            location.column.unwrap_or(1),
        );
        let cursor = match args.select {
            Some((line, col)) => CursorState::selecting(clamp_location(&buffer, line, col), head),
            None => CursorState::at(head),
        };

        let mut diagnostics = DiagnosticSet::new();
        diagnostics.set_owner("cli", args.marks.clone());

        Ok(Self {
            buffer,
            cursor,
            diagnostics,
            styles,
            settings: PanelSettings::from(&config.editor),
            split: args.split,
        })
    }

    /// Panels covering `area`, paired with whether each has focus
    fn panels(&self, area: Rect) -> Vec<(Panel, bool)> {
        let height = area.height as usize;
        let top_line = self.cursor.line().saturating_sub(height.saturating_sub(1));
        let left_column = if self.settings.soft_wrap {
            0
        } else {
            self.cursor.location.column.saturating_sub(area.width as usize / 2)
        };

        if !self.split {
            let panel = Panel::new(PanelId(0), area, self.settings).with_scroll(top_line, left_column);
            return vec![(panel, true)];
        }

        let left_width = area.width / 2;
        let left = Rect::new(area.x, area.y, left_width, area.height);
        let right = Rect::new(area.x + left_width, area.y, area.width - left_width, area.height);
        vec![
            (Panel::new(PanelId(0), left, self.settings).with_scroll(top_line, 0), false),
            (Panel::new(PanelId(1), right, self.settings).with_scroll(top_line, left_column), true),
        ]
    }

    /// Draw the panels plus a one-row message bar at the bottom
    fn draw<S: Surface + ?Sized>(
        &self,
        ctx: &mut PresentationContext<StatusMessages>,
        surface: &mut S,
    ) {
        let area = surface.area();
        if area.width == 0 || area.height < 2 {
            return;
        }
        let panel_area = Rect::new(area.x, area.y, area.width, area.height - 1);
        let layout = WrappingLayout::new(self.settings.soft_wrap);

        for (panel, is_active) in self.panels(panel_area) {
            let output = SplitRenderer::render_panel(
                PanelRenderInput {
                    panel: &panel,
                    buffer: &self.buffer,
                    layout: &layout,
                    cursor: &self.cursor,
                    diagnostics: &self.diagnostics,
                    styles: &self.styles,
                    is_active,
                },
                ctx,
                surface,
            );
            tracing::debug!("Rendered panel {:?}: {:?}", panel.id, output);
        }

        let bar_y = area.bottom() - 1;
        let style = self.styles.default_style();
        let mut writer = RowWriter::new(surface, area.x, bar_y, area.right());
        writer.put_str(ctx.messages().current().unwrap_or(""), style);
        writer.fill_to_end(style);
    }
}

fn main() -> io::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    if args.dump {
        // Log to stderr so it doesn't interfere with the rows on stdout
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
            .init();

        let session = Session::load(&args)?;
        return run_dump(&session, args.width, args.height);
    }

    // Initialize tracing - log to a file to avoid interfering with terminal UI
    // Fall back to no logging if the log file can't be created
    if let Ok(log_file) = std::fs::File::create(&args.log_file) {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::sync::Arc::new(log_file)))
            .with(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
            .init();
    }

    tracing::info!("Panel viewer starting");
    let session = Session::load(&args)?;

    // Set up panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        original_hook(panic);
    }));

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_until_key(&session, &mut terminal);

    // Clean up terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Render once into an off-screen grid and print it
fn run_dump(session: &Session, width: u16, height: u16) -> io::Result<()> {
    let mut grid = CellGrid::new(width, height);
    let mut ctx = PresentationContext::new(StatusMessages::new());
    session.draw(&mut ctx, &mut grid);

    for line in grid.to_lines() {
        println!("{}", line);
    }
    tracing::info!("Cursor at {:?}", grid.cursor());
    Ok(())
}

/// Draw the session, redrawing on resize, until a key is pressed
fn run_until_key(
    session: &Session,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> io::Result<()> {
    let mut ctx = PresentationContext::new(StatusMessages::new());
    loop {
        terminal.draw(|frame| {
            let mut surface = FrameSurface::new(frame);
            session.draw(&mut ctx, &mut surface);
        })?;

        match event_read()? {
            // Only key presses; Windows also reports releases
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                tracing::debug!("Key {:?} pressed, exiting", key_event.code);
                return Ok(());
            }
            CrosstermEvent::Resize(w, h) => {
                tracing::debug!("Terminal resized to {}x{}", w, h);
            }
            _ => {}
        }
    }
}
