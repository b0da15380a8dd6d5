use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{LevelFilter, info};
use markdown_stream_config::{Config, ReplayConfig};
use markdown_stream_engine::{
    Engine, RenderTree, SanitizationDecision, Stream, parsing::rope::preview, snapshot::outline,
    to_html,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::{env, fs::File, io::stdout, path::PathBuf, process, time::Duration};

/// Replays a markdown file through a stream, a few characters per tick.
struct App {
    source: String,
    offset: usize,
    chunk_size: usize,
    stream: Stream,
    tree: RenderTree,
    paused: bool,
    scroll: u16,
}

impl App {
    fn new(source: String, config: Config) -> Self {
        Self {
            source,
            offset: 0,
            chunk_size: config.replay.chunk_size.max(1),
            stream: Stream::new(Engine::default(), config.policy),
            tree: RenderTree::default(),
            paused: false,
            scroll: 0,
        }
    }

    fn finished(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Feeds the next chunk. Returns false once the file is exhausted.
    fn step(&mut self) -> bool {
        if self.finished() {
            return false;
        }
        let end = next_chunk_end(&self.source, self.offset, self.chunk_size);
        self.tree = self.stream.push(&self.source[self.offset..end]);
        self.offset = end;
        true
    }

    fn restart(&mut self) {
        self.offset = 0;
        self.tree = self.stream.replace("");
        self.scroll = 0;
    }

    fn run_to_end(&mut self) {
        while self.step() {}
    }
}

/// Byte offset `chars` characters past `offset`, clamped to the end.
fn next_chunk_end(source: &str, offset: usize, chars: usize) -> usize {
    source[offset..]
        .char_indices()
        .nth(chars)
        .map_or(source.len(), |(i, _)| offset + i)
}

fn describe(decision: &SanitizationDecision) -> String {
    format!(
        "#{}.{:?} {:?}: {:?} ({:?})",
        decision.node.block,
        decision.node.path,
        preview(decision.subject.value(), 60),
        decision.outcome,
        decision.reason
    )
}

fn init_logging(replay: &ReplayConfig, tui: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(LevelFilter::Info);

    if tui {
        // The terminal belongs to the UI, so logs only go to a file
        match &replay.log_file {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("creating log file {}", path.display()))?;
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            None => {
                builder.filter_level(LevelFilter::Off);
            }
        }
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let (path, dump) = match args.as_slice() {
        [_, path] => (PathBuf::from(path), false),
        [_, flag, path] if flag == "--dump" => (PathBuf::from(path), true),
        _ => {
            eprintln!("Usage: {} [--dump] <markdown-file>", args[0]);
            process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    init_logging(&config.replay, !dump)?;

    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {e}", path.display());
            process::exit(1);
        }
    };
    info!("replaying {} ({} bytes)", path.display(), source.len());

    let tick = Duration::from_millis(config.replay.tick_ms);
    let mut app = App::new(source, config);

    if dump {
        app.run_to_end();
        println!("{}", to_html(&app.tree));
        for decision in &app.tree.decisions {
            eprintln!("{}", describe(decision));
        }
        for diagnostic in &app.tree.diagnostics {
            eprintln!("! {diagnostic}");
        }
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app, tick);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char(' ') => app.paused = !app.paused,
                    KeyCode::Char('n') => {
                        app.step();
                    }
                    KeyCode::Char('e') => app.run_to_end(),
                    KeyCode::Char('r') => app.restart(),
                    KeyCode::Down | KeyCode::Char('j') => app.scroll = app.scroll.saturating_add(1),
                    KeyCode::Up | KeyCode::Char('k') => app.scroll = app.scroll.saturating_sub(1),
                    _ => {}
                }
            }
        } else if !app.paused {
            app.step();
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(rows[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(columns[1]);

    // Completed text, with the patched-in closers
    let completed = Paragraph::new(app.tree.completed_text())
        .block(Block::default().borders(Borders::ALL).title("Completed"))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(completed, columns[0]);

    let tree_lines: Vec<Line> = outline(&app.tree)
        .lines()
        .map(|line| {
            let style = if line.trim_start().starts_with('+') {
                Style::default().fg(Color::Green)
            } else if line.starts_with("decision") {
                Style::default().fg(Color::Yellow)
            } else if line.starts_with('!') {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            Line::from(Span::styled(line.to_string(), style))
        })
        .collect();
    let tree = Paragraph::new(tree_lines)
        .block(Block::default().borders(Borders::ALL).title("Tree"))
        .scroll((app.scroll, 0));
    f.render_widget(tree, right[0]);

    let decisions: Vec<Line> = if app.tree.decisions.is_empty() {
        vec![Line::from("No links, images or raw markup yet")]
    } else {
        app.tree
            .decisions
            .iter()
            .map(|d| Line::from(describe(d)))
            .collect()
    };
    let decisions = Paragraph::new(decisions)
        .block(Block::default().borders(Borders::ALL).title("Decisions"))
        .wrap(Wrap { trim: true });
    f.render_widget(decisions, right[1]);

    let state = if app.finished() {
        "done"
    } else if app.paused {
        "paused"
    } else {
        "streaming"
    };
    let status = Line::from(vec![
        Span::styled(
            format!(
                "{state} {}/{} bytes, cache {:?} | ",
                app.offset,
                app.source.len(),
                app.tree.cache_status
            ),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("q: Quit | Space: Pause | n: Step | e: End | r: Restart | ↑/k ↓/j: Scroll"),
    ]);
    f.render_widget(Paragraph::new(vec![status]), rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_end_stays_on_char_boundary() {
        let source = "aé€b";
        assert_eq!(next_chunk_end(source, 0, 2), 3);
        assert_eq!(next_chunk_end(source, 3, 1), 6);
        assert_eq!(next_chunk_end(source, 6, 10), source.len());
    }

    #[test]
    fn test_replay_matches_whole_text() {
        let source = "# Title\n\nSome **bold [link](https://example.com)".to_string();
        let mut app = App::new(source.clone(), Config::default());
        app.run_to_end();

        assert!(app.finished());
        assert_eq!(app.stream.text(), source);
        assert_eq!(app.tree.decisions.len(), 1);

        app.restart();
        assert_eq!(app.offset, 0);
        assert!(app.stream.text().is_empty());
    }
}
