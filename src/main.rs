use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use indoc::indoc;
use ratatui::Frame;
use ratatui::layout::Rect as CellRect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use pane_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use pane_wm::drivers::pointer::{PointerInput, PointerTranslator};
use pane_wm::drivers::OutputDriver;
use pane_wm::event_loop::{ControlFlow, EventLoop};
use pane_wm::{
    Animations, Behavior, ManagerConfig, TerminalBackend, WindowConfig, WindowId, WindowManager,
    tracing_sub,
};

const HELP: &str = indoc! {"
    n new window   x close   m minimize   r restore all
    s stats   q quit   drag titles to move, borders to resize
"};

#[derive(Parser, Debug)]
#[command(
    name = "pane-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Stacking window manager demo for the terminal"
)]
struct Cli {
    /// Windows to open at startup.
    #[arg(short = 'w', long = "windows", value_name = "N", default_value_t = 3)]
    windows: u16,

    /// Transition played when a window is first shown.
    #[arg(long = "open-transition", value_name = "NAME")]
    open_transition: Option<String>,

    /// Transition played before a window is destroyed.
    #[arg(long = "close-transition", value_name = "NAME")]
    close_transition: Option<String>,

    /// Highlight windows while they are being dragged.
    #[arg(long = "drag-styles")]
    drag_styles: bool,

    /// Plain titlebars without bold text.
    #[arg(long = "simple-graphics")]
    simple_graphics: bool,

    /// Base z-index for new windows.
    #[arg(long = "z-offset", value_name = "Z", default_value_t = 10)]
    z_offset: i64,

    /// Append logs to this file. Falls back to $PANE_WM_LOG; without either,
    /// logging stays off.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl From<&Cli> for ManagerConfig {
    fn from(cli: &Cli) -> Self {
        ManagerConfig {
            z_index_start_offset: cli.z_offset,
            animations: Animations {
                wnd_open: cli.open_transition.clone(),
                wnd_close: cli.close_transition.clone(),
            },
            behavior: Behavior {
                apply_drag_styles: cli.drag_styles,
                use_simple_graphics: cli.simple_graphics,
            },
        }
    }
}

struct Desktop {
    wm: WindowManager<TerminalBackend>,
    pointer: PointerTranslator,
    show_stats: bool,
    spawned: u32,
}

impl Desktop {
    fn new(area: CellRect, config: ManagerConfig) -> io::Result<Self> {
        let backend = TerminalBackend::new(area);
        let wm = WindowManager::new(backend, config).map_err(io::Error::other)?;
        Ok(Self {
            wm,
            pointer: PointerTranslator::new(),
            show_stats: false,
            spawned: 0,
        })
    }

    fn spawn_window(&mut self) {
        let step = f64::from(self.spawned % 8);
        self.spawned += 1;
        let config = WindowConfig::new()
            .title(format!("Window {}", self.spawned))
            .x(2.0 + step * 4.0)
            .y(1.0 + step * 2.0)
            .width(36.0)
            .height(12.0)
            .min_size(Some(16.0), Some(5.0));
        let id = self.wm.create_window(config);
        if let Ok(mut window) = self.wm.window_mut(id) {
            window.show();
        }
    }

    fn active_id(&self) -> Option<WindowId> {
        self.wm.active_window().map(|w| w.id())
    }

    fn on_key(&mut self, key: KeyEvent) -> ControlFlow {
        match key.code {
            KeyCode::Char('q') => return ControlFlow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ControlFlow::Quit;
            }
            KeyCode::Char('n') => self.spawn_window(),
            KeyCode::Char('x') => {
                if let Some(id) = self.active_id()
                    && let Ok(window) = self.wm.window_mut(id)
                {
                    window.close();
                }
            }
            KeyCode::Char('m') => {
                if let Some(id) = self.active_id()
                    && let Ok(mut window) = self.wm.window_mut(id)
                {
                    window.minimize();
                }
            }
            KeyCode::Char('r') => {
                let hidden: Vec<WindowId> = self
                    .wm
                    .windows()
                    .filter(|w| !w.is_visible() && !w.is_closing())
                    .map(|w| w.id())
                    .collect();
                for id in hidden {
                    if let Ok(mut window) = self.wm.window_mut(id) {
                        window.show();
                    }
                }
            }
            KeyCode::Char('s') => self.show_stats = !self.show_stats,
            _ => {}
        }
        ControlFlow::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        for input in self.pointer.translate(&mouse, Instant::now()) {
            let result = match input {
                PointerInput::Down(p) => match self.wm.backend().hit_test(p) {
                    Some(target) => self.wm.pointer_down(target, p).map(|_| ()),
                    None => Ok(()),
                },
                PointerInput::Move(p) => {
                    self.wm.pointer_move(p);
                    Ok(())
                }
                PointerInput::Up(_) => {
                    self.wm.pointer_up();
                    Ok(())
                }
                PointerInput::Click(p) => match self.wm.backend().hit_test(p) {
                    Some(target) => self.wm.click(target).map(|_| ()),
                    None => {
                        self.wm.click_container();
                        Ok(())
                    }
                },
                PointerInput::DoubleClick(p) => match self.wm.backend().hit_test(p) {
                    Some(target) => self.wm.double_click(target).map(|_| ()),
                    None => Ok(()),
                },
            };
            if let Err(err) = result {
                tracing::debug!(?input, %err, "pointer input ignored");
            }
        }
    }

    /// Drain notifications and resolve transitions that have had their frame.
    fn settle(&mut self) {
        for (id, event) in self.wm.take_events() {
            tracing::debug!(window_id = %id, event = %event, "window event");
        }
        for transition in self.wm.backend_mut().take_transitions() {
            self.wm.transition_finished(transition);
        }
    }

    fn render(&self, frame: &mut Frame) {
        self.wm.backend().render(frame);
        let area = frame.area();
        let help_height = HELP.lines().count() as u16;
        if area.height > help_height {
            let help = CellRect::new(0, area.height - help_height, area.width, help_height);
            frame.render_widget(
                Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
                help,
            );
        }
        if self.show_stats {
            let text = self.wm.stats().to_string();
            let height = (text.lines().count() as u16 + 2).min(area.height);
            let width = 44.min(area.width);
            let panel = CellRect::new(area.width - width, 0, width, height);
            frame.render_widget(Clear, panel);
            frame.render_widget(
                Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("stats")),
                panel,
            );
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    // The demo owns the screen, so logs only go to a file.
    if tracing_sub::log_path(cli.log_file.as_deref()).is_some() {
        tracing_sub::init_default(cli.log_file.as_deref())?;
    }

    let mut output = ConsoleOutputDriver::new()?;
    let mut desktop = Desktop::new(output.area()?, ManagerConfig::from(&cli))?;
    for _ in 0..cli.windows {
        desktop.spawn_window();
    }

    output.enter()?;
    let mut event_loop = EventLoop::new(ConsoleInputDriver::new(), Duration::from_millis(16));
    let result = event_loop.run(|_, event| {
        match event {
            None => {
                output.draw(|frame| desktop.render(frame))?;
                desktop.settle();
            }
            Some(Event::Key(key)) => return Ok(desktop.on_key(key)),
            Some(Event::Mouse(mouse)) => desktop.on_mouse(mouse),
            Some(Event::Resize(width, height)) => desktop
                .wm
                .backend_mut()
                .set_area(CellRect::new(0, 0, width, height)),
            Some(_) => {}
        }
        Ok(ControlFlow::Continue)
    });
    output.exit()?;
    result
}
