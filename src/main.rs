mod build_info;
mod core;
mod games;
mod input;
mod scores;
mod ui;
mod utils;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::core::clock::FrameClock;
use crate::core::sched::FrameScheduler;
use crate::core::sound::{BellSink, SoundSink};
use crate::games::{ActiveGame, GameKind};
use crate::scores::HighScores;
use crate::ui::HudInfo;

/// Input poll budget per frame, in milliseconds.
const FRAME_POLL_MS: u64 = 16;

/// Consecutive draw failures tolerated before the loop gives up. A single
/// bad frame is logged and skipped; a wall of them means the terminal is
/// gone for good.
const MAX_FRAME_FAILURES: u32 = 30;

enum Screen {
    Menu,
    Playing,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "arcade {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Arcade - a terminal arcade cabinet\n");
                println!("Usage: arcade\n");
                println!("Options:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'arcade --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal);

    // Teardown even when the app errored
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    result
}

/// One run of one game, plus its record bookkeeping.
struct GameSession {
    game: ActiveGame,
    best_at_launch: u64,
    new_record: bool,
    submitted: bool,
}

impl GameSession {
    fn launch(kind: GameKind, scores: &HighScores) -> Self {
        Self {
            game: ActiveGame::launch(kind),
            best_at_launch: scores.best(kind.score_key()),
            new_record: false,
            submitted: false,
        }
    }

    fn hud(&self) -> HudInfo {
        let best = if self.new_record {
            self.game.session_score()
        } else {
            self.best_at_launch
        };
        HudInfo {
            best,
            new_record: self.new_record,
        }
    }

    /// Submit the session score once; the table only changes on strict
    /// improvement. A failed save is logged away and ignored - a lost high
    /// score never kills the session.
    fn finish(&mut self, scores: &mut HighScores) {
        if self.submitted {
            return;
        }
        self.submitted = true;
        let key = self.game.kind().score_key();
        self.new_record = scores.submit(key, self.game.session_score());
        scores.save().ok();
    }
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let mut scores = HighScores::load();
    let mut rng = rand::thread_rng();
    let mut sink = BellSink;

    let mut screen = Screen::Menu;
    let mut selected = 0usize;
    let mut session: Option<GameSession> = None;

    // The one authoritative frame driver: a single clock and a single
    // scheduler. Stalls rebaseline the clock; nothing ever starts a second
    // stepping loop.
    let mut clock = FrameClock::new();
    let mut sched = FrameScheduler::new();
    let mut frame_failures: u32 = 0;

    loop {
        match screen {
            Screen::Menu => {
                terminal.draw(|f| ui::menu_scene::render(f, f.size(), selected, &scores))?;

                if event::poll(Duration::from_millis(100))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        match key.code {
                            KeyCode::Up | KeyCode::Char('k') => {
                                selected = selected.saturating_sub(1);
                            }
                            KeyCode::Down | KeyCode::Char('j') => {
                                selected = (selected + 1).min(GameKind::ALL.len() - 1);
                            }
                            KeyCode::Enter | KeyCode::Char(' ') => {
                                let kind = GameKind::from_index(selected);
                                session = Some(GameSession::launch(kind, &scores));
                                let now = Instant::now();
                                clock.reset(now);
                                sched.start(now);
                                screen = Screen::Playing;
                            }
                            KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                            _ => {}
                        }
                    }
                }
            }

            Screen::Playing => {
                let Some(sess) = session.as_mut() else {
                    screen = Screen::Menu;
                    continue;
                };

                // Draw. A transient failure skips the frame; the loop stays
                // alive unless failures pile up back to back.
                let hud = sess.hud();
                match terminal.draw(|f| ui::draw_game(f, f.size(), &sess.game, &hud)) {
                    Ok(_) => frame_failures = 0,
                    Err(err) => {
                        frame_failures += 1;
                        if frame_failures >= MAX_FRAME_FAILURES {
                            return Err(err);
                        }
                    }
                }

                // Input
                if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind == KeyEventKind::Press {
                            if sess.game.is_over() {
                                // Any key leaves the game-over screen
                                sched.stop();
                                session = None;
                                screen = Screen::Menu;
                                continue;
                            }
                            if key.code == KeyCode::Esc {
                                // Abandoning the run still submits its score
                                sess.finish(&mut scores);
                                sched.stop();
                                session = None;
                                screen = Screen::Menu;
                                continue;
                            }
                            if let Some(intent) = input::map_key(sess.game.kind(), key) {
                                sess.game.process_intent(intent);
                            }
                        }
                    }
                }

                // Step. Stall recovery is a clock rebaseline, so the missed
                // time is forgotten rather than replayed.
                let now = Instant::now();
                if sched.check_stall(now) {
                    clock.reset(now);
                }
                let dt = clock.tick(now);
                sess.game.advance(dt, &mut rng);
                sched.observe_frame(now);

                for cue in sess.game.drain_cues() {
                    sink.play(cue);
                }

                if sess.game.is_over() {
                    sess.finish(&mut scores);
                }
            }
        }
    }
}
