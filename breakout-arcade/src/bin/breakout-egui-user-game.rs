use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};

use anyhow::anyhow;
use egui::{Align2, Color32, Context, FontId, Id, LayerId, Order, Painter, Pos2, Vec2};

use breakout_arcade::breakout::app_game_drawer::AppGameDrawer;
use breakout_arcade::breakout::mechanics::MENU_HEIGHT;
use breakout_arcade::breakout::{GameEvent, GameLoop, GameLoopHandle, PaddleDirection, SharedGame};
use breakout_arcade::util::init_logging;

pub const FRAME_SIZE_X: i32 = 600;
pub const FRAME_SIZE_Y: i32 = 800;

pub struct BreakoutApp {
    game: SharedGame,
    game_loop: Option<GameLoopHandle>,
    game_events: Receiver<GameEvent>,
    message: Option<&'static str>,
}

impl BreakoutApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        game: SharedGame,
    ) -> Self {
        let (sender, game_events) = mpsc::channel();
        let game_loop = match GameLoop::new(game.clone(), repaint_observer(cc.egui_ctx.clone(), sender)).start() {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("could not start the game: {e:#}");
                None
            }
        };
        Self {
            game,
            game_loop,
            game_events,
            message: None,
        }
    }

    fn read_ui_control(
        &self,
        ctx: &Context,
    ) {
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A)) {
            self.game.move_paddle(PaddleDirection::Left);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D)) {
            self.game.move_paddle(PaddleDirection::Right);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::F)) {
            let fast = self.game.toggle_fast();
            log::info!("fast mode: {fast}");
        }
    }

    fn read_game_events(&mut self) {
        for event in self.game_events.try_iter() {
            match event {
                GameEvent::Won => self.message = Some("All Bricks Destroyed. You Win!"),
                GameEvent::Lost => self.message = Some("You Lost All Of Your Lives. Game Over!"),
                GameEvent::StateChanged => {}
            }
        }
    }

    fn draw_game_content(&self, painter: &Painter) {
        let paint_offset = painter.clip_rect().min;
        let canvas_size = painter.clip_rect().size();

        let drawer = AppGameDrawer::new(canvas_size, self.game.snapshot());
        for mut shape in drawer.shapes() {
            shape.translate(paint_offset.to_vec2());
            painter.add(shape);
        }

        let line_height = MENU_HEIGHT as f32 / 2.0;
        for (idx, label) in drawer.labels().into_iter().enumerate() {
            painter.text(
                paint_offset + Vec2::new(100.0, 4.0 + idx as f32 * line_height),
                Align2::LEFT_TOP,
                label,
                FontId::proportional(14.0),
                Color32::WHITE,
            );
        }
    }

    fn show_message(&mut self, ctx: &Context) {
        if let Some(message) = self.message {
            egui::Window::new("Breakout")
                .collapsible(false)
                .resizable(false)
                .default_pos(Pos2::new(FRAME_SIZE_X as f32 / 3.0, FRAME_SIZE_Y as f32 / 2.0))
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.message = None;
                    }
                });
        }
    }

    /// A loop that ended on its own (fatal tick or panic) leaves the window open on the last state
    fn check_game_loop(&mut self) {
        if !self.game_loop.as_ref().is_some_and(GameLoopHandle::is_finished) {
            return;
        }
        if let Some(game_loop) = self.game_loop.take() {
            match game_loop.join() {
                Ok(()) => log::info!("game loop finished"),
                Err(e) => log::error!("{e:#}"),
            }
            if self.message.is_none() {
                self.message = Some("The game has stopped.");
            }
        }
    }

    fn stop_game_loop(&mut self) {
        if let Some(game_loop) = self.game_loop.take() {
            game_loop.stop();
            if let Err(e) = game_loop.join() {
                log::error!("{e:#}");
            }
        }
    }
}

/// Hands every event over to the egui thread - the game loop thread never paints itself
fn repaint_observer(egui_ctx: Context, sender: Sender<GameEvent>) -> impl Fn(GameEvent) + Send {
    move |event: GameEvent| {
        if event != GameEvent::StateChanged {
            let _ = sender.send(event);
        }
        egui_ctx.request_repaint();
    }
}

impl eframe::App for BreakoutApp {
    fn update(
        &mut self,
        ctx: &Context,
        frame: &mut eframe::Frame,
    ) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.stop_game_loop();
            frame.close();
            return;
        }
        frame.set_window_size(Vec2::new(FRAME_SIZE_X as f32, FRAME_SIZE_Y as f32));

        self.read_ui_control(ctx);
        self.read_game_events();
        self.check_game_loop();

        let game_painter = ctx.layer_painter(LayerId::new(Order::Background, Id::new("game")));
        self.draw_game_content(&game_painter);
        self.show_message(ctx);
    }

    fn on_exit(
        &mut self,
        _: Option<&eframe::glow::Context>,
    ) {
        self.stop_game_loop();
    }
}

fn breakout_user_game() -> anyhow::Result<()> {
    let game = SharedGame::new(FRAME_SIZE_X, FRAME_SIZE_Y)?;

    let mut native_options = eframe::NativeOptions::default();
    native_options.default_theme = eframe::Theme::Dark;
    native_options.initial_window_size = Some(Vec2::new(FRAME_SIZE_X as f32, FRAME_SIZE_Y as f32));
    eframe::run_native("Breakout", native_options, Box::new(move |cc| {
        Box::new(BreakoutApp::new(cc, game))
    }))
        .map_err(|e| anyhow!("breakout window failed: {e}"))
}

fn main() -> anyhow::Result<()> {
    init_logging();
    breakout_user_game()
}
