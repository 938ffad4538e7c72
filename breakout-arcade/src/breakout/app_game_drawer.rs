use egui::epaint::RectShape;
use egui::{Color32, Pos2, Rect, Rounding, Shape, Vec2};

use crate::breakout::game_object::{GameObject, ObjectColor};
use crate::breakout::game_state::GameSnapshot;
use crate::util::format::format_number;

pub struct AppGameDrawer {
    canvas_size: Vec2,
    game_state: GameSnapshot,
}

impl AppGameDrawer {
    pub fn new(
        canvas_size: Vec2,
        game_state: GameSnapshot,
    ) -> Self {
        Self { canvas_size, game_state }
    }

    /// pos / MODEL_LEN = result / canvas_size
    /// => result = pos * canvas_size / MODEL_LEN
    fn scale(
        &self,
        x: i32,
        y: i32,
    ) -> Pos2 {
        Pos2::new(
            x as f32 * self.canvas_size.x / self.game_state.width as f32,
            y as f32 * self.canvas_size.y / self.game_state.height as f32,
        )
    }

    pub fn shapes(&self) -> Vec<Shape> {
        let mut result = Vec::with_capacity(self.game_state.bricks.len() + 3);
        result.push(self.background());
        result.extend(self.bricks());
        result.push(self.draw_object(&self.game_state.ball));
        result.push(self.draw_object(&self.game_state.bat));
        result
    }

    /// Info lines for the menu band at the top
    pub fn labels(&self) -> Vec<String> {
        let mut labels = vec![
            format!("Your Score = {}", format_number(self.game_state.score)),
            format!("Score (without fail) = {}", format_number(self.game_state.highscore)),
            format!("Lives Left = {}", self.game_state.lives),
        ];
        if self.game_state.fast {
            labels.push("FAST".to_string());
        }
        labels
    }

    fn background(&self) -> Shape {
        RectShape::filled(
            Rect::from_two_pos(self.scale(0, 0), self.scale(self.game_state.width, self.game_state.height)),
            Rounding::none(),
            Color32::BLACK,
        )
        .into()
    }

    /// only visible bricks get drawn
    fn bricks(&self) -> Vec<Shape> {
        self.game_state.bricks.iter()
            .filter(|b| b.is_visible())
            .map(|b| self.draw_object(b))
            .collect()
    }

    fn draw_object(
        &self,
        object: &GameObject,
    ) -> Shape {
        RectShape::filled(
            Rect::from_two_pos(self.scale(object.x, object.y), self.scale(object.right(), object.bottom())),
            Rounding::none(),
            color32(object.color()),
        )
        .into()
    }
}

fn color32(color: ObjectColor) -> Color32 {
    match color {
        ObjectColor::Red => Color32::RED,
        ObjectColor::Grey => Color32::GRAY,
        ObjectColor::Blue => Color32::BLUE,
        ObjectColor::Green => Color32::GREEN,
        ObjectColor::Yellow => Color32::YELLOW,
        ObjectColor::Orange => Color32::from_rgb(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use crate::breakout::game_state::SharedGame;

    use super::*;

    #[test]
    fn invisible_bricks_are_not_drawn() {
        let mut snapshot = SharedGame::new(400, 600).unwrap().snapshot();
        let all = AppGameDrawer::new(Vec2::new(400.0, 600.0), snapshot.clone()).shapes().len();
        assert_eq!(all, 40 + 3);
        snapshot.bricks[0].hide();
        snapshot.bricks[7].hide();
        let drawer = AppGameDrawer::new(Vec2::new(400.0, 600.0), snapshot);
        assert_eq!(drawer.shapes().len(), all - 2);
    }

    #[test]
    fn model_coordinates_scale_to_canvas() {
        let snapshot = SharedGame::new(400, 600).unwrap().snapshot();
        let drawer = AppGameDrawer::new(Vec2::new(800.0, 300.0), snapshot);
        assert_eq!(drawer.scale(400, 600), Pos2::new(800.0, 300.0));
        assert_eq!(drawer.scale(100, 200), Pos2::new(200.0, 100.0));
    }

    #[test]
    fn labels_show_score_highscore_and_lives() {
        let mut snapshot = SharedGame::new(400, 600).unwrap().snapshot();
        snapshot.score = -1200;
        snapshot.highscore = 4500;
        snapshot.lives = 2;
        snapshot.fast = true;
        let labels = AppGameDrawer::new(Vec2::new(400.0, 600.0), snapshot).labels();
        assert_eq!(labels, vec![
            "Your Score = -1,200".to_string(),
            "Score (without fail) = 4,500".to_string(),
            "Lives Left = 2".to_string(),
            "FAST".to_string(),
        ]);
    }
}
