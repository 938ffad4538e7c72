use anyhow::{anyhow, Result};

/// Presentation hint only - has no effect on gameplay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectColor {
    Red,
    Grey,
    Blue,
    Green,
    Yellow,
    Orange,
}

/// Axis-aligned rectangle which knows the direction it is moving in.
/// TOP / LEFT corner is (x, y)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameObject {
    pub x: i32,
    pub y: i32,
    width: i32,
    height: i32,
    /// sign of the horizontal direction: -1, 0 or +1
    dir_x: i32,
    /// sign of the vertical direction: -1, 0 or +1
    dir_y: i32,
    visible: bool,
    color: ObjectColor,
}

impl GameObject {
    /// # Panics
    /// On a negative `width` or `height`. All object sizes are layout constants, so this only
    /// catches a programming error.
    pub fn new(x: i32, y: i32, width: i32, height: i32, color: ObjectColor) -> Self {
        assert!(width >= 0 && height >= 0, "negative object size: {width}x{height}");
        Self {
            x,
            y,
            width,
            height,
            dir_x: 1,
            dir_y: 1,
            visible: true,
            color,
        }
    }

    pub fn width(&self) -> i32 { self.width }

    pub fn height(&self) -> i32 { self.height }

    pub fn right(&self) -> i32 { self.x + self.width }

    pub fn bottom(&self) -> i32 { self.y + self.height }

    pub fn direction(&self) -> (i32, i32) { (self.dir_x, self.dir_y) }

    pub fn color(&self) -> ObjectColor { self.color }

    pub fn is_visible(&self) -> bool { self.visible }

    /// Irreversible - there is no way to make an object visible again
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Translates the position by the current direction times the given step lengths.
    /// No bounds checking here - that's up to the caller.
    pub fn move_by(&mut self, step_x: i32, step_y: i32) {
        self.x += step_x * self.dir_x;
        self.y += step_y * self.dir_y;
    }

    /// Like [GameObject::move_by], but fails instead of leaving the representable coordinate range
    pub fn try_move_by(&mut self, step_x: i32, step_y: i32) -> Result<()> {
        let checked = |pos: i32, step: i32, dir: i32, len: i32| {
            step.checked_mul(dir)
                .and_then(|delta| pos.checked_add(delta))
                .filter(|new_pos| new_pos.checked_add(len).is_some())
        };
        let x = checked(self.x, step_x, self.dir_x, self.width)
            .ok_or_else(|| anyhow!("horizontal position overflow at x={} (step {step_x})", self.x))?;
        let y = checked(self.y, step_y, self.dir_y, self.height)
            .ok_or_else(|| anyhow!("vertical position overflow at y={} (step {step_y})", self.y))?;
        self.x = x;
        self.y = y;
        Ok(())
    }

    pub fn reverse_direction_x(&mut self) {
        self.dir_x = -self.dir_x;
    }

    pub fn reverse_direction_y(&mut self) {
        self.dir_y = -self.dir_y;
    }

    pub fn stop_horizontal_motion(&mut self) {
        self.dir_x = 0;
    }

    pub fn set_direction_x(&mut self, sign: i32) {
        self.dir_x = sign.signum();
    }

    pub fn is_horizontally_stopped(&self) -> bool {
        self.dir_x == 0
    }

    /// AABB overlap test; touching edges do not count
    pub fn collides_with(&self, other: &GameObject) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn rect(x: i32, y: i32, width: i32, height: i32) -> GameObject {
        GameObject::new(x, y, width, height, ObjectColor::Blue)
    }

    #[rstest]
    #[case(rect(0, 0, 10, 10), rect(5, 5, 10, 10), true)]
    #[case(rect(0, 0, 10, 10), rect(10, 0, 10, 10), false)]
    #[case(rect(0, 0, 10, 10), rect(0, 10, 10, 10), false)]
    #[case(rect(0, 0, 10, 10), rect(9, 9, 1, 1), true)]
    #[case(rect(0, 0, 40, 20), rect(10, 5, 16, 16), true)]
    #[case(rect(100, 100, 16, 16), rect(0, 0, 40, 20), false)]
    #[case(rect(0, 0, 120, 5), rect(-15, -15, 16, 16), true)]
    #[case(rect(0, 0, 0, 0), rect(0, 0, 10, 10), false)]
    fn collision_is_symmetric(
        #[case] a: GameObject,
        #[case] b: GameObject,
        #[case] expected: bool,
    ) {
        assert_eq!(a.collides_with(&b), expected);
        assert_eq!(b.collides_with(&a), expected);
    }

    #[test]
    fn move_by_follows_direction() {
        let mut o = rect(100, 200, 16, 16);
        o.move_by(4, 4);
        assert_eq!((o.x, o.y), (104, 204));
        o.reverse_direction_x();
        o.move_by(4, 4);
        assert_eq!((o.x, o.y), (100, 208));
        o.reverse_direction_y();
        o.move_by(4, 4);
        assert_eq!((o.x, o.y), (96, 204));
    }

    #[test]
    fn reversing_twice_restores_direction() {
        let mut o = rect(0, 0, 1, 1);
        let initial = o.direction();
        o.reverse_direction_x();
        o.reverse_direction_y();
        assert_eq!(o.direction(), (-initial.0, -initial.1));
        o.reverse_direction_x();
        o.reverse_direction_y();
        assert_eq!(o.direction(), initial);
    }

    #[test]
    fn stopped_object_does_not_move_horizontally() {
        let mut o = rect(50, 50, 10, 10);
        o.stop_horizontal_motion();
        assert!(o.is_horizontally_stopped());
        o.move_by(15, 0);
        assert_eq!(o.x, 50);
        o.set_direction_x(-7);
        assert_eq!(o.direction().0, -1);
        o.move_by(15, 0);
        assert_eq!(o.x, 35);
    }

    #[test]
    fn try_move_by_detects_overflow() {
        let mut o = rect(i32::MAX - 20, 0, 16, 16);
        assert!(o.try_move_by(4, 4).is_ok());
        assert_eq!(o.x, i32::MAX - 16);
        let err = o.try_move_by(4, 4);
        assert!(err.is_err());
        assert_eq!((o.x, o.y), (i32::MAX - 16, 4), "failed move must leave the object untouched");
    }

    #[test]
    #[should_panic(expected = "negative object size")]
    fn negative_size_is_a_programming_error() {
        GameObject::new(0, 0, -1, 5, ObjectColor::Red);
    }

    #[test]
    fn hide_is_one_way() {
        let mut o = rect(0, 0, 40, 20);
        assert!(o.is_visible());
        o.hide();
        o.hide();
        assert!(!o.is_visible());
    }
}
