// Vector drawing primitives produced by the renderers.
//
// Coordinates are output coordinates: millimetres, origin at the top-left
// corner of the paper, y pointing down.

/// One step of an SVG-style transform list. Angles are in degrees,
/// clockwise on screen (y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(f64, f64),
    Rotate(f64),
}

/// Text style attributes emitted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub anchor: String,
    pub font: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    DrawLine {
        start: (f64, f64),
        end: (f64, f64),
        width: f64,
    },
    DrawCircle {
        center: (f64, f64),
        radius: f64,
        width: f64,
    },
    /// Text inserted at the origin of its own transformed frame
    DrawText {
        content: String,
        transform: Vec<TransformOp>,
        style: TextStyle,
    },
}

/// A complete page: paper size plus an ordered list of commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl Drawing {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawLine { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawText { .. }))
    }
}

/// 2D affine matrix `[a c e; b d f]`, same layout as SVG `matrix()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_op(op: TransformOp) -> Self {
        match op {
            TransformOp::Translate(x, y) => Affine {
                e: x,
                f: y,
                ..Self::IDENTITY
            },
            TransformOp::Rotate(deg) => {
                let (sin, cos) = deg.to_radians().sin_cos();
                Affine {
                    a: cos,
                    b: sin,
                    c: -sin,
                    d: cos,
                    e: 0.0,
                    f: 0.0,
                }
            }
        }
    }

    /// `self * other`: `other` is applied first
    fn then(self, other: Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Compose a transform list the way SVG does: later entries act in the
    /// frame established by earlier ones.
    pub fn compose(ops: &[TransformOp]) -> Affine {
        ops.iter()
            .fold(Self::IDENTITY, |acc, &op| acc.then(Self::from_op(op)))
    }

    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Rotation of the x axis in degrees
    pub fn rotation(&self) -> f64 {
        self.b.atan2(self.a).to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_translate_only() {
        let m = Affine::compose(&[TransformOp::Translate(3.0, 4.0)]);
        assert_eq!(m.apply((0.0, 0.0)), (3.0, 4.0));
    }

    #[test]
    fn test_offset_is_applied_in_rotated_frame() {
        let m = Affine::compose(&[
            TransformOp::Translate(10.0, 20.0),
            TransformOp::Rotate(90.0),
            TransformOp::Translate(2.0, 0.0),
        ]);
        // +x in the rotated frame points down the page
        assert!(close(m.apply((0.0, 0.0)), (10.0, 22.0)));
        assert!((m.rotation() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotations_add_up() {
        let m = Affine::compose(&[TransformOp::Rotate(30.0), TransformOp::Rotate(-75.0)]);
        assert!((m.rotation() + 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_drawing_filters() {
        let mut d = Drawing::new(10.0, 10.0);
        d.push(DrawCommand::DrawLine {
            start: (0.0, 0.0),
            end: (1.0, 1.0),
            width: 0.1,
        });
        d.push(DrawCommand::DrawCircle {
            center: (5.0, 5.0),
            radius: 2.0,
            width: 0.1,
        });
        assert_eq!(d.lines().count(), 1);
        assert_eq!(d.texts().count(), 0);
    }
}
