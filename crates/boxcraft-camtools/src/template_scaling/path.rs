//! SVG path data lexer, parser and axis-separable transforms
//!
//! Only the commands the reference templates use are understood:
//! `M L H V C Z` in both absolute and relative form.

use crate::error::{FileFormatError, FileFormatResult};
use boxcraft_core::{BoundingBox, Point2D};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Command(char),
    Number(f64),
}

/// A lexed token and its byte offset in the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathToken {
    pub kind: TokenKind,
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Start,
    Sign,
    Integer,
    LeadingDot,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

fn parse_error(position: usize, reason: impl Into<String>) -> FileFormatError {
    FileFormatError::SvgParseError {
        position,
        reason: reason.into(),
    }
}

/// Scan one number starting at `start`; returns the end offset.
///
/// A number stops at the first byte that cannot extend it, so `1-2` and
/// `.5.5` each yield two numbers.
fn scan_number(src: &str, start: usize) -> FileFormatResult<usize> {
    use NumberState::*;

    let bytes = src.as_bytes();
    let mut state = Start;
    let mut i = start;

    while let Some(&c) = bytes.get(i) {
        let next = match (state, c) {
            (Start, b'+' | b'-') => Sign,
            (Start | Sign | Integer, b'0'..=b'9') => Integer,
            (Start | Sign, b'.') => LeadingDot,
            (Integer, b'.') => Fraction,
            (LeadingDot | Fraction, b'0'..=b'9') => Fraction,
            (Integer | Fraction, b'e' | b'E') => Exponent,
            (Exponent, b'+' | b'-') => ExponentSign,
            (Exponent | ExponentSign | ExponentDigits, b'0'..=b'9') => ExponentDigits,
            _ => break,
        };
        state = next;
        i += 1;
    }

    match state {
        Integer | Fraction | ExponentDigits => Ok(i),
        Exponent | ExponentSign => Err(parse_error(i, "exponent without digits")),
        _ => Err(parse_error(start, "expected a number")),
    }
}

/// Split path data into command letters and numbers.
pub fn tokenize(d: &str) -> FileFormatResult<Vec<PathToken>> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while let Some(&c) = bytes.get(i) {
        match c {
            b' ' | b'\t' | b'\n' | b'\r' | b',' | 0x0c => i += 1,
            b'0'..=b'9' | b'+' | b'-' | b'.' => {
                let end = scan_number(d, i)?;
                let value = d[i..end]
                    .parse::<f64>()
                    .map_err(|e| parse_error(i, format!("invalid number '{}': {}", &d[i..end], e)))?;
                tokens.push(PathToken {
                    kind: TokenKind::Number(value),
                    position: i,
                });
                i = end;
            }
            c if c.is_ascii_alphabetic() => {
                tokens.push(PathToken {
                    kind: TokenKind::Command(c as char),
                    position: i,
                });
                i += 1;
            }
            _ => {
                let found = d[i..].chars().next().unwrap_or('?');
                return Err(parse_error(i, format!("unexpected character '{}'", found)));
            }
        }
    }

    Ok(tokens)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        relative: bool,
        to: Point2D,
    },
    LineTo {
        relative: bool,
        to: Point2D,
    },
    Horizontal {
        relative: bool,
        x: f64,
    },
    Vertical {
        relative: bool,
        y: f64,
    },
    CubicTo {
        relative: bool,
        ctrl1: Point2D,
        ctrl2: Point2D,
        to: Point2D,
    },
    Close {
        relative: bool,
    },
}

impl PathCommand {
    pub fn is_relative(&self) -> bool {
        match *self {
            PathCommand::MoveTo { relative, .. }
            | PathCommand::LineTo { relative, .. }
            | PathCommand::Horizontal { relative, .. }
            | PathCommand::Vertical { relative, .. }
            | PathCommand::CubicTo { relative, .. }
            | PathCommand::Close { relative } => relative,
        }
    }

    pub fn letter(&self) -> char {
        let upper = match self {
            PathCommand::MoveTo { .. } => 'M',
            PathCommand::LineTo { .. } => 'L',
            PathCommand::Horizontal { .. } => 'H',
            PathCommand::Vertical { .. } => 'V',
            PathCommand::CubicTo { .. } => 'C',
            PathCommand::Close { .. } => 'Z',
        };
        if self.is_relative() {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }
}

struct Arguments<'a> {
    tokens: &'a [PathToken],
    pos: usize,
    end_offset: usize,
}

impl Arguments<'_> {
    fn number(&mut self, letter: char) -> FileFormatResult<f64> {
        match self.tokens.get(self.pos) {
            Some(PathToken {
                kind: TokenKind::Number(value),
                ..
            }) => {
                self.pos += 1;
                Ok(*value)
            }
            Some(token) => Err(parse_error(
                token.position,
                format!("'{}' expects more numbers", letter),
            )),
            None => Err(parse_error(
                self.end_offset,
                format!("'{}' expects more numbers", letter),
            )),
        }
    }

    fn point(&mut self, letter: char) -> FileFormatResult<Point2D> {
        let x = self.number(letter)?;
        let y = self.number(letter)?;
        Ok(Point2D::new(x, y))
    }
}

/// Parse path data. Numbers following a command repeat it; after a moveto
/// they become linetos of the same case.
pub fn parse_path(d: &str) -> FileFormatResult<Vec<PathCommand>> {
    let tokens = tokenize(d)?;
    let mut args = Arguments {
        tokens: &tokens,
        pos: 0,
        end_offset: d.len(),
    };
    let mut commands = Vec::new();
    let mut current: Option<char> = None;

    while let Some(token) = tokens.get(args.pos) {
        let letter = match token.kind {
            TokenKind::Command(letter) => {
                args.pos += 1;
                letter
            }
            TokenKind::Number(_) => match current {
                Some(letter) if !matches!(letter, 'Z' | 'z') => letter,
                _ => return Err(parse_error(token.position, "number without a command")),
            },
        };

        let relative = letter.is_ascii_lowercase();
        let command = match letter.to_ascii_uppercase() {
            'M' => PathCommand::MoveTo {
                relative,
                to: args.point(letter)?,
            },
            'L' => PathCommand::LineTo {
                relative,
                to: args.point(letter)?,
            },
            'H' => PathCommand::Horizontal {
                relative,
                x: args.number(letter)?,
            },
            'V' => PathCommand::Vertical {
                relative,
                y: args.number(letter)?,
            },
            'C' => PathCommand::CubicTo {
                relative,
                ctrl1: args.point(letter)?,
                ctrl2: args.point(letter)?,
                to: args.point(letter)?,
            },
            'Z' => PathCommand::Close { relative },
            _ => {
                return Err(parse_error(
                    token.position,
                    format!("unsupported command '{}'", letter),
                ))
            }
        };

        current = Some(match letter {
            'M' => 'L',
            'm' => 'l',
            other => other,
        });
        commands.push(command);
    }

    if commands.is_empty() {
        return Err(FileFormatError::EmptyPath(d.to_string()));
    }
    Ok(commands)
}

/// Bounds of everything a path touches, Bezier control points included.
pub fn commands_bounding_box(commands: &[PathCommand]) -> BoundingBox {
    let mut bbox = BoundingBox::empty();
    let mut current = Point2D::ORIGIN;
    let mut subpath_start = Point2D::ORIGIN;

    let resolve = |relative: bool, current: Point2D, p: Point2D| {
        if relative {
            current + p
        } else {
            p
        }
    };

    for command in commands {
        match *command {
            PathCommand::MoveTo { relative, to } => {
                current = resolve(relative, current, to);
                subpath_start = current;
            }
            PathCommand::LineTo { relative, to } => {
                current = resolve(relative, current, to);
            }
            PathCommand::Horizontal { relative, x } => {
                current.x = if relative { current.x + x } else { x };
            }
            PathCommand::Vertical { relative, y } => {
                current.y = if relative { current.y + y } else { y };
            }
            PathCommand::CubicTo {
                relative,
                ctrl1,
                ctrl2,
                to,
            } => {
                bbox.include(resolve(relative, current, ctrl1));
                bbox.include(resolve(relative, current, ctrl2));
                current = resolve(relative, current, to);
            }
            PathCommand::Close { .. } => {
                current = subpath_start;
            }
        }
        bbox.include(current);
    }

    bbox
}

pub fn path_bounding_box(d: &str) -> FileFormatResult<BoundingBox> {
    Ok(commands_bounding_box(&parse_path(d)?))
}

/// `x' = scale_x * x + offset_x`, `y' = scale_y * y + offset_y`.
///
/// Relative coordinates only see the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTransform {
    pub scale_x: f64,
    pub offset_x: f64,
    pub scale_y: f64,
    pub offset_y: f64,
}

impl AxisTransform {
    pub const IDENTITY: AxisTransform = AxisTransform {
        scale_x: 1.0,
        offset_x: 0.0,
        scale_y: 1.0,
        offset_y: 0.0,
    };

    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..Self::IDENTITY
        }
    }

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self {
            offset_x: dx,
            offset_y: dy,
            ..Self::IDENTITY
        }
    }

    /// Half-turn about `center`.
    pub fn rotate_180(center: Point2D) -> Self {
        Self {
            scale_x: -1.0,
            offset_x: 2.0 * center.x,
            scale_y: -1.0,
            offset_y: 2.0 * center.y,
        }
    }

    /// `self` followed by `next`.
    pub fn then(self, next: AxisTransform) -> Self {
        Self {
            scale_x: next.scale_x * self.scale_x,
            offset_x: next.scale_x * self.offset_x + next.offset_x,
            scale_y: next.scale_y * self.scale_y,
            offset_y: next.scale_y * self.offset_y + next.offset_y,
        }
    }

    fn x(&self, x: f64, relative: bool) -> f64 {
        if relative {
            self.scale_x * x
        } else {
            self.scale_x * x + self.offset_x
        }
    }

    fn y(&self, y: f64, relative: bool) -> f64 {
        if relative {
            self.scale_y * y
        } else {
            self.scale_y * y + self.offset_y
        }
    }

    fn point(&self, p: Point2D, relative: bool) -> Point2D {
        Point2D::new(self.x(p.x, relative), self.y(p.y, relative))
    }

    /// Apply to every coordinate, keeping each command and its case.
    ///
    /// A leading relative moveto is positioned from the origin, so it is
    /// transformed as an absolute point.
    pub fn apply(&self, commands: &[PathCommand]) -> Vec<PathCommand> {
        commands
            .iter()
            .enumerate()
            .map(|(i, command)| {
                let rel = |relative: bool| relative && i > 0;
                match *command {
                    PathCommand::MoveTo { relative, to } => PathCommand::MoveTo {
                        relative,
                        to: self.point(to, rel(relative)),
                    },
                    PathCommand::LineTo { relative, to } => PathCommand::LineTo {
                        relative,
                        to: self.point(to, relative),
                    },
                    PathCommand::Horizontal { relative, x } => PathCommand::Horizontal {
                        relative,
                        x: self.x(x, relative),
                    },
                    PathCommand::Vertical { relative, y } => PathCommand::Vertical {
                        relative,
                        y: self.y(y, relative),
                    },
                    PathCommand::CubicTo {
                        relative,
                        ctrl1,
                        ctrl2,
                        to,
                    } => PathCommand::CubicTo {
                        relative,
                        ctrl1: self.point(ctrl1, relative),
                        ctrl2: self.point(ctrl2, relative),
                        to: self.point(to, relative),
                    },
                    close @ PathCommand::Close { .. } => close,
                }
            })
            .collect()
    }
}

/// Up to three decimals, trailing zeros dropped, never `-0`.
pub fn format_path_number(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Serialise commands with an explicit letter on each one.
pub fn write_path(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        d.push(command.letter());
        let numbers: Vec<f64> = match *command {
            PathCommand::MoveTo { to, .. } | PathCommand::LineTo { to, .. } => vec![to.x, to.y],
            PathCommand::Horizontal { x, .. } => vec![x],
            PathCommand::Vertical { y, .. } => vec![y],
            PathCommand::CubicTo {
                ctrl1, ctrl2, to, ..
            } => vec![ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y],
            PathCommand::Close { .. } => Vec::new(),
        };
        for n in numbers {
            let _ = write!(d, " {}", format_path_number(n));
        }
    }
    d
}
