//! Level data parsing
//!
//! Levels are comma-separated text. The first row is a header whose column
//! count validates every following row. Row type codes:
//! `0` static platform (x,y,w,h), `1` moving platform (x,y,w,h,axis,speed,end),
//! `2` collectable (x,y,value), `3` enemy (x,y,aiType,color).
//!
//! Failures stay local: a bad row never aborts the load. Rows with the
//! wrong field count or unparseable numbers are skipped quietly, unknown
//! type codes get a user-visible warning, and an invalid moving-platform
//! axis fails that row's construction with an error.

use std::{fmt, fs, io};

use glam::Vec2;

use crate::sim::state::{AiPolicy, Axis, Collectable, Enemy, Platform};
use crate::tuning::Tuning;

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    /// Level file could not be read
    Io(io::Error),
    /// Wrong field count or unparseable number (skipped quietly)
    MalformedRow { line: usize },
    /// Moving-platform axis code was not 1 (vertical) or 2 (horizontal)
    InvalidAxis { line: usize, code: i64 },
    /// Type code outside 0-3 (reported, then skipped)
    UnknownType { line: usize, code: String },
    /// Enemy AI code outside 0-1
    UnknownAiType { line: usize, code: i64 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "level read error: {err}"),
            LevelError::MalformedRow { line } => write!(f, "malformed row at line {line}"),
            LevelError::InvalidAxis { line, code } => {
                write!(f, "bad axis value {code} at line {line} (expected 1 or 2)")
            }
            LevelError::UnknownType { line, code } => {
                write!(f, "unknown object type {code:?} at line {line}")
            }
            LevelError::UnknownAiType { line, code } => {
                write!(f, "unknown enemy AI type {code} at line {line}")
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LevelError {
    fn from(err: io::Error) -> Self {
        LevelError::Io(err)
    }
}

/// Parsed level contents, ready to seed a `GameState`.
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub collectables: Vec<Collectable>,
    pub enemies: Vec<Enemy>,
}

/// One successfully parsed row.
enum Row {
    Platform(Platform),
    Collectable(Collectable),
    Enemy(Enemy),
}

impl Level {
    /// Read and parse a level file. An I/O failure is the only fatal case;
    /// the caller is expected to fall back to an empty world, not retry.
    pub fn load(path: &str, tuning: &Tuning) -> Result<Self, LevelError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text, tuning))
    }

    /// Parse level text. Never fails as a whole; per-row failures are
    /// logged and skipped.
    pub fn parse(text: &str, tuning: &Tuning) -> Self {
        let mut level = Level::default();
        let mut lines = text.lines();
        let Some(header) = lines.next() else {
            return level;
        };
        let columns = header.split(',').count();

        for (line_no, line) in lines.enumerate().map(|(n, l)| (n + 1, l)) {
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != columns {
                log::debug!("{}", LevelError::MalformedRow { line: line_no });
                continue;
            }
            match level.parse_row(&fields, line_no, tuning) {
                Ok(Row::Platform(platform)) => level.platforms.push(platform),
                Ok(Row::Collectable(collectable)) => level.collectables.push(collectable),
                Ok(Row::Enemy(enemy)) => level.enemies.push(enemy),
                Err(err @ LevelError::MalformedRow { .. }) => log::debug!("{err}"),
                Err(err @ LevelError::UnknownType { .. }) => log::warn!("{err}"),
                Err(err @ LevelError::UnknownAiType { .. }) => log::warn!("{err}"),
                Err(err) => log::error!("{err}"),
            }
        }
        level
    }

    fn parse_row(&self, fields: &[&str], line: usize, tuning: &Tuning) -> Result<Row, LevelError> {
        match fields[0].trim() {
            "0" => {
                let [x, y, w, h] = numbers(fields, line, 1)?;
                Ok(Row::Platform(Platform::new(
                    self.platforms.len() as u32,
                    Vec2::new(x, y),
                    Vec2::new(w, h),
                )))
            }
            "1" => {
                let [x, y, w, h, axis_code, speed, end_pos] = numbers(fields, line, 1)?;
                let axis = Axis::from_code(axis_code as i64).ok_or(LevelError::InvalidAxis {
                    line,
                    code: axis_code as i64,
                })?;
                Ok(Row::Platform(Platform::moving(
                    self.platforms.len() as u32,
                    Vec2::new(x, y),
                    Vec2::new(w, h),
                    axis,
                    speed,
                    end_pos,
                )))
            }
            "2" => {
                let [x, y, value] = numbers(fields, line, 1)?;
                Ok(Row::Collectable(Collectable::new(
                    line as u32,
                    Vec2::new(x, y),
                    value as i64,
                )))
            }
            "3" => {
                let [x, y, ai_code] = numbers(fields, line, 1)?;
                let ai = AiPolicy::from_code(ai_code as i64).ok_or(LevelError::UnknownAiType {
                    line,
                    code: ai_code as i64,
                })?;
                let color = fields
                    .get(4)
                    .map(|f| f.trim().to_string())
                    .ok_or(LevelError::MalformedRow { line })?;
                Ok(Row::Enemy(Enemy::new(
                    self.enemies.len() as u32,
                    Vec2::new(x, y),
                    ai,
                    color,
                    tuning,
                )))
            }
            code => Err(LevelError::UnknownType {
                line,
                code: code.to_string(),
            }),
        }
    }
}

/// Parse N consecutive numeric fields starting at `from`. Any parse failure
/// makes the whole row malformed.
fn numbers<const N: usize>(
    fields: &[&str],
    line: usize,
    from: usize,
) -> Result<[f32; N], LevelError> {
    let mut out = [0.0f32; N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = fields
            .get(from + i)
            .and_then(|f| f.trim().parse().ok())
            .ok_or(LevelError::MalformedRow { line })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Axis, Tint};

    const HEADER: &str = "type,x,y,w,h,axis,speed,end";

    fn parse(rows: &[&str]) -> Level {
        let text = std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n");
        Level::parse(&text, &Tuning::default())
    }

    #[test]
    fn test_parse_static_platform() {
        let level = parse(&["0,10,100,200,20,0,0,0"]);
        assert_eq!(level.platforms.len(), 1);
        let platform = &level.platforms[0];
        assert_eq!(platform.id, 0);
        assert_eq!(platform.pos, Vec2::new(10.0, 100.0));
        assert_eq!(platform.size, Vec2::new(200.0, 20.0));
        assert_eq!(platform.tint, Tint::Neutral);
        assert!(platform.motion.is_none());
    }

    #[test]
    fn test_parse_moving_platform() {
        let level = parse(&["1,0,150,60,10,2,2,300"]);
        assert_eq!(level.platforms.len(), 1);
        let motion = level.platforms[0].motion.as_ref().expect("motion");
        assert_eq!(motion.axis, Axis::Horizontal);
        assert_eq!(motion.speed, 2.0);
        assert_eq!(motion.end_pos, 300.0);
        assert!(!motion.reverse);
    }

    #[test]
    fn test_parse_collectable_and_enemy() {
        let level = parse(&["2,10,10,5,0,0,0,0", "3,50,50,1,#FF0000,0,0,0"]);
        assert_eq!(level.collectables.len(), 1);
        assert_eq!(level.collectables[0].value, 5);
        assert!(level.collectables[0].active);

        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.enemies[0].ai, crate::sim::state::AiPolicy::Adventure);
        assert_eq!(level.enemies[0].color, "#FF0000");
    }

    #[test]
    fn test_wrong_field_count_skipped_silently() {
        let level = parse(&["0,10,100", "0,10,100,200,20,0,0,0"]);
        assert_eq!(level.platforms.len(), 1);
    }

    #[test]
    fn test_unparseable_number_skips_row() {
        let level = parse(&["0,ten,100,200,20,0,0,0"]);
        assert!(level.platforms.is_empty());
    }

    #[test]
    fn test_unknown_type_skipped() {
        let level = parse(&["9,10,100,200,20,0,0,0", "0,0,0,50,10,0,0,0"]);
        assert!(level.collectables.is_empty());
        assert!(level.enemies.is_empty());
        assert_eq!(level.platforms.len(), 1);
    }

    #[test]
    fn test_invalid_axis_fails_only_that_row() {
        let level = parse(&["1,0,150,60,10,7,2,300", "0,0,0,50,10,0,0,0"]);
        assert_eq!(level.platforms.len(), 1);
        assert!(level.platforms[0].motion.is_none());
    }

    #[test]
    fn test_unknown_ai_type_skips_enemy() {
        let level = parse(&["3,50,50,9,#FF0000,0,0,0"]);
        assert!(level.enemies.is_empty());
    }

    #[test]
    fn test_platform_ids_follow_load_order() {
        let level = parse(&[
            "0,0,0,50,10,0,0,0",
            "1,0,150,60,10,1,2,300",
            "0,0,40,50,10,0,0,0",
        ]);
        let ids: Vec<u32> = level.platforms.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_text_gives_empty_level() {
        let level = Level::parse("", &Tuning::default());
        assert!(level.platforms.is_empty());
        assert!(level.collectables.is_empty());
        assert!(level.enemies.is_empty());
    }
}
