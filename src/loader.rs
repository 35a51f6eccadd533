use crate::{Error, Point};

pub trait Loader {
    fn load(&mut self, path: &str) -> Result<Vec<Point>, Error>;
}

/// Plain text point file, one point per line.
///
/// ```text
/// # comment
/// 0 0
/// 800, 600
/// ```
/// Coordinates are separated by whitespace or a comma, blank lines and
/// everything after `#` are ignored.
#[derive(Debug, Default)]
pub struct PlainFileLoader {}

impl Loader for PlainFileLoader {
    fn load(&mut self, path: &str) -> Result<Vec<Point>, Error> {
        let content = std::fs::read_to_string(path)?;
        let points = Self::parse(&content)?;
        log::debug!("loaded {} points from {path}", points.len());
        Ok(points)
    }
}

impl PlainFileLoader {
    pub fn parse(content: &str) -> Result<Vec<Point>, Error> {
        let mut points = vec![];

        for (index, raw) in content.lines().enumerate() {
            // line numbers are 1 based in errors
            let line = index + 1;
            let data = match raw.split_once('#') {
                Some((data, _comment)) => data,
                None => raw,
            };
            if data.trim().is_empty() {
                continue;
            }

            let parse_err = || Error::Parse {
                line,
                content: raw.to_string(),
            };

            let mut iter = data
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty());
            let (Some(x), Some(y), None) = (iter.next(), iter.next(), iter.next()) else {
                return Err(parse_err());
            };

            let x = x.parse::<f64>().map_err(|_| parse_err())?;
            let y = y.parse::<f64>().map_err(|_| parse_err())?;

            let point = Point::new(x, y);
            if !point.is_finite() {
                return Err(Error::NonFiniteCoordinate { line });
            }
            points.push(point);
        }

        Ok(points)
    }
}
