//! Shape table for line evaluation
//!
//! A line is rendered per color as a string over a three-symbol alphabet:
//! own stone, empty, or blocked (opponent stone or off-board). The fixed
//! pattern set below is compiled once into direct lookup tables indexed by
//! the base-3 code of each window, so scanning a line is one rolling pass per
//! pattern length and every (possibly overlapping) occurrence is counted.

use crate::board::Stone;

/// Scores attached to each shape, plus the search bounds.
pub struct ShapeScore;

impl ShapeScore {
    pub const ONE: i32 = 20;
    pub const TWO: i32 = 120;
    pub const THREE: i32 = 720;
    /// A closed four scores like a three: it forces one reply and no more.
    pub const FOUR: i32 = 720;
    pub const OPEN_FOUR: i32 = 4_320;
    pub const FIVE: i32 = 50_000;

    /// Upper search bound
    pub const MAX: i32 = 10_000_000;
    /// Lower search bound
    pub const MIN: i32 = -Self::MAX;
}

/// Cell as seen from one color's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Empty = 0,
    Own = 1,
    Blocked = 2,
}

impl Symbol {
    /// Render a cell for `color`. Opponent stones and the board edge are alike.
    #[inline]
    pub fn for_cell(cell: Option<Stone>, color: Stone) -> Symbol {
        match cell {
            Some(Stone::Empty) => Symbol::Empty,
            Some(stone) if stone == color => Symbol::Own,
            _ => Symbol::Blocked,
        }
    }

    /// Parse the compact text form: `1` own, `0` empty, `x` or space blocked.
    pub fn parse_line(text: &str) -> Option<Vec<Symbol>> {
        text.chars()
            .map(|c| match c {
                '1' => Some(Symbol::Own),
                '0' => Some(Symbol::Empty),
                'x' | ' ' => Some(Symbol::Blocked),
                _ => None,
            })
            .collect()
    }

    #[inline]
    fn digit(self) -> usize {
        self as usize
    }
}

/// Named tactical shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    One,
    Two,
    Three,
    Four,
    OpenFour,
    Five,
}

impl Shape {
    #[inline]
    pub const fn score(self) -> i32 {
        match self {
            Shape::One => ShapeScore::ONE,
            Shape::Two => ShapeScore::TWO,
            Shape::Three => ShapeScore::THREE,
            Shape::Four => ShapeScore::FOUR,
            Shape::OpenFour => ShapeScore::OPEN_FOUR,
            Shape::Five => ShapeScore::FIVE,
        }
    }
}

const O: Symbol = Symbol::Own;
const E: Symbol = Symbol::Empty;

/// The built-in pattern set.
pub const PATTERNS: [(&[Symbol], Shape); 16] = [
    (&[E, E, O, E, E, E], Shape::One),
    (&[E, E, E, O, E, E], Shape::One),
    (&[E, O, E, O, E, E], Shape::Two),
    (&[E, E, O, E, O, E], Shape::Two),
    (&[E, E, O, O, E, E], Shape::Two),
    (&[E, O, O, O, E, E], Shape::Three),
    (&[E, E, O, O, O, E], Shape::Three),
    (&[E, O, E, O, O, E], Shape::Three),
    (&[E, O, O, E, O, E], Shape::Three),
    (&[O, O, O, O, E], Shape::Four),
    (&[E, O, O, O, O], Shape::Four),
    (&[O, E, O, O, O], Shape::Four),
    (&[O, O, E, O, O], Shape::Four),
    (&[O, O, O, E, O], Shape::Four),
    (&[E, O, O, O, O, E], Shape::OpenFour),
    (&[O, O, O, O, O], Shape::Five),
];

/// Lookup table for every pattern of one length.
#[derive(Debug, Clone)]
struct LengthTable {
    len: usize,
    /// 3^len
    modulus: usize,
    shapes: Vec<Option<Shape>>,
}

impl LengthTable {
    fn new(len: usize) -> Self {
        let modulus = 3usize.pow(len as u32);
        Self {
            len,
            modulus,
            shapes: vec![None; modulus],
        }
    }
}

/// Compiled multi-pattern matcher over [`Symbol`] lines.
///
/// Built once at engine start-up and shared immutably.
#[derive(Debug, Clone)]
pub struct ShapeTable {
    tables: Vec<LengthTable>,
}

impl ShapeTable {
    /// Compile the built-in [`PATTERNS`].
    #[must_use]
    pub fn new() -> Self {
        Self::from_patterns(&PATTERNS)
    }

    /// Compile an arbitrary pattern set. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_patterns(patterns: &[(&[Symbol], Shape)]) -> Self {
        let mut tables: Vec<LengthTable> = Vec::new();
        for &(pattern, shape) in patterns {
            if pattern.is_empty() {
                continue;
            }
            let slot = match tables.iter().position(|t| t.len == pattern.len()) {
                Some(i) => i,
                None => {
                    tables.push(LengthTable::new(pattern.len()));
                    tables.len() - 1
                }
            };
            let code = encode(pattern);
            tables[slot].shapes[code] = Some(shape);
        }
        Self { tables }
    }

    /// Shape recognised for exactly this pattern, if any.
    #[must_use]
    pub fn shape_of(&self, pattern: &[Symbol]) -> Option<Shape> {
        self.tables
            .iter()
            .find(|t| t.len == pattern.len())
            .and_then(|t| t.shapes[encode(pattern)])
    }

    /// Every shape occurrence in `line`, overlapping matches included.
    pub fn matches(&self, line: &[Symbol]) -> Vec<Shape> {
        let mut found = Vec::new();
        self.scan(line, |shape| found.push(shape));
        found
    }

    /// Sum of the scores of every shape occurrence in `line`.
    /// Windows that match no pattern contribute zero.
    #[inline]
    pub fn score_line(&self, line: &[Symbol]) -> i32 {
        let mut score = 0;
        self.scan(line, |shape| score += shape.score());
        score
    }

    #[inline]
    fn scan(&self, line: &[Symbol], mut on_match: impl FnMut(Shape)) {
        for table in &self.tables {
            if line.len() < table.len {
                continue;
            }
            let mut code = 0usize;
            for (i, symbol) in line.iter().enumerate() {
                code = (code * 3 + symbol.digit()) % table.modulus;
                if i + 1 >= table.len {
                    if let Some(shape) = table.shapes[code] {
                        on_match(shape);
                    }
                }
            }
        }
    }
}

impl Default for ShapeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn encode(pattern: &[Symbol]) -> usize {
    pattern.iter().fold(0, |code, s| code * 3 + s.digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Vec<Symbol> {
        Symbol::parse_line(text).unwrap()
    }

    #[test]
    fn test_shape_score_hierarchy() {
        assert!(ShapeScore::FIVE > ShapeScore::OPEN_FOUR);
        assert!(ShapeScore::OPEN_FOUR > ShapeScore::THREE);
        assert_eq!(ShapeScore::FOUR, ShapeScore::THREE);
        assert!(ShapeScore::THREE > ShapeScore::TWO);
        assert!(ShapeScore::TWO > ShapeScore::ONE);
        assert!(ShapeScore::MAX > ShapeScore::FIVE * 100);
    }

    #[test]
    fn test_table_lookup() {
        let table = ShapeTable::new();
        assert_eq!(table.shape_of(&line("11111")), Some(Shape::Five));
        assert_eq!(table.shape_of(&line("011110")), Some(Shape::OpenFour));
        assert_eq!(table.shape_of(&line("001000")), Some(Shape::One));
        assert_eq!(table.shape_of(&line("000100")), Some(Shape::One));
        assert_eq!(table.shape_of(&line("011100")), Some(Shape::Three));
        assert_eq!(table.shape_of(&line("000000")), None);
        assert_eq!(table.shape_of(&line("1111")), None);
    }

    #[test]
    fn test_named_scores() {
        assert_eq!(Shape::Five.score(), 50_000);
        assert_eq!(Shape::OpenFour.score(), 4_320);
        assert_eq!(Shape::One.score(), 20);
        assert_eq!(Shape::Three.score(), 720);
    }

    #[test]
    fn test_single_shape_lines() {
        let table = ShapeTable::new();
        assert_eq!(table.score_line(&line("11111")), ShapeScore::FIVE);
        assert_eq!(table.score_line(&line("001000")), ShapeScore::ONE);
        assert_eq!(table.score_line(&line("000100")), ShapeScore::ONE);
        assert_eq!(table.score_line(&line("011100")), ShapeScore::THREE);
    }

    #[test]
    fn test_overlapping_matches_all_count() {
        let table = ShapeTable::new();
        // 011110 also contains 01111 and 11110
        let mut shapes = table.matches(&line("011110"));
        shapes.sort_by_key(|s| s.score());
        assert_eq!(shapes, vec![Shape::Four, Shape::Four, Shape::OpenFour]);
        assert_eq!(
            table.score_line(&line("011110")),
            ShapeScore::OPEN_FOUR + 2 * ShapeScore::FOUR
        );
    }

    #[test]
    fn test_blocked_breaks_shape() {
        let table = ShapeTable::new();
        assert_eq!(table.score_line(&line("x1111x")), 0);
        assert_eq!(table.score_line(&line("x11110")), ShapeScore::FOUR);
        assert_eq!(table.score_line(&line("")), 0);
        assert_eq!(table.score_line(&line("0000000000")), 0);
    }

    #[test]
    fn test_symbol_for_cell() {
        assert_eq!(Symbol::for_cell(Some(Stone::Black), Stone::Black), Symbol::Own);
        assert_eq!(Symbol::for_cell(Some(Stone::White), Stone::Black), Symbol::Blocked);
        assert_eq!(Symbol::for_cell(Some(Stone::Empty), Stone::Black), Symbol::Empty);
        assert_eq!(Symbol::for_cell(None, Stone::White), Symbol::Blocked);
    }

    #[test]
    fn test_custom_pattern_set() {
        let table = ShapeTable::from_patterns(&[(&[O, O], Shape::Two)]);
        assert_eq!(table.score_line(&line("0111")), 2 * ShapeScore::TWO);
        assert_eq!(table.shape_of(&line("11111")), None);
    }
}
