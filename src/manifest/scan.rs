//! Line scanner that groups manifest lines into `<types>` blocks.
//!
//! The scanner has two states: outside any block, where lines pass through
//! as opaque segments, and inside a block, where lines are buffered until the
//! closing marker. A block still open at end of input is reported separately
//! so callers decide what to do with it.

use regex::Regex;
use std::sync::LazyLock;

const OPEN_MARKER: &str = "<types>";
const CLOSE_MARKER: &str = "</types>";

static NAME_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<name>(\w+)</name>").expect("name entry regex"));

/// Declared type name in `text`; the last entry wins when several appear.
pub(super) fn declared_name(text: &str) -> Option<&str> {
    NAME_ENTRY
        .captures_iter(text)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_block_open(line: &str) -> bool {
    line.trim_start().starts_with(OPEN_MARKER)
}

fn is_block_close(line: &str) -> bool {
    line.trim_end().ends_with(CLOSE_MARKER)
}

/// Buffered lines of one `<types>` block, markers included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Block<'a> {
    pub(super) lines: Vec<&'a str>,
    pub(super) name: Option<&'a str>,
}

impl<'a> Block<'a> {
    fn open(line: &'a str) -> Self {
        let mut block = Self {
            lines: Vec::new(),
            name: None,
        };
        block.push(line);
        block
    }

    fn push(&mut self, line: &'a str) {
        if let Some(name) = declared_name(line) {
            self.name = Some(name);
        }
        self.lines.push(line);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Segment<'a> {
    Line(&'a str),
    Block(Block<'a>),
}

enum ScanState<'a> {
    Outside,
    Inside(Block<'a>),
}

impl<'a> ScanState<'a> {
    fn after(block: Block<'a>, line: &str, segments: &mut Vec<Segment<'a>>) -> Self {
        if is_block_close(line) {
            segments.push(Segment::Block(block));
            ScanState::Outside
        } else {
            ScanState::Inside(block)
        }
    }
}

#[derive(Debug)]
pub(super) struct Scan<'a> {
    pub(super) segments: Vec<Segment<'a>>,
    pub(super) unterminated: Option<Block<'a>>,
}

/// Split `document` on `\n` and group the lines into segments.
pub(super) fn scan(document: &str) -> Scan<'_> {
    let mut segments = Vec::new();
    let mut state = ScanState::Outside;
    for line in document.split('\n') {
        state = match state {
            ScanState::Outside if is_block_open(line) => {
                ScanState::after(Block::open(line), line, &mut segments)
            }
            ScanState::Outside => {
                segments.push(Segment::Line(line));
                ScanState::Outside
            }
            ScanState::Inside(mut block) => {
                block.push(line);
                ScanState::after(block, line, &mut segments)
            }
        };
    }
    let unterminated = match state {
        ScanState::Outside => None,
        ScanState::Inside(block) => Some(block),
    };
    Scan {
        segments,
        unterminated,
    }
}
