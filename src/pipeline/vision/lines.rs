use image::GrayImage;

use super::morphology::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRules {
    pub min_length: u32,
    pub max_gap: u32,
    pub vote_threshold: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    start: u32,
    end: u32,
}

impl Segment {
    fn overlaps(&self, other: &Segment) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// Counts axis-aligned line segments in a binary image.
///
/// Foreground runs along each row (or column) are joined across gaps of at
/// most `max_gap`; joined segments need `min_length` span and
/// `vote_threshold` foreground pixels. Segments on neighbouring rows that
/// overlap belong to the same line, so a thick stroke counts once.
pub fn count_segments(binary: &GrayImage, orientation: Orientation, rules: SegmentRules) -> usize {
    let (width, height) = binary.dimensions();
    let (lines, span) = match orientation {
        Orientation::Horizontal => (height, width),
        Orientation::Vertical => (width, height),
    };
    let is_on = |line: u32, pos: u32| match orientation {
        Orientation::Horizontal => binary.get_pixel(pos, line)[0] > 0,
        Orientation::Vertical => binary.get_pixel(line, pos)[0] > 0,
    };

    let mut count = 0;
    let mut previous: Vec<Segment> = Vec::new();

    for line in 0..lines {
        let current = segments_in_line(span, |pos| is_on(line, pos), rules);
        count += current
            .iter()
            .filter(|segment| !previous.iter().any(|p| p.overlaps(segment)))
            .count();
        previous = current;
    }

    count
}

fn segments_in_line(span: u32, is_on: impl Fn(u32) -> bool, rules: SegmentRules) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut open: Option<(Segment, u32)> = None;

    for pos in 0..span {
        if !is_on(pos) {
            continue;
        }
        open = match open {
            Some((segment, votes)) if pos - segment.end - 1 <= rules.max_gap => Some((
                Segment {
                    start: segment.start,
                    end: pos,
                },
                votes + 1,
            )),
            Some(closed) => {
                push_if_strong(&mut segments, closed, rules);
                Some((Segment { start: pos, end: pos }, 1))
            }
            None => Some((Segment { start: pos, end: pos }, 1)),
        };
    }
    if let Some(closed) = open {
        push_if_strong(&mut segments, closed, rules);
    }

    segments
}

fn push_if_strong(segments: &mut Vec<Segment>, (segment, votes): (Segment, u32), rules: SegmentRules) {
    let length = segment.end - segment.start + 1;
    if length >= rules.min_length && votes >= rules.vote_threshold {
        segments.push(segment);
    }
}
