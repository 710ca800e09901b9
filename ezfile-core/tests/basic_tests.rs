//! Basic and property tests for ezfile-core

use ezfile_core::*;
use proptest::prelude::*;
use std::convert::Infallible;

/// Drive a window over `lines`, calling `visit` after every step that
/// produced a current line. Returns the yielded lines.
fn walk<F>(lines: &[String], size: WindowSize, mut visit: F) -> Vec<String>
where
    F: FnMut(&LineWindow<String>),
{
    let mut source = lines.iter().cloned();
    let mut window = LineWindow::new(size);
    let mut yielded = Vec::new();

    loop {
        let pulled = window.step(|| Ok::<_, Infallible>(source.next()));
        let Some(line) = pulled.unwrap().cloned() else {
            break;
        };
        yielded.push(line);
        visit(&window);
    }
    yielded
}

fn numbered(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("line {i}")).collect()
}

#[test]
fn test_five_line_scenario() {
    let lines: Vec<String> = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
    let size = WindowSize::new(3).unwrap();

    let mut checked = false;
    let yielded = walk(&lines, size, |window| {
        if window.current().map(String::as_str) == Some("c") {
            assert_eq!(window.current_position(), Some(2));
            assert_eq!(window.get(1).unwrap().map(String::as_str), Some("b"));
            assert_eq!(window.get(2).unwrap().map(String::as_str), Some("c"));
            assert_eq!(window.get(3).unwrap().map(String::as_str), Some("d"));
            assert!(matches!(window.get(0), Err(WindowError::OutOfRange { .. })));
            assert!(matches!(window.get(4), Err(WindowError::OutOfRange { .. })));
            checked = true;
        }
    });

    assert!(checked);
    assert_eq!(yielded, lines);
}

#[test]
fn test_empty_source_yields_nothing() {
    for width in [3, 5, 9] {
        let yielded = walk(&[], WindowSize::new(width).unwrap(), |_| {
            panic!("no line expected")
        });
        assert!(yielded.is_empty());
    }
}

#[test]
fn test_short_source_keeps_lookahead_empty() {
    let lines = numbered(2);
    let size = WindowSize::new(7).unwrap();

    let mut first = true;
    let yielded = walk(&lines, size, |window| {
        if first {
            let slots: Vec<_> = window.slots().map(|slot| slot.is_some()).collect();
            assert_eq!(slots, [false, false, false, true, true, false, false]);
            first = false;
        }
    });
    assert_eq!(yielded, lines);
}

#[test]
fn test_pull_count_is_one_per_advance() {
    let lines = numbered(10);
    let size = WindowSize::new(5).unwrap();

    let mut pulls = Vec::new();
    walk(&lines, size, |window| pulls.push(window.pulls()));

    assert_eq!(pulls.first(), Some(&3));
    assert!(pulls.windows(2).all(|pair| pair[1] == pair[0] + 1));
}

proptest! {
    #[test]
    fn prop_window_never_drops_or_duplicates(count in 0usize..60, width in 2usize..12) {
        let lines = numbered(count);
        let yielded = walk(&lines, WindowSize::new(width).unwrap(), |_| {});
        prop_assert_eq!(yielded, lines);
    }

    #[test]
    fn prop_get_matches_indexed_copy(count in 0usize..60, width in 2usize..12) {
        let lines = numbered(count);
        let size = WindowSize::new(width).unwrap();
        let half = size.half_width() as isize;

        walk(&lines, size, |window| {
            let current = window.current_position().unwrap() as isize;
            for index in (current - half)..=(current + half) {
                let expected = usize::try_from(index).ok().and_then(|i| lines.get(i));
                assert_eq!(window.get(index).unwrap(), expected);
            }
            assert!(window.get(current - half - 1).is_err());
            assert!(window.get(current + half + 1).is_err());
        });
    }

    #[test]
    fn prop_snapshot_length_bounds(count in 0usize..60, width in 2usize..12) {
        let lines = numbered(count);
        let size = WindowSize::new(width).unwrap();
        let half = size.half_width();

        let mut steps = 0usize;
        walk(&lines, size, |window| {
            let len = window.snapshot().count();
            assert!(len >= 1 && len <= size.get());
            // Full once the history has filled in and enough lookahead exists
            let position = window.current_position().unwrap();
            if steps >= half && position + half < count {
                assert_eq!(len, size.get());
            }
            if steps == 0 {
                assert!(len >= (half + 1).min(count));
            }
            steps += 1;
        });
    }

    #[test]
    fn prop_even_widths_round_up(width in 1usize..1000) {
        let requested = width * 2;
        prop_assert_eq!(WindowSize::new(requested).unwrap().get(), requested + 1);
    }
}
